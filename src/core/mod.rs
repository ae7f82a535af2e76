//! Core value types: points, edges, colors, players, RNG, errors.
//!
//! Everything here is a plain value with no board attached; the `board` and
//! `game` modules give these types their invariants.

pub mod color;
pub mod edge;
pub mod error;
pub mod player;
pub mod point;
pub mod rng;

pub use color::PlayerColor;
pub use edge::{ColoredEdge, Edge};
pub use error::{
    GameInProgress, MoveError, PersistError, RestoreError, SessionError, SetupError,
};
pub use player::{Player, PlayerId, PlayerMap, Roster};
pub use point::Point;
pub use rng::{GameRng, GameRngState};
