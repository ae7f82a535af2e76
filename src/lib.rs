//! # dots-boxes
//!
//! A dots-and-boxes game engine with a threaded turn-handoff session loop.
//!
//! ## Design Principles
//!
//! 1. **Derived turn state**: whose turn it is is computed from the
//!    placed-line count, never stored, so the turn order cannot drift out of
//!    sync with the board.
//!
//! 2. **Two equality notions on lines**: placement exclusion ignores the
//!    owner (`ColoredEdge::same_location`); identity comparison includes it.
//!    The two are separate functions, not one overloaded equality.
//!
//! 3. **A bounded handshake instead of shared mutable state**: the engine
//!    actor and the presentation actor alternate through two signals per
//!    turn across the blocking human-input boundary. All mutation stays on
//!    the engine actor.
//!
//! ## Architecture
//!
//! - Recoverable rejections (`MoveError`) never touch engine state; fatal
//!   errors exist only at construction (`SetupError`).
//! - Save files are one flat, versioned JSON document dispatched on an
//!   explicit session-kind tag.
//!
//! ## Modules
//!
//! - `core`: points, edges, colors, players, RNG, errors
//! - `board`: the placed-line collection and geometric queries
//! - `game`: the turn engine and its snapshot view
//! - `session`: the handoff protocol, agents, and the session loop
//! - `persist`: JSON save/restore
//! - `view`: console rendering and the human prompt

pub mod board;
pub mod core;
pub mod game;
pub mod persist;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use crate::core::{
    ColoredEdge, Edge, GameInProgress, GameRng, GameRngState, MoveError, PersistError, Player,
    PlayerColor, PlayerId, PlayerMap, Point, RestoreError, Roster, SessionError, SetupError,
};

pub use crate::board::Grid;

pub use crate::game::{Game, GameSnapshot};

pub use crate::session::{
    turn_channel, Agent, EnginePort, Frontend, PresentationPort, RandomAgent, Seats, Session,
    SessionKind, SessionOutcome, TurnRequest, TurnSignal,
};

pub use crate::persist::{SavedSession, SAVE_VERSION};

pub use crate::view::{ConsoleAgent, ConsoleView};
