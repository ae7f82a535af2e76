//! Error taxonomy.
//!
//! Two severities:
//!
//! - `SetupError` is fatal: no `Game` exists until construction parameters
//!   are fixed.
//! - `MoveError` is always recoverable: a rejected move never touches engine
//!   state and is reported back to the submitting actor for a retry.
//!
//! Internal inconsistencies (a completion scan disagreeing with the
//! closed-form fullness count, an out-of-range cell origin reaching the
//! board) are construction-time invariant violations and are handled with
//! `assert!`, not with error values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection reasons for a candidate move.
///
/// `TooLong` and `Diagonal` are normally caught at `Edge` construction;
/// `Grid::place` re-checks them defensively. `OutOfBounds` and
/// `AlreadyOccupied` can only be decided against a concrete board.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveError {
    /// The endpoints are more than one lattice step apart.
    #[error("line is too long; endpoints must be adjacent dots")]
    TooLong,
    /// The endpoints are not axis-aligned (this includes a degenerate
    /// zero-length candidate).
    #[error("line is diagonal or degenerate; endpoints must differ in exactly one axis by one")]
    Diagonal,
    /// An endpoint lies outside the board bounds.
    #[error("line sits outside the bounds of the board")]
    OutOfBounds,
    /// A line already occupies that location, in either direction and
    /// regardless of owner.
    #[error("a line already exists between those endpoints")]
    AlreadyOccupied,
}

/// Rejection reasons for game construction.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    /// Board dimensions below the 2x2-dot minimum.
    #[error("board width and height must each be at least 2 dots, got {width}x{height}")]
    BoardTooSmall { width: i32, height: i32 },
    /// Fewer than two players.
    #[error("a game requires at least 2 players, got {0}")]
    NotEnoughPlayers(usize),
    /// More players than assignable colors.
    #[error("at most {max} players are supported, got {got}")]
    TooManyPlayers { got: usize, max: usize },
    /// Two roster entries share a name.
    #[error("two players have the same name: {0:?}")]
    DuplicateName(String),
}

/// Returned by queries that are only meaningful once the board is full.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("the game is still in progress")]
pub struct GameInProgress;

/// Rejection reasons when rebuilding a game from a snapshot.
#[derive(Debug, Error)]
pub enum RestoreError {
    /// The snapshot's construction parameters are invalid.
    #[error("invalid snapshot setup: {0}")]
    Setup(#[from] SetupError),
    /// A recorded edge does not replay cleanly onto a fresh board.
    #[error("snapshot contains an unplayable line: {0}")]
    Move(#[from] MoveError),
    /// A score entry names a player that is not on the roster.
    #[error("score entry for unknown player {0:?}")]
    UnknownPlayer(String),
    /// More credited cells than the board can hold, or a cell outside it.
    #[error("credited cell {0} is not a cell origin on this board")]
    BadClaimedCell(crate::core::Point),
}

/// Failures of the handoff channel between the engine and presentation
/// actors. Either side disconnecting ends the session.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The peer actor hung up.
    #[error("the other side of the turn channel disconnected")]
    Disconnected,
}

/// Failures of the save/restore layer.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save file version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("saved game does not restore: {0}")]
    Restore(#[from] RestoreError),
}
