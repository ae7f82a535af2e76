//! The turn-handoff channel pair.
//!
//! One engine actor and one presentation actor alternate through a two-step
//! handshake per turn:
//!
//! 1. The engine signals that state is stable (`TurnSignal::Render`) after a
//!    move has been fully applied and scored.
//! 2. The presentation actor renders, collects exactly one candidate, and
//!    submits it (`TurnRequest`) through a bound-1 channel: the
//!    single-writer/single-reader slot of the protocol.
//! 3. The engine wakes only on that submission. A rejection is answered with
//!    `TurnSignal::Rejected` and the handshake restarts at step 2 without a
//!    fresh render signal; an acceptance proceeds to step 1 of the next turn
//!    or to `TurnSignal::GameOver`.
//!
//! Within a turn, grid mutation happens before the score update, which
//! happens before the next render signal; that total order rides on signal
//! causality, not on the grid's internal lock.

use std::path::PathBuf;
use std::sync::mpsc;

use crate::core::{Edge, GameRngState, MoveError, Player, SessionError};
use crate::game::GameSnapshot;

/// One turn's worth of input from the presentation actor.
#[derive(Clone, Debug, PartialEq)]
pub enum TurnRequest {
    /// The current player's candidate line.
    Play(Edge),
    /// Persist the session. Carries the computer opponent's RNG state, if
    /// any, since that lives on the presentation side of the boundary.
    Save { rng: Option<GameRngState> },
    /// End the session without finishing the game.
    Quit,
}

/// Engine-to-presentation signals.
#[derive(Clone, Debug)]
pub enum TurnSignal {
    /// State is stable: render it and collect one candidate.
    Render(GameSnapshot),
    /// The previous candidate was refused; collect another for the same
    /// turn.
    Rejected { attempted: Edge, reason: MoveError },
    /// Outcome of a save request; the same turn's handshake restarts next.
    Saved(Result<PathBuf, String>),
    /// The board is full. Final signal of a completed session.
    GameOver {
        snapshot: GameSnapshot,
        winners: Vec<Player>,
    },
}

/// Engine-side endpoints of the handshake.
pub struct EnginePort {
    signals: mpsc::Sender<TurnSignal>,
    requests: mpsc::Receiver<TurnRequest>,
}

/// Presentation-side endpoints of the handshake.
pub struct PresentationPort {
    signals: mpsc::Receiver<TurnSignal>,
    requests: mpsc::SyncSender<TurnRequest>,
}

/// Create the channel pair connecting the two actors.
#[must_use]
pub fn turn_channel() -> (EnginePort, PresentationPort) {
    let (signal_tx, signal_rx) = mpsc::channel();
    // Capacity 1: the candidate slot is never concurrently read and
    // written, and the presentation actor can never run ahead by more than
    // one submission.
    let (request_tx, request_rx) = mpsc::sync_channel(1);
    (
        EnginePort {
            signals: signal_tx,
            requests: request_rx,
        },
        PresentationPort {
            signals: signal_rx,
            requests: request_tx,
        },
    )
}

impl EnginePort {
    /// Send a signal to the presentation actor.
    pub fn announce(&self, signal: TurnSignal) -> Result<(), SessionError> {
        self.signals.send(signal).map_err(|_| SessionError::Disconnected)
    }

    /// Block until the presentation actor submits a request.
    pub fn await_request(&self) -> Result<TurnRequest, SessionError> {
        self.requests.recv().map_err(|_| SessionError::Disconnected)
    }
}

impl PresentationPort {
    /// Block until the engine actor sends the next signal.
    pub fn await_signal(&self) -> Result<TurnSignal, SessionError> {
        self.signals.recv().map_err(|_| SessionError::Disconnected)
    }

    /// Submit one request to the engine actor.
    pub fn submit(&self, request: TurnRequest) -> Result<(), SessionError> {
        self.requests
            .send(request)
            .map_err(|_| SessionError::Disconnected)
    }
}
