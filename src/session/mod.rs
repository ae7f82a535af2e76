//! Sessions: the turn-handoff protocol and the loop that drives it.
//!
//! Two long-lived actors, an engine and a presentation side, alternate
//! through a bounded handshake per turn (`handoff`). The `runner` spawns the
//! engine actor and runs the presentation loop; `agent` defines where
//! candidate moves come from.

pub mod agent;
pub mod handoff;
pub mod runner;

pub use agent::{Agent, RandomAgent};
pub use handoff::{turn_channel, EnginePort, PresentationPort, TurnRequest, TurnSignal};
pub use runner::{Frontend, Seats, Session, SessionKind, SessionOutcome};
