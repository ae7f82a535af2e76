//! The turn engine and its snapshot view.

pub mod engine;
pub mod snapshot;

pub use engine::Game;
pub use snapshot::GameSnapshot;
