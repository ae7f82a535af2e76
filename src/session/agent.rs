//! Seats: where candidate moves come from.
//!
//! An [`Agent`] produces exactly one request per prompt. The human agent
//! lives in the `view` module (it blocks on stdin); the random opponent
//! lives here.

use crate::core::{Edge, GameRng, GameRngState, Point};
use crate::game::GameSnapshot;

use super::handoff::TurnRequest;

/// A move source for one roster seat.
pub trait Agent {
    /// Produce one request for the given stable state. Called once per
    /// handshake; on a rejection it is called again for the same turn.
    fn propose(&mut self, snapshot: &GameSnapshot) -> TurnRequest;

    /// The agent's RNG state, for seats that should resume deterministically
    /// from a save. Human seats have none.
    fn rng_state(&self) -> Option<GameRngState> {
        None
    }
}

/// The computer opponent: uniform-random legal-edge selection.
///
/// Candidates are drawn by picking a first dot uniformly inside the bounds,
/// stepping one unit in a random axis direction, and resampling whenever the
/// step leaves the board or the location is already taken. The loop is
/// unbounded but terminates in practice: the free-edge set only shrinks, and
/// the session never prompts a seat on a full board.
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    /// Create a seeded random opponent.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Resume an opponent mid-stream from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        Self {
            rng: GameRng::from_state(state),
        }
    }

    fn random_candidate(&mut self, width: i32, height: i32) -> Option<Edge> {
        let p1 = Point::new(
            self.rng.gen_range(0..width),
            self.rng.gen_range(0..height),
        );
        let step = if self.rng.gen_bool(0.5) { 1 } else { -1 };
        let p2 = if self.rng.gen_bool(0.5) {
            Point::new(p1.x, p1.y + step)
        } else {
            Point::new(p1.x + step, p1.y)
        };
        if p2.x < 0 || p2.x >= width || p2.y < 0 || p2.y >= height {
            return None;
        }
        // Adjacency holds by construction.
        Some(Edge::new(p1, p2).expect("unit step produced a non-unit edge"))
    }
}

impl Agent for RandomAgent {
    fn propose(&mut self, snapshot: &GameSnapshot) -> TurnRequest {
        loop {
            let Some(candidate) = self.random_candidate(snapshot.width, snapshot.height) else {
                continue;
            };
            if snapshot.contains_location(&candidate) {
                continue;
            }
            return TurnRequest::Play(candidate);
        }
    }

    fn rng_state(&self) -> Option<GameRngState> {
        Some(self.rng.state())
    }
}
