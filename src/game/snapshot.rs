//! Render-ready, persistence-ready view of a game.
//!
//! A snapshot carries everything the presentation actor needs to draw a turn
//! and everything the persistence layer needs to rebuild the engine: board
//! dimensions, the placed lines in placement order, the roster, the score
//! map keyed by player name, and the credited cells.
//!
//! Restoring replays the recorded lines through the normal placement path,
//! so a tampered or corrupted snapshot fails with the same rejections a live
//! move would. Scores are re-linked to the roster by name; a score entry
//! naming an unknown player is an error instead of a silently dangling map
//! key.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::engine::Game;
use crate::core::{ColoredEdge, Edge, Player, Point, RestoreError};

/// A full, self-contained view of a game at one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Board width in dots.
    pub width: i32,
    /// Board height in dots.
    pub height: i32,
    /// Roster in turn order, names and colors.
    pub players: Vec<Player>,
    /// Score per player name.
    pub scores: FxHashMap<String, u32>,
    /// Placed lines in placement order. The order is what turn derivation
    /// rests on, so it must survive the round-trip.
    pub edges: Vec<ColoredEdge>,
    /// Cell origins already credited.
    pub claimed: Vec<Point>,
    /// Name of the player who moves next.
    pub current_player: String,
    /// Name of the player who moved last, if any.
    pub last_player: Option<String>,
    /// Whether the board is full.
    pub ended: bool,
}

impl GameSnapshot {
    /// Whether a line occupies the given location, regardless of owner.
    #[must_use]
    pub fn contains_location(&self, edge: &Edge) -> bool {
        self.edges.iter().any(|placed| placed.same_location(edge))
    }

    /// The color of the line between two dots, if one has been placed.
    #[must_use]
    pub fn edge_between(&self, p1: Point, p2: Point) -> Option<crate::core::PlayerColor> {
        self.edges
            .iter()
            .find(|placed| placed.edge().connects(p1, p2))
            .map(|placed| placed.color())
    }

    /// A player's score, zero for names not in the map.
    #[must_use]
    pub fn score_of(&self, name: &str) -> u32 {
        self.scores.get(name).copied().unwrap_or(0)
    }

    /// Roster position of the player who moves next.
    #[must_use]
    pub fn current_player_position(&self) -> usize {
        self.players
            .iter()
            .position(|p| p.name() == self.current_player)
            .unwrap_or(0)
    }
}

impl Game {
    /// Capture a full snapshot of this game.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let scores = self
            .roster()
            .player_ids()
            .map(|id| (self.roster()[id].name().to_string(), self.score(id)))
            .collect();
        GameSnapshot {
            width: self.grid().width(),
            height: self.grid().height(),
            players: self.roster().iter().cloned().collect(),
            scores,
            edges: self.grid().edges(),
            claimed: self.claimed_cells().collect(),
            current_player: self.current_player().name().to_string(),
            last_player: self.last_player().map(|p| p.name().to_string()),
            ended: self.is_ended(),
        }
    }

    /// Rebuild a game from a snapshot.
    ///
    /// Construction, every recorded line, and every score entry go through
    /// the same validation as live play; the derived turn and end state come
    /// out of the replay rather than out of the snapshot's own claims.
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Result<Self, RestoreError> {
        let names = snapshot
            .players
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        let mut game = Game::new(snapshot.width, snapshot.height, names)?;

        for line in &snapshot.edges {
            game.grid().place(*line)?;
        }

        // Re-link each score entry to its roster entry by name.
        for (name, score) in &snapshot.scores {
            let id = game
                .roster()
                .position_of(name)
                .ok_or_else(|| RestoreError::UnknownPlayer(name.clone()))?;
            game.set_score(id, *score);
        }

        for origin in &snapshot.claimed {
            if origin.x < 0
                || origin.x >= snapshot.width
                || origin.y < 0
                || origin.y >= snapshot.height
            {
                return Err(RestoreError::BadClaimedCell(*origin));
            }
            game.mark_claimed(*origin);
        }

        Ok(game)
    }
}
