//! The turn engine.
//!
//! ## Derived turn state
//!
//! Whose turn it is is never stored: both the last and the current player
//! index are computed from the placed-line count, so the turn order cannot
//! drift out of sync with what is on the board.
//!
//! ## Scoring
//!
//! `update_scores` scans every cell origin in row-major order and credits
//! each newly completed, not-yet-credited box to the player who made the
//! most recent move. A single move can close up to two boxes (the cells on
//! either side of a shared line); both credits go to the same mover. The
//! full scan, rather than a check of the two cells adjacent to the last
//! line, keeps the operation correct even when it is invoked lazily.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::board::Grid;
use crate::core::{
    ColoredEdge, Edge, GameInProgress, MoveError, Player, PlayerId, PlayerMap, Point, Roster,
    SetupError,
};

/// A dots-and-boxes game: roster, scoreboard, credited boxes, and the board.
///
/// Construction validates everything once; afterwards the engine mutates
/// only through [`Game::submit_move`] and [`Game::update_scores`]. A
/// rejected move leaves the engine untouched.
///
/// ```
/// use dots_boxes::core::{Edge, Point};
/// use dots_boxes::game::Game;
///
/// let mut game = Game::new(5, 5, vec!["A".into(), "B".into()]).unwrap();
/// let edge = Edge::new(Point::new(0, 0), Point::new(1, 0)).unwrap();
/// game.submit_move(edge).unwrap();
/// assert_eq!(game.current_player().name(), "B");
/// ```
#[derive(Debug)]
pub struct Game {
    roster: Roster,
    scores: PlayerMap<u32>,
    claimed: FxHashSet<Point>,
    grid: Grid,
}

impl Game {
    /// Create a new game on a `width x height`-dot board.
    pub fn new(width: i32, height: i32, player_names: Vec<String>) -> Result<Self, SetupError> {
        let roster = Roster::new(player_names)?;
        let grid = Grid::new(width, height)?;
        let scores = PlayerMap::with_value(roster.len(), 0);
        Ok(Self {
            roster,
            scores,
            claimed: FxHashSet::default(),
            grid,
        })
    }

    /// The board.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The roster, in turn order.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Roster index of whoever made the most recent move, or `None` before
    /// the first move.
    #[must_use]
    pub fn last_player_index(&self) -> Option<PlayerId> {
        let moves = self.grid.edge_count();
        if moves == 0 {
            None
        } else {
            Some(PlayerId::new(((moves - 1) % self.roster.len()) as u8))
        }
    }

    /// Roster index of whoever moves next. Player 0 always starts.
    #[must_use]
    pub fn current_player_index(&self) -> PlayerId {
        match self.last_player_index() {
            None => PlayerId::new(0),
            Some(last) => PlayerId::new(((last.index() + 1) % self.roster.len()) as u8),
        }
    }

    /// The player who moves next.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.roster[self.current_player_index()]
    }

    /// The player who made the most recent move, if any.
    #[must_use]
    pub fn last_player(&self) -> Option<&Player> {
        self.last_player_index().map(|id| &self.roster[id])
    }

    /// A player's score.
    #[must_use]
    pub fn score(&self, id: PlayerId) -> u32 {
        self.scores[id]
    }

    /// Submit the current player's candidate line.
    ///
    /// The line is tagged with the current player's color and forwarded to
    /// the board; any rejection is surfaced unchanged and leaves the turn
    /// and all scores exactly as they were.
    pub fn submit_move(&mut self, edge: Edge) -> Result<(), MoveError> {
        let color = self.current_player().color();
        self.grid.place(ColoredEdge::new(edge, color))
    }

    /// Credit every newly completed box to the last mover.
    ///
    /// Scans all cell origins in row-major order; boxes already credited are
    /// skipped, so calling this twice without an intervening move is a
    /// no-op. Returns the origins credited by this call (at most two for a
    /// single move).
    pub fn update_scores(&mut self) -> SmallVec<[Point; 2]> {
        let mut newly: SmallVec<[Point; 2]> = SmallVec::new();
        let Some(last) = self.last_player_index() else {
            // No moves yet, so no box can be complete.
            return newly;
        };
        for origin in self.grid.cell_origins() {
            if self.claimed.contains(&origin) {
                continue;
            }
            if self.grid.is_box_completed(origin) {
                self.scores[last] += 1;
                self.claimed.insert(origin);
                newly.push(origin);
            }
        }
        newly
    }

    /// Whether the board is full. Once true, stays true.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.grid.is_full()
    }

    /// The players holding the maximum score, in roster order.
    ///
    /// Only meaningful once the board is full; calling earlier is an error,
    /// never an empty list.
    pub fn winners(&self) -> Result<Vec<&Player>, GameInProgress> {
        if !self.is_ended() {
            return Err(GameInProgress);
        }
        let max = self
            .scores
            .iter()
            .map(|(_, score)| *score)
            .max()
            .unwrap_or(0);
        Ok(self
            .roster
            .player_ids()
            .filter(|id| self.scores[*id] == max)
            .map(|id| &self.roster[id])
            .collect())
    }

    /// Cell origins credited so far.
    pub fn claimed_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.claimed.iter().copied()
    }

    // Restore hooks for `Game::from_snapshot`; live play never overwrites a
    // score or claims a cell directly.

    pub(crate) fn set_score(&mut self, id: PlayerId, score: u32) {
        self.scores[id] = score;
    }

    pub(crate) fn mark_claimed(&mut self, origin: Point) {
        self.claimed.insert(origin);
    }
}
