//! The board: the authoritative set of placed lines.
//!
//! ## Bound convention
//!
//! `width` and `height` count the dots of the lattice, and every endpoint of
//! a placed line must satisfy `0 <= x < width`, `0 <= y < height`. Cell
//! origins are scanned over the same range; origins on the far row/column can
//! never complete because their bounding edges would be out of bounds.
//!
//! ## Fullness
//!
//! A `width x height` dot lattice holds exactly `2wh - w - h` distinct unit
//! edges. `place` guarantees every stored edge is distinct, in-bounds and
//! unit-length, so counting suffices: the board is full exactly when the
//! count reaches the closed form.
//!
//! ## Locking
//!
//! The edge collection sits behind a `Mutex` so the presentation actor can
//! iterate for rendering concurrently with a late `place`. The handoff
//! protocol already serializes mutation between handshake points; the lock
//! covers the accessors' contract, not turn ordering.

use std::sync::{Mutex, MutexGuard};

use crate::core::{ColoredEdge, Edge, MoveError, Point, SetupError};

/// A dots-and-boxes board of `width x height` dots.
pub struct Grid {
    width: i32,
    height: i32,
    edges: Mutex<Vec<ColoredEdge>>,
}

impl Grid {
    /// Create an empty board. Both dimensions must be at least 2 dots.
    pub fn new(width: i32, height: i32) -> Result<Self, SetupError> {
        if width < 2 || height < 2 {
            return Err(SetupError::BoardTooSmall { width, height });
        }
        Ok(Self {
            width,
            height,
            edges: Mutex::new(Vec::new()),
        })
    }

    /// Board width in dots.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Board height in dots.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    // No panic can occur while the lock is held, so poisoning is unreachable.
    fn lock(&self) -> MutexGuard<'_, Vec<ColoredEdge>> {
        self.edges.lock().expect("grid lock poisoned")
    }

    /// Try placing a line onto the board.
    ///
    /// Rejects, without mutating:
    /// - a non-unit-length line (impossible to construct, re-checked
    ///   defensively),
    /// - a line with an endpoint outside `[0,width) x [0,height)`,
    /// - a line whose location is already occupied, regardless of owner or
    ///   endpoint order.
    ///
    /// Placement is append-only; lines are never removed or replaced.
    pub fn place(&self, line: ColoredEdge) -> Result<(), MoveError> {
        let edge = line.edge();
        let (dx, dy) = (
            (edge.a().x - edge.b().x).abs(),
            (edge.a().y - edge.b().y).abs(),
        );
        match (dx, dy) {
            (1, 0) | (0, 1) => {}
            (0, n) | (n, 0) if n > 1 => return Err(MoveError::TooLong),
            _ => return Err(MoveError::Diagonal),
        }
        if !self.in_bounds(edge.a()) || !self.in_bounds(edge.b()) {
            return Err(MoveError::OutOfBounds);
        }

        let mut edges = self.lock();
        if edges.iter().any(|placed| placed.same_location(&edge)) {
            return Err(MoveError::AlreadyOccupied);
        }
        edges.push(line);
        Ok(())
    }

    fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Number of placed lines.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.lock().len()
    }

    /// Total number of distinct unit edges this lattice can hold.
    #[must_use]
    pub fn max_edges(&self) -> usize {
        (2 * self.width * self.height - self.width - self.height) as usize
    }

    /// Whether every possible line has been placed.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.edge_count() == self.max_edges()
    }

    /// Whether a line occupies the two given dots, in either order.
    #[must_use]
    pub fn has_edge_between(&self, p1: Point, p2: Point) -> bool {
        self.lock().iter().any(|placed| placed.edge().connects(p1, p2))
    }

    /// Whether a line occupies the given location, regardless of owner.
    #[must_use]
    pub fn contains_location(&self, edge: &Edge) -> bool {
        self.lock().iter().any(|placed| placed.same_location(edge))
    }

    /// Whether all four lines bounding the cell at `origin` (its upper-left
    /// dot) are present.
    ///
    /// `origin` must lie within `[0,width) x [0,height)`; anything else is a
    /// caller bug.
    #[must_use]
    pub fn is_box_completed(&self, origin: Point) -> bool {
        assert!(
            self.in_bounds(origin),
            "cell origin {origin} is outside the board"
        );
        let Point { x, y } = origin;
        self.has_edge_between(origin, Point::new(x + 1, y))
            && self.has_edge_between(origin, Point::new(x, y + 1))
            && self.has_edge_between(Point::new(x + 1, y + 1), Point::new(x, y + 1))
            && self.has_edge_between(Point::new(x + 1, y + 1), Point::new(x + 1, y))
    }

    /// Cell origins in row-major order, the order `Game::update_scores`
    /// credits boxes in.
    pub fn cell_origins(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }

    /// Snapshot of the placed lines in placement order.
    #[must_use]
    pub fn edges(&self) -> Vec<ColoredEdge> {
        self.lock().clone()
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("edges", &*self.lock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerColor;

    fn line(x1: i32, y1: i32, x2: i32, y2: i32, color: PlayerColor) -> ColoredEdge {
        ColoredEdge::new(
            Edge::new(Point::new(x1, y1), Point::new(x2, y2)).unwrap(),
            color,
        )
    }

    #[test]
    fn test_rejects_small_boards() {
        assert!(Grid::new(1, 5).is_err());
        assert!(Grid::new(5, 1).is_err());
        assert!(Grid::new(2, 2).is_ok());
    }

    #[test]
    fn test_place_and_count() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(grid.edge_count(), 0);

        grid.place(line(0, 0, 1, 0, PlayerColor::Red)).unwrap();
        assert_eq!(grid.edge_count(), 1);
        assert!(grid.has_edge_between(Point::new(1, 0), Point::new(0, 0)));
    }

    #[test]
    fn test_duplicate_location_rejected_any_order_any_color() {
        let grid = Grid::new(3, 3).unwrap();
        grid.place(line(0, 0, 1, 0, PlayerColor::Red)).unwrap();

        let same = grid.place(line(0, 0, 1, 0, PlayerColor::Red));
        assert_eq!(same.unwrap_err(), MoveError::AlreadyOccupied);

        let reversed_other_color = grid.place(line(1, 0, 0, 0, PlayerColor::Blue));
        assert_eq!(reversed_other_color.unwrap_err(), MoveError::AlreadyOccupied);

        assert_eq!(grid.edge_count(), 1);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let grid = Grid::new(3, 3).unwrap();

        // x == width is a dot on the lattice edge of a wider board, but not
        // within this board's bound convention.
        let err = grid.place(line(2, 0, 3, 0, PlayerColor::Red)).unwrap_err();
        assert_eq!(err, MoveError::OutOfBounds);

        let err = grid.place(line(0, -1, 0, 0, PlayerColor::Red)).unwrap_err();
        assert_eq!(err, MoveError::OutOfBounds);
    }

    #[test]
    fn test_fullness_closed_form() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(grid.max_edges(), 4);

        let lines = [
            line(0, 0, 1, 0, PlayerColor::Red),
            line(0, 0, 0, 1, PlayerColor::Blue),
            line(1, 0, 1, 1, PlayerColor::Red),
            line(0, 1, 1, 1, PlayerColor::Blue),
        ];
        for (i, l) in lines.iter().enumerate() {
            assert!(!grid.is_full(), "full after only {i} lines");
            grid.place(*l).unwrap();
        }
        assert!(grid.is_full());
    }

    #[test]
    fn test_box_completion() {
        let grid = Grid::new(3, 3).unwrap();
        let origin = Point::new(0, 0);

        grid.place(line(0, 0, 1, 0, PlayerColor::Red)).unwrap();
        grid.place(line(0, 0, 0, 1, PlayerColor::Blue)).unwrap();
        grid.place(line(1, 0, 1, 1, PlayerColor::Red)).unwrap();
        assert!(!grid.is_box_completed(origin));

        grid.place(line(0, 1, 1, 1, PlayerColor::Blue)).unwrap();
        assert!(grid.is_box_completed(origin));
        assert!(!grid.is_box_completed(Point::new(1, 0)));
    }

    #[test]
    #[should_panic(expected = "outside the board")]
    fn test_box_completion_rejects_bad_origin() {
        let grid = Grid::new(3, 3).unwrap();
        let _ = grid.is_box_completed(Point::new(3, 0));
    }

    #[test]
    fn test_cell_origins_row_major() {
        let grid = Grid::new(3, 2).unwrap();
        let origins: Vec<_> = grid.cell_origins().collect();
        assert_eq!(
            origins,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(0, 1),
                Point::new(1, 1),
                Point::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_edges_snapshot_preserves_order() {
        let grid = Grid::new(3, 3).unwrap();
        let first = line(0, 0, 1, 0, PlayerColor::Red);
        let second = line(0, 0, 0, 1, PlayerColor::Blue);
        grid.place(first).unwrap();
        grid.place(second).unwrap();

        assert_eq!(grid.edges(), vec![first, second]);
    }
}
