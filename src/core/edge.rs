//! Lines between adjacent dots.
//!
//! ## Edge
//!
//! A validated, undirected unit-length connection between two lattice dots.
//! Endpoints are normalized at construction, so the derived equality and
//! hashing are endpoint-set based: `Edge::new(a, b) == Edge::new(b, a)`.
//!
//! ## ColoredEdge
//!
//! An `Edge` plus its owner's color. Two equality notions apply and must not
//! be conflated:
//!
//! - **Placement**: two edges at the same location are mutually exclusive
//!   regardless of owner. Use [`ColoredEdge::same_location`].
//! - **Identity**: the derived `PartialEq`, which also compares the owner.
//!   Used for auditing and snapshot round-trips.

use serde::{Deserialize, Serialize};

use super::color::PlayerColor;
use super::error::MoveError;
use super::point::Point;

/// An undirected unit edge between two adjacent dots.
///
/// Construction validates geometry: the endpoints must differ by exactly one
/// in exactly one axis. Diagonal, degenerate, and longer candidates are
/// rejected with the matching [`MoveError`].
///
/// ```
/// use dots_boxes::core::{Edge, Point};
///
/// let e1 = Edge::new(Point::new(0, 0), Point::new(1, 0)).unwrap();
/// let e2 = Edge::new(Point::new(1, 0), Point::new(0, 0)).unwrap();
/// assert_eq!(e1, e2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    a: Point,
    b: Point,
}

impl Edge {
    /// Create a unit edge between two adjacent dots.
    ///
    /// Endpoint order does not matter; the stored order is normalized.
    pub fn new(p1: Point, p2: Point) -> Result<Self, MoveError> {
        let dx = (p1.x - p2.x).abs();
        let dy = (p1.y - p2.y).abs();
        match (dx, dy) {
            (1, 0) | (0, 1) => {
                let (a, b) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
                Ok(Self { a, b })
            }
            // Same axis, more than one step apart.
            (0, n) | (n, 0) if n > 1 => Err(MoveError::TooLong),
            // Degenerate or off-axis.
            _ => Err(MoveError::Diagonal),
        }
    }

    /// The lexicographically smaller endpoint.
    #[must_use]
    pub fn a(&self) -> Point {
        self.a
    }

    /// The lexicographically larger endpoint.
    #[must_use]
    pub fn b(&self) -> Point {
        self.b
    }

    /// Whether the edge runs along the x axis.
    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.a.y == self.b.y
    }

    /// Whether this edge connects the two given dots, in either order.
    #[must_use]
    pub fn connects(&self, p1: Point, p2: Point) -> bool {
        (self.a == p1 && self.b == p2) || (self.a == p2 && self.b == p1)
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

/// An edge tagged with its owner's color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColoredEdge {
    edge: Edge,
    color: PlayerColor,
}

impl ColoredEdge {
    /// Tag an edge with an owner color.
    #[must_use]
    pub fn new(edge: Edge, color: PlayerColor) -> Self {
        Self { edge, color }
    }

    /// The underlying uncolored edge.
    #[must_use]
    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// The owner's color.
    #[must_use]
    pub fn color(&self) -> PlayerColor {
        self.color
    }

    /// Placement equality: same location, owner ignored.
    ///
    /// This is the relation `Grid::place` deduplicates by. The derived
    /// `PartialEq` additionally compares the owner.
    #[must_use]
    pub fn same_location(&self, other: &Edge) -> bool {
        self.edge == *other
    }
}

impl std::fmt::Display for ColoredEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.edge, self.color)
    }
}
