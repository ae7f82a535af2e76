//! The board: placed-line collection and geometric queries.

pub mod grid;

pub use grid::Grid;
