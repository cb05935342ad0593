//! Grid coordinates.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of rows (and columns) on the grid.
pub const GRID_SIZE: usize = 3;

/// Number of cells on the grid.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// A `(row, column)` coordinate.
///
/// Positions are not range-checked on construction: a human typing `"39"`
/// produces a position that is simply not on the grid, and the grid answers
/// `false` when asked to place a marker there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: usize,
    column: usize,
}

impl Position {
    /// All nine on-grid positions in row-major order.
    pub const ALL: [Position; CELL_COUNT] = [
        Position::new(0, 0),
        Position::new(0, 1),
        Position::new(0, 2),
        Position::new(1, 0),
        Position::new(1, 1),
        Position::new(1, 2),
        Position::new(2, 0),
        Position::new(2, 1),
        Position::new(2, 2),
    ];

    /// Creates a position; it may lie off the grid.
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Row index.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column index.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns true when both coordinates are within `[0, GRID_SIZE)`.
    pub fn is_on_grid(&self) -> bool {
        self.row < GRID_SIZE && self.column < GRID_SIZE
    }

    /// Converts to a row-major cell index (0-8), or `None` when off the grid.
    #[instrument]
    pub fn to_index(self) -> Option<usize> {
        self.is_on_grid().then(|| self.row * GRID_SIZE + self.column)
    }

    /// Creates a position from a row-major cell index.
    #[instrument]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.column)
    }
}
