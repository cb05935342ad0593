//! The 3x3 playing surface.
//!
//! The grid only knows about occupancy. It has no notion of turns, owners
//! or winners; those live in [`crate::rules`] and [`crate::Match`].

use crate::marker::Marker;
use crate::position::{CELL_COUNT, GRID_SIZE, Position};
use tracing::{debug, instrument};

/// One addressable position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    occupant: Option<Marker>,
}

impl Cell {
    fn vacant(position: Position) -> Self {
        Self {
            position,
            occupant: None,
        }
    }

    /// The cell's fixed position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The marker occupying the cell, if any.
    pub fn occupant(&self) -> Option<Marker> {
        self.occupant
    }

    /// Returns true if no marker occupies the cell.
    pub fn is_vacant(&self) -> bool {
        self.occupant.is_none()
    }
}

/// A row, column or diagonal: the unit checked for a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Line {
    /// A row, indexed from the top.
    #[display("row {}", _0)]
    Row(usize),
    /// A column, indexed from the left.
    #[display("column {}", _0)]
    Column(usize),
    /// (0,0) to (2,2).
    #[display("diagonal")]
    Diagonal,
    /// (0,2) to (2,0).
    #[display("anti-diagonal")]
    AntiDiagonal,
}

impl Line {
    /// Every line in scan order: rows, then columns, then both diagonals.
    pub const ALL: [Line; 8] = [
        Line::Row(0),
        Line::Row(1),
        Line::Row(2),
        Line::Column(0),
        Line::Column(1),
        Line::Column(2),
        Line::Diagonal,
        Line::AntiDiagonal,
    ];
}

/// Fixed 3x3 grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [Cell; CELL_COUNT],
}

impl Grid {
    /// Creates an empty grid.
    #[instrument]
    pub fn new() -> Self {
        Self {
            cells: Position::ALL.map(Cell::vacant),
        }
    }

    /// The cell at a position, or `None` when the position is off the grid.
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        position.to_index().map(|index| &self.cells[index])
    }

    /// The marker at a position, if the position is on the grid and occupied.
    pub fn occupant(&self, position: Position) -> Option<Marker> {
        self.cell(position).and_then(Cell::occupant)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Returns true if the position is on the grid and vacant.
    pub fn is_occupiable(&self, position: Position) -> bool {
        self.cell(position).is_some_and(Cell::is_vacant)
    }

    /// Places a marker.
    ///
    /// Returns `false` without touching the grid when the position is off the
    /// grid or already occupied.
    #[instrument(skip(self))]
    pub fn place(&mut self, position: Position, marker: Marker) -> bool {
        if !self.is_occupiable(position) {
            debug!(%position, "Cannot place marker");
            return false;
        }
        let Some(index) = position.to_index() else {
            return false;
        };
        self.cells[index].occupant = Some(marker);
        true
    }

    /// The three cells of row `row`, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not in `[0, 2]`; callers validate indices first.
    pub fn row(&self, row: usize) -> [&Cell; GRID_SIZE] {
        assert!(row < GRID_SIZE, "row {row} is off the grid");
        std::array::from_fn(|column| &self.cells[row * GRID_SIZE + column])
    }

    /// The three cells of column `column`, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if `column` is not in `[0, 2]`.
    pub fn column(&self, column: usize) -> [&Cell; GRID_SIZE] {
        assert!(column < GRID_SIZE, "column {column} is off the grid");
        std::array::from_fn(|row| &self.cells[row * GRID_SIZE + column])
    }

    /// One of the two diagonals.
    ///
    /// `0` selects (0,0)-(1,1)-(2,2); any other value selects the
    /// anti-diagonal (0,2)-(1,1)-(2,0).
    pub fn diagonal(&self, which: usize) -> [&Cell; GRID_SIZE] {
        std::array::from_fn(|row| {
            let column = if which == 0 { row } else { GRID_SIZE - 1 - row };
            &self.cells[row * GRID_SIZE + column]
        })
    }

    /// The three cells of a line.
    pub fn line(&self, line: Line) -> [&Cell; GRID_SIZE] {
        match line {
            Line::Row(row) => self.row(row),
            Line::Column(column) => self.column(column),
            Line::Diagonal => self.diagonal(0),
            Line::AntiDiagonal => self.diagonal(GRID_SIZE - 1),
        }
    }

    /// Cells with no marker, in row-major order.
    pub fn vacant_cells(&self) -> Vec<&Cell> {
        self.cells.iter().filter(|cell| cell.is_vacant()).collect()
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_vacant()).count()
    }

    /// Returns true when every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.occupied_count() == CELL_COUNT
    }

    /// Every line with its cells, in scan order.
    pub fn lines(&self) -> impl Iterator<Item = (Line, [&Cell; GRID_SIZE])> + '_ {
        Line::ALL.into_iter().map(move |line| (line, self.line(line)))
    }

    /// Clears every cell in place.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.occupant = None;
        }
        debug!("Grid cleared");
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
