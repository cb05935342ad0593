//! Win detection logic for tic-tac-toe.

use crate::grid::{Cell, Grid, Line};
use crate::marker::Marker;
use crate::position::GRID_SIZE;
use tracing::instrument;

/// Fewest placements after which any line can be complete.
///
/// With two contestants alternating, the first marker needs its third cell,
/// which is the fifth placement overall. Checking earlier is also correct,
/// it just never finds anything.
pub const WIN_CHECK_THRESHOLD: usize = 5;

/// Returns the marker filling every cell of the line.
///
/// A line with any vacant cell never matches, even if the occupied cells
/// agree.
pub fn line_marker(cells: &[&Cell; GRID_SIZE]) -> Option<Marker> {
    let first = cells[0].occupant()?;
    cells
        .iter()
        .all(|cell| cell.occupant() == Some(first))
        .then_some(first)
}

/// Scans rows, then columns, then both diagonals and returns the first
/// complete line.
#[instrument(skip(grid))]
pub fn winning_line(grid: &Grid) -> Option<(Line, Marker)> {
    grid.lines()
        .find_map(|(line, cells)| line_marker(&cells).map(|marker| (line, marker)))
}

/// Checks if a marker holds three in a line.
#[instrument(skip(grid))]
pub fn check_winner(grid: &Grid) -> Option<Marker> {
    winning_line(grid).map(|(_, marker)| marker)
}
