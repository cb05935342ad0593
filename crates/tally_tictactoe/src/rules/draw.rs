//! Draw detection logic for tic-tac-toe.

use super::win::check_winner;
use crate::grid::Grid;
use tracing::instrument;

/// Checks if the grid is full (all cells occupied).
#[instrument(skip(grid))]
pub fn is_full(grid: &Grid) -> bool {
    grid.is_full()
}

/// A full grid with no complete line.
#[instrument(skip(grid))]
pub fn is_draw(grid: &Grid) -> bool {
    is_full(grid) && check_winner(grid).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Marker, Position};

    fn grid_from(rows: [&str; 3]) -> Grid {
        let mut grid = Grid::new();
        for (row, symbols) in rows.iter().enumerate() {
            for (column, symbol) in symbols.chars().enumerate() {
                if symbol != '.' {
                    grid.place(Position::new(row, column), Marker::new(symbol));
                }
            }
        }
        grid
    }

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Grid::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        assert!(!is_full(&grid_from(["X..", ".O.", "..."])));
    }

    #[test]
    fn test_draw_detection() {
        let grid = grid_from(["XOX", "OXX", "OXO"]);
        assert!(is_full(&grid));
        assert!(is_draw(&grid));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let grid = grid_from(["XXX", "OOX", "XOO"]);
        assert!(is_full(&grid));
        assert!(!is_draw(&grid));
    }
}
