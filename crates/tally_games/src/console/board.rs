//! Text rendering of the grid and standings, and move parsing.

use tally_tictactoe::{GRID_SIZE, Grid, KnownPlayer, Position};

/// Renders the grid with row labels down the side and column labels on top.
///
/// ```text
///       0   1   2
///     +---+---+---+
///   0 | X |   | O |
///     +---+---+---+
/// ```
pub fn render_board(grid: &Grid) -> String {
    let separator = format!("    +{}", "---+".repeat(GRID_SIZE));
    let mut out = String::from("     ");
    for column in 0..GRID_SIZE {
        out.push_str(&format!(" {column}  "));
    }
    out.truncate(out.trim_end().len());
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');

    for row in 0..GRID_SIZE {
        out.push_str(&format!("  {row} |"));
        for cell in grid.row(row) {
            let symbol = cell.occupant().map_or(' ', |marker| marker.symbol());
            out.push_str(&format!(" {symbol} |"));
        }
        out.push('\n');
        out.push_str(&separator);
        out.push('\n');
    }
    out
}

/// One `name...record` line per stored player.
pub fn render_standings(players: &[KnownPlayer]) -> Vec<String> {
    players
        .iter()
        .map(|player| format!("{}...{}", player.name(), player.record()))
        .collect()
}

/// Parses a typed move: two digits, row then column, written `xy` or `x,y`.
///
/// Off-grid digits parse; the caller decides whether the position is usable.
pub fn parse_position(input: &str) -> Option<Position> {
    let chars: Vec<char> = input.trim().chars().collect();
    let (row, column) = match chars.as_slice() {
        &[row, column] => (row, column),
        &[row, ',', column] => (row, column),
        _ => return None,
    };
    let row = row.to_digit(10)?;
    let column = column.to_digit(10)?;
    Some(Position::new(row as usize, column as usize))
}
