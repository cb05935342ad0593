//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`crate::Grid`]. Rules are kept apart from grid
//! storage so the match controller decides when they run.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WIN_CHECK_THRESHOLD, check_winner, line_marker, winning_line};
