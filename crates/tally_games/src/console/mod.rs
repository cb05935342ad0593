//! Line-oriented console front end.
//!
//! Reads from any [`std::io::BufRead`] and writes to any [`std::io::Write`],
//! so sessions can be scripted in tests.

mod board;
mod prompt;
mod ui;

pub use board::{parse_position, render_board, render_standings};
pub use prompt::{Prompter, Tone};
pub use ui::ConsoleUi;
