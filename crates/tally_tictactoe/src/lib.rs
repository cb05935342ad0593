//! Tally tic-tac-toe - pure match logic.
//!
//! This crate owns everything with real invariants in a game of
//! tic-tac-toe and nothing that touches a terminal or a file:
//!
//! - **Grid**: the 3x3 playing surface and its row/column/diagonal views
//! - **Markers**: the pool of symbols, each owned by at most one contestant
//! - **Contestants**: humans (driven by a [`MoveInput`] collaborator) and
//!   automated players picking uniformly among vacant cells
//! - **Roster**: round-robin turn scheduling and win/loss/draw bookkeeping
//! - **Match**: the turn cycle, win detection and draw detection
//! - **Session**: registration, repeated matches and statistics flushing
//!
//! Consoles and statistics stores plug in through the collaborator traits
//! [`MoveInput`], [`SetupUi`] and [`StatsSink`].
//!
//! # Example
//!
//! ```
//! use tally_tictactoe::{Grid, Marker, Position};
//!
//! let mut grid = Grid::new();
//! assert!(grid.place(Position::new(1, 1), Marker::X));
//! assert!(!grid.place(Position::new(1, 1), Marker::O));
//! assert!(!grid.place(Position::new(3, 0), Marker::O));
//! assert_eq!(grid.vacant_cells().len(), 8);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod collaborators;
mod contestant;
mod game;
mod grid;
mod marker;
mod position;
mod registrar;
mod roster;
mod rules;
mod session;

pub use action::Move;
pub use collaborators::{
    Enrolment, InputError, KnownPlayer, MatchEvent, MoveInput, RegistrationRequest, SetupUi,
    StatsSink,
};
pub use contestant::{
    Contestant, ContestantId, ContestantKind, Controller, MoveError, RandomMover, Record,
};
pub use game::{CONTESTANTS_REQUIRED, Match, MatchError, MatchPhase, Outcome, TurnReport};
pub use grid::{Cell, Grid, Line};
pub use marker::{Marker, MarkerError, MarkerRegistry};
pub use position::{CELL_COUNT, GRID_SIZE, Position};
pub use registrar::{Registrar, SetupError};
pub use roster::{Roster, RosterError};
pub use rules::{WIN_CHECK_THRESHOLD, check_winner, is_draw, is_full, line_marker, winning_line};
pub use session::{Session, SessionEnd};
