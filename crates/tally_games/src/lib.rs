//! Tally - console tic-tac-toe with persistent statistics.
//!
//! This crate wires the match logic from `tally_tictactoe` to the outside
//! world.
//!
//! # Architecture
//!
//! - **Config**: `tally.toml` settings with defaults for every field
//! - **Stats**: the flat `name;wins;losses;drawn;` statistics file
//! - **Console**: prompts, menus and board rendering over any reader/writer
//! - **Autopilot**: unattended matches between automated contestants
//! - **Commands**: what each CLI subcommand runs
//!
//! # Example
//!
//! ```no_run
//! use tally_games::{GameConfig, commands};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = GameConfig::load(None)?;
//! let stdin = std::io::stdin().lock();
//! let (end, _) = commands::play(&config, stdin, std::io::stdout(), false)?;
//! println!("{end:?}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod autopilot;
pub mod cli;
pub mod commands;
mod config;
pub mod console;
pub mod stats;

pub use autopilot::{Autopilot, SimulationReport, simulate};
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, GameConfig};
pub use stats::{Discard, StatsStore, StoreError};
