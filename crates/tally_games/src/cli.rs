//! Command-line interface for tally.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tally - console tic-tac-toe with persistent statistics
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Console tic-tac-toe with win/loss/draw statistics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./tally.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the statistics file
    #[arg(long, global = true)]
    pub stats_file: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register contestants and play at the console
    Play,

    /// Preset human versus system contestant, first match starts at once
    Quick,

    /// Two system contestants play unattended; nothing is saved
    Simulate {
        /// Number of matches to play
        #[arg(short, long, default_value = "100")]
        matches: u32,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the stored statistics and exit
    Stats,
}
