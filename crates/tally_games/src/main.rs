//! Tally - console tic-tac-toe.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tally_games::cli::{Cli, Command};
use tally_games::{GameConfig, commands, simulate};
use tracing::info;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var_os("TALLY_CONFIG").map(PathBuf::from));
    let mut config = GameConfig::load(config_path.as_deref())?;
    if let Some(stats_file) = cli.stats_file.clone() {
        config = config.with_stats_file(stats_file);
    }
    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        config = config.with_color(false);
    }

    init_tracing(config.log_file())?;
    info!(command = ?cli.command, "Starting tally");

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_play(&config, false),
        Command::Quick => run_play(&config, true),
        Command::Simulate { matches, seed } => {
            let report = simulate(&config, matches, seed)?;
            print!("{report}");
            Ok(())
        }
        Command::Stats => {
            commands::stats(&config, std::io::stdout())?;
            Ok(())
        }
    }
}

/// Runs an interactive session on the terminal.
fn run_play(config: &GameConfig, quick: bool) -> Result<()> {
    let stdin = std::io::stdin().lock();
    let (end, _) = commands::play(config, stdin, std::io::stdout(), quick)?;
    info!(?end, "Exiting");
    Ok(())
}

/// Sends tracing output to the log file so the console stays clean.
fn init_tracing(log_file: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    Ok(())
}
