//! Entry points behind each subcommand.

use crate::config::GameConfig;
use crate::console::ConsoleUi;
use crate::stats::StatsStore;
use anyhow::{Result, bail};
use std::io::{BufRead, Write};
use tally_tictactoe::{ContestantKind, Enrolment, Session, SessionEnd};
use tracing::{info, instrument};

/// Runs an interactive session over the given streams.
///
/// With `quick`, the configured human and system contestants are registered
/// without prompts and the first match starts at once. A quick human whose
/// name is on file continues the stored record.
///
/// Returns how the session ended and the output stream.
///
/// # Errors
///
/// Fails on invalid marker configuration or a broken match contract.
/// Quitting is a normal end.
#[instrument(skip(config, input, output))]
pub fn play<R: BufRead, W: Write>(
    config: &GameConfig,
    input: R,
    output: W,
    quick: bool,
) -> Result<(SessionEnd, W)> {
    let pool = config.marker_pool();
    let &[first, second] = pool.as_slice() else {
        bail!("exactly two markers are required, got {}", pool.len());
    };

    let mut ui = ConsoleUi::new(
        input,
        output,
        config.quit_keyword().as_str(),
        *config.color(),
    );
    if quick {
        ui = ui.with_presets([
            Enrolment::new(
                config.quick_human_name().as_str(),
                ContestantKind::Human,
                first,
            ),
            Enrolment::new(
                config.quick_system_name().as_str(),
                ContestantKind::Automated,
                second,
            ),
        ]);
    }

    let mut session = Session::new(&pool)?;
    let mut store = StatsStore::new(config.stats_file());

    ui.banner();
    let end = session.run(&mut ui, &mut store)?;
    ui.goodbye();

    info!(?end, matches = session.matches_played(), "Session over");
    Ok((end, ui.into_output()))
}

/// Prints the stored records.
///
/// # Errors
///
/// Fails if the statistics file exists but cannot be read.
#[instrument(skip(config, output))]
pub fn stats<W: Write>(config: &GameConfig, output: W) -> Result<W> {
    let store = StatsStore::new(config.stats_file());
    let players = store.players()?;
    let mut ui = ConsoleUi::new(
        std::io::empty(),
        output,
        config.quit_keyword().as_str(),
        *config.color(),
    );
    ui.standings(&players);
    Ok(ui.into_output())
}
