//! Unattended matches between two automated contestants.

use crate::config::GameConfig;
use crate::stats::Discard;
use anyhow::{Result, bail};
use derive_getters::Getters;
use tally_tictactoe::{
    Contestant, ContestantKind, Enrolment, Grid, InputError, MatchEvent, Move, MoveInput, Record,
    RegistrationRequest, Session, SetupUi,
};
use tracing::{info, instrument};

/// Confirms a fixed number of matches and keeps a tally of the results.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    remaining: u32,
    wins: u32,
    draws: u32,
}

impl Autopilot {
    /// Plays `matches` matches, then declines.
    pub fn new(matches: u32) -> Self {
        Self {
            remaining: matches,
            ..Self::default()
        }
    }
}

impl SetupUi for Autopilot {
    fn request_registration(&mut self, _: &RegistrationRequest) -> Result<Enrolment, InputError> {
        Err(InputError::Quit)
    }

    fn confirm_new_match(&mut self) -> Result<bool, InputError> {
        if self.remaining == 0 {
            return Ok(false);
        }
        self.remaining -= 1;
        Ok(true)
    }

    fn notify(&mut self, event: &MatchEvent<'_>) {
        match event {
            MatchEvent::MatchWon { .. } => self.wins += 1,
            MatchEvent::MatchDrawn { .. } => self.draws += 1,
            _ => {}
        }
    }
}

impl MoveInput for Autopilot {
    fn prompt_for_move(&mut self, _: &Contestant, _: &Grid) -> Result<Move, InputError> {
        Err(InputError::Quit)
    }
}

/// Results of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new)]
pub struct SimulationReport {
    matches: u32,
    wins: u32,
    draws: u32,
    records: Vec<(String, Record)>,
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} matches: {} won, {} drawn",
            self.matches, self.wins, self.draws
        )?;
        for (name, record) in &self.records {
            writeln!(f, "{}...{}", name, record)?;
        }
        Ok(())
    }
}

/// Plays `matches` matches between two automated contestants.
///
/// Automated contestants are never persisted, so nothing is written.
///
/// # Errors
///
/// Fails if the configured markers cannot form a session.
#[instrument(skip(config))]
pub fn simulate(config: &GameConfig, matches: u32, seed: Option<u64>) -> Result<SimulationReport> {
    let pool = config.marker_pool();
    let &[first, second] = pool.as_slice() else {
        bail!("exactly two markers are required, got {}", pool.len());
    };

    let mut session = Session::new(&pool)?;
    if let Some(seed) = seed {
        session = session.with_seed(seed);
    }
    let base = config.quick_system_name();
    for (n, marker) in [(1, first), (2, second)] {
        let name = format!("{base} {n}");
        session.enrol(&Enrolment::new(name, ContestantKind::Automated, marker))?;
    }

    let mut autopilot = Autopilot::new(matches);
    session.run(&mut autopilot, &mut Discard)?;

    let records = session
        .roster()
        .contestants()
        .iter()
        .map(|c| (c.name().to_string(), *c.record()))
        .collect();
    let report = SimulationReport::new(
        session.matches_played(),
        autopilot.wins,
        autopilot.draws,
        records,
    );
    info!(
        matches = report.matches,
        wins = report.wins,
        draws = report.draws,
        "Simulation finished"
    );
    Ok(report)
}
