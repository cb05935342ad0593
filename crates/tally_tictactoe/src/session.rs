//! Session state machine: registration, repeated matches, statistics.
//!
//! A session fills the roster through the [`SetupUi`], then loops: ask to
//! start, play the match to resolution, record it, flush statistics, reset.
//! The same two contestants play every match of a session.

use crate::collaborators::{
    Enrolment, InputError, KnownPlayer, MatchEvent, MoveInput, RegistrationRequest, SetupUi,
    StatsSink,
};
use crate::contestant::{ContestantId, ContestantKind, Controller, RandomMover};
use crate::game::{CONTESTANTS_REQUIRED, Match, MatchError, Outcome};
use crate::marker::{Marker, MarkerError, MarkerRegistry};
use crate::registrar::{Registrar, SetupError};
use crate::roster::Roster;
use tracing::{debug, info, instrument, warn};

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// A collaborator reported a quit.
    Quit,
    /// The user declined another match.
    Declined,
}

/// Owns everything that lives for one program run.
#[derive(Debug)]
pub struct Session {
    markers: MarkerRegistry,
    registrar: Registrar,
    roster: Roster,
    game: Match,
    seed: Option<u64>,
    matches_played: u32,
}

impl Session {
    /// Creates a session over a marker pool.
    ///
    /// # Errors
    ///
    /// Returns [`MarkerError::DuplicateMarker`] if `markers` repeats a symbol.
    #[instrument]
    pub fn new(markers: &[Marker]) -> Result<Self, MarkerError> {
        let mut pool = MarkerRegistry::new();
        for marker in markers {
            pool.register(*marker)?;
        }
        Ok(Self {
            markers: pool,
            registrar: Registrar::new(),
            roster: Roster::new(),
            game: Match::new(),
            seed: None,
            matches_played: 0,
        })
    }

    /// Makes automated contestants reproducible.
    ///
    /// Each automated contestant gets `seed` offset by its sequence number.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The current match.
    pub fn game(&self) -> &Match {
        &self.game
    }

    /// The marker pool.
    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    /// Matches resolved so far.
    pub fn matches_played(&self) -> u32 {
        self.matches_played
    }

    /// Returns true once enough contestants are registered to play.
    pub fn is_ready(&self) -> bool {
        self.roster.len() >= CONTESTANTS_REQUIRED
    }

    /// Registers a contestant from a filled-in form.
    ///
    /// Returning players keep the record carried by the enrolment.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if the name or marker is rejected; nothing is
    /// registered in that case.
    #[instrument(skip(self), fields(name = %enrolment.name()))]
    pub fn enrol(&mut self, enrolment: &Enrolment) -> Result<ContestantId, SetupError> {
        let controller = match enrolment.kind() {
            ContestantKind::Human => Controller::Human,
            ContestantKind::Automated => {
                let mover = match self.seed {
                    Some(seed) => RandomMover::seeded(
                        seed.wrapping_add(u64::from(self.registrar.next_sequence())),
                    ),
                    None => RandomMover::new(),
                };
                Controller::Automated(mover)
            }
        };

        let mut contestant = self.registrar.enrol(
            enrolment.name(),
            *enrolment.marker(),
            controller,
            &mut self.markers,
        )?;
        contestant.restore_record(*enrolment.record());
        Ok(self.roster.register(contestant))
    }

    /// Runs registration and matches until the user quits or declines.
    ///
    /// # Errors
    ///
    /// Only contract violations surface as errors. Quits, declined matches
    /// and statistics failures are ordinary outcomes.
    #[instrument(skip_all)]
    pub fn run<U, S>(&mut self, ui: &mut U, stats: &mut S) -> Result<SessionEnd, MatchError>
    where
        U: SetupUi + MoveInput,
        S: StatsSink,
    {
        info!("Session started");
        if let Some(end) = self.fill_roster(ui, stats)? {
            return Ok(end);
        }

        loop {
            match ui.confirm_new_match() {
                Ok(true) => {}
                Ok(false) => {
                    info!(matches = self.matches_played, "New match declined");
                    return Ok(SessionEnd::Declined);
                }
                Err(InputError::Quit) => return Ok(SessionEnd::Quit),
                Err(e) => {
                    debug!(error = %e, "Confirmation failed, asking again");
                    continue;
                }
            }

            let Some(outcome) = self.play_match(ui)? else {
                self.game.reset();
                return Ok(SessionEnd::Quit);
            };

            self.game.conclude(&mut self.roster)?;
            self.matches_played += 1;

            if let Err(e) = stats.flush(self.roster.contestants()) {
                warn!(error = %e, "Statistics not saved");
                ui.notify(&MatchEvent::StatsNotSaved(e.to_string()));
            }
            let stored = Self::stored_players(stats);
            ui.notify(&MatchEvent::Standings {
                contestants: self.roster.contestants(),
                stored: &stored,
            });

            info!(?outcome, matches = self.matches_played, "Match recorded");
            self.game.reset();
        }
    }

    /// Requests registrations until the roster is full.
    ///
    /// Returns `Some(SessionEnd::Quit)` if the user quit during setup.
    fn fill_roster<U, S>(
        &mut self,
        ui: &mut U,
        stats: &mut S,
    ) -> Result<Option<SessionEnd>, MatchError>
    where
        U: SetupUi,
        S: StatsSink,
    {
        while !self.is_ready() {
            let available = self.markers.available_markers().map_err(|e| {
                warn!(error = %e, "Marker pool exhausted before the roster filled");
                MatchError::ContestantsRequired(self.roster.len())
            })?;
            if available.is_empty() {
                warn!("Marker pool is empty");
                return Err(MatchError::ContestantsRequired(self.roster.len()));
            }

            let stored = Self::stored_players(stats);
            let known_players = stored
                .iter()
                .filter(|player| !self.registrar.is_taken(player.name()))
                .cloned()
                .collect();
            let request = RegistrationRequest::new(
                self.registrar.next_sequence(),
                available,
                known_players,
            );

            let enrolment = match ui.request_registration(&request) {
                Ok(enrolment) => Self::resume_stored(enrolment, &stored),
                Err(InputError::Quit) => return Ok(Some(SessionEnd::Quit)),
                Err(e) => {
                    debug!(error = %e, "Registration input failed, asking again");
                    continue;
                }
            };

            match self.enrol(&enrolment) {
                Ok(id) => {
                    if let Some(contestant) = self.roster.get(id) {
                        ui.notify(&MatchEvent::ContestantJoined(contestant));
                    }
                }
                Err(e) => ui.notify(&MatchEvent::RegistrationRejected(&e)),
            }
        }
        Ok(None)
    }

    /// Plays one match to resolution, reporting every step.
    ///
    /// Returns `None` if the user quit mid-match.
    fn play_match<U>(&mut self, ui: &mut U) -> Result<Option<Outcome>, MatchError>
    where
        U: SetupUi + MoveInput,
    {
        self.game.start(&self.roster)?;

        let outcome = loop {
            if let Some(contestant) = self.roster.peek_next() {
                ui.notify(&MatchEvent::TurnStarted {
                    contestant,
                    grid: self.game.grid(),
                });
            }

            let report = match self.game.play_turn(&mut self.roster, &mut *ui) {
                Ok(report) => report,
                Err(MatchError::Quit) => return Ok(None),
                Err(e) => return Err(e),
            };

            if let Some(contestant) = self.roster.get(report.contestant) {
                ui.notify(&MatchEvent::MoveApplied {
                    contestant,
                    mv: report.mv,
                });
            }

            if let Some(outcome) = report.outcome {
                break outcome;
            }
        };

        match outcome {
            Outcome::Win { winner, line, .. } => {
                if let Some(winner) = self.roster.get(winner) {
                    ui.notify(&MatchEvent::MatchWon {
                        winner,
                        line,
                        grid: self.game.grid(),
                    });
                }
            }
            Outcome::Draw => ui.notify(&MatchEvent::MatchDrawn {
                grid: self.game.grid(),
            }),
        }
        Ok(Some(outcome))
    }

    /// A human whose name is already on file continues the stored record,
    /// so a flush never overwrites history with a fresh one.
    fn resume_stored(enrolment: Enrolment, stored: &[KnownPlayer]) -> Enrolment {
        if *enrolment.kind() != ContestantKind::Human {
            return enrolment;
        }
        let name = enrolment.name().trim().to_lowercase();
        match stored.iter().find(|p| p.name().to_lowercase() == name) {
            Some(player) => {
                info!(
                    name = %player.name(),
                    record = %player.record(),
                    "Name on file, resuming stored record"
                );
                Enrolment::returning(player, *enrolment.marker())
            }
            None => enrolment,
        }
    }

    /// Stored records, or none if the store cannot be read.
    fn stored_players<S: StatsSink>(stats: &mut S) -> Vec<KnownPlayer> {
        stats.known_players().unwrap_or_else(|e| {
            warn!(error = %e, "Stored statistics unavailable");
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Contestant, Grid, Move, Position, Record};

    #[derive(Default)]
    struct MemoryStats {
        flushes: usize,
    }

    impl StatsSink for MemoryStats {
        type Error = String;

        fn known_players(&mut self) -> Result<Vec<KnownPlayer>, String> {
            Ok(vec![KnownPlayer::new("Ann".to_string(), Record::new(4, 1, 0))])
        }

        fn flush(&mut self, _contestants: &[Contestant]) -> Result<(), String> {
            self.flushes += 1;
            Err("disk full".to_string())
        }
    }

    /// Registers two automated players, plays one match, then declines.
    #[derive(Default)]
    struct Autopilot {
        confirmations: usize,
        unsaved: usize,
        offered_known: Vec<usize>,
    }

    impl SetupUi for Autopilot {
        fn request_registration(
            &mut self,
            request: &RegistrationRequest,
        ) -> Result<Enrolment, InputError> {
            self.offered_known.push(request.known_players().len());
            let name = format!("Bot{}", request.sequence());
            Ok(Enrolment::new(
                name,
                ContestantKind::Automated,
                request.available()[0],
            ))
        }

        fn confirm_new_match(&mut self) -> Result<bool, InputError> {
            self.confirmations += 1;
            Ok(self.confirmations == 1)
        }

        fn notify(&mut self, event: &MatchEvent<'_>) {
            if let MatchEvent::StatsNotSaved(_) = event {
                self.unsaved += 1;
            }
        }
    }

    impl MoveInput for Autopilot {
        fn prompt_for_move(&mut self, _: &Contestant, _: &Grid) -> Result<Move, InputError> {
            Err(InputError::Quit)
        }
    }

    #[test]
    fn test_flush_failure_is_not_fatal() {
        let mut session = Session::new(&[Marker::X, Marker::O]).unwrap().with_seed(3);
        let mut ui = Autopilot::default();
        let mut stats = MemoryStats::default();

        let end = session.run(&mut ui, &mut stats).unwrap();

        assert_eq!(end, SessionEnd::Declined);
        assert_eq!(session.matches_played(), 1);
        assert_eq!(stats.flushes, 1);
        assert_eq!(ui.unsaved, 1);
        assert_eq!(ui.offered_known, [1, 1]);
        let total: u32 = session
            .roster()
            .contestants()
            .iter()
            .map(|c| c.record().total())
            .sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_returning_player_keeps_record() {
        let mut session = Session::new(&[Marker::X, Marker::O]).unwrap();
        let ann = KnownPlayer::new("Ann".to_string(), Record::new(4, 1, 0));
        let id = session.enrol(&Enrolment::returning(&ann, Marker::O)).unwrap();

        let contestant = session.roster().get(id).unwrap();
        assert!(contestant.is_human());
        assert_eq!(*contestant.record(), Record::new(4, 1, 0));
        assert!(!session.markers().is_available(Marker::O));
    }

    #[test]
    fn test_new_human_with_stored_name_resumes_record() {
        struct Enrol(Option<Enrolment>);
        impl SetupUi for Enrol {
            fn request_registration(
                &mut self,
                _: &RegistrationRequest,
            ) -> Result<Enrolment, InputError> {
                self.0.take().ok_or(InputError::Quit)
            }
            fn confirm_new_match(&mut self) -> Result<bool, InputError> {
                Ok(false)
            }
            fn notify(&mut self, _: &MatchEvent<'_>) {}
        }
        impl MoveInput for Enrol {
            fn prompt_for_move(&mut self, _: &Contestant, _: &Grid) -> Result<Move, InputError> {
                Err(InputError::Quit)
            }
        }

        let mut session = Session::new(&[Marker::X, Marker::O]).unwrap();
        let mut ui = Enrol(Some(Enrolment::new(
            " ANN ",
            ContestantKind::Human,
            Marker::X,
        )));
        let end = session.run(&mut ui, &mut MemoryStats::default()).unwrap();
        assert_eq!(end, SessionEnd::Quit);

        let contestants = session.roster().contestants();
        assert_eq!(contestants.len(), 1);
        assert_eq!(contestants[0].name(), "Ann");
        assert_eq!(contestants[0].marker(), Marker::X);
        assert_eq!(*contestants[0].record(), Record::new(4, 1, 0));
    }

    #[test]
    fn test_automated_name_on_file_starts_fresh() {
        let stored = [KnownPlayer::new("HAL".to_string(), Record::new(9, 0, 0))];
        let enrolment = Enrolment::new("hal", ContestantKind::Automated, Marker::O);
        assert_eq!(Session::resume_stored(enrolment.clone(), &stored), enrolment);
    }

    #[test]
    fn test_duplicate_marker_pool_rejected() {
        assert_eq!(
            Session::new(&[Marker::X, Marker::X]).unwrap_err(),
            MarkerError::DuplicateMarker(Marker::X)
        );
    }

    #[test]
    fn test_known_players_exclude_registered_names() {
        let mut session = Session::new(&[Marker::X, Marker::O]).unwrap();
        session
            .enrol(&Enrolment::new("ann", ContestantKind::Human, Marker::X))
            .unwrap();

        struct Recorder(Vec<usize>);
        impl SetupUi for Recorder {
            fn request_registration(
                &mut self,
                request: &RegistrationRequest,
            ) -> Result<Enrolment, InputError> {
                self.0.push(request.known_players().len());
                Err(InputError::Quit)
            }
            fn confirm_new_match(&mut self) -> Result<bool, InputError> {
                Ok(false)
            }
            fn notify(&mut self, _: &MatchEvent<'_>) {}
        }
        impl MoveInput for Recorder {
            fn prompt_for_move(&mut self, _: &Contestant, _: &Grid) -> Result<Move, InputError> {
                Ok(Move::new(Position::new(0, 0), Marker::X))
            }
        }

        let mut recorder = Recorder(Vec::new());
        let end = session.run(&mut recorder, &mut MemoryStats::default()).unwrap();
        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(recorder.0, [0]);
    }
}
