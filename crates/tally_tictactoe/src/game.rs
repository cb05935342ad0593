//! Match controller: the turn cycle and terminal-state detection.
//!
//! A match moves through `AwaitingContestants -> InProgress -> Resolved`.
//! Each call to [`Match::play_turn`] runs one full turn: pick the next
//! contestant, obtain a legal move (retrying as needed), apply it and check
//! for a win or a draw.

use crate::action::Move;
use crate::collaborators::{InputError, MoveInput};
use crate::contestant::{ContestantId, MoveError};
use crate::grid::{Grid, Line};
use crate::marker::Marker;
use crate::position::CELL_COUNT;
use crate::roster::{Roster, RosterError};
use crate::rules::{WIN_CHECK_THRESHOLD, winning_line};
use derive_more::Display;
use tracing::{debug, info, instrument, warn};

/// Contestants needed to start a match.
pub const CONTESTANTS_REQUIRED: usize = 2;

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Three in a line.
    Win {
        /// The owner of the winning marker.
        winner: ContestantId,
        /// The winning marker.
        marker: Marker,
        /// The completed line.
        line: Line,
    },
    /// Full grid, no line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<ContestantId> {
        match self {
            Outcome::Win { winner, .. } => Some(*winner),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the match was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

/// Match lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Waiting for exactly two contestants.
    AwaitingContestants,
    /// Turns are being played.
    InProgress,
    /// Terminal: a win or a draw.
    Resolved(Outcome),
}

/// Errors that stop a turn from completing.
///
/// Bad input from a human is not among them: it is retried inside the turn.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MatchError {
    /// `start` was called without exactly two contestants.
    #[display("A match needs {} contestants, found {}", CONTESTANTS_REQUIRED, _0)]
    ContestantsRequired(usize),

    /// The operation needs a match in progress.
    #[display("No match is in progress")]
    NotInProgress,

    /// The operation needs a resolved match.
    #[display("The match has not been resolved")]
    NotResolved,

    /// Scheduling failed.
    #[display("{}", _0)]
    Roster(RosterError),

    /// An automated contestant was asked to move on a full grid.
    #[display("An automated contestant had no vacant cell to choose")]
    NoVacantCell,

    /// A winning marker has no registered owner.
    #[display("Marker '{}' has no owner", _0)]
    UnownedMarker(Marker),

    /// The user quit.
    #[display("Quit requested")]
    Quit,
}

impl std::error::Error for MatchError {}

impl From<RosterError> for MatchError {
    fn from(err: RosterError) -> Self {
        Self::Roster(err)
    }
}

/// What happened during one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    /// Who moved.
    pub contestant: ContestantId,
    /// The applied move.
    pub mv: Move,
    /// Set when this move ended the match.
    pub outcome: Option<Outcome>,
}

/// One playthrough on a grid that is reused between matches.
#[derive(Debug, Clone)]
pub struct Match {
    grid: Grid,
    move_count: usize,
    phase: MatchPhase,
}

impl Match {
    /// Creates a match waiting for contestants.
    #[instrument]
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            move_count: 0,
            phase: MatchPhase::AwaitingContestants,
        }
    }

    /// The grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Moves applied so far in this match.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Current phase.
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Moves to `InProgress` on a cleared grid.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::ContestantsRequired`] unless exactly two
    /// contestants are registered; the phase is left unchanged.
    #[instrument(skip(self, roster), fields(contestants = roster.len()))]
    pub fn start(&mut self, roster: &Roster) -> Result<(), MatchError> {
        if roster.len() != CONTESTANTS_REQUIRED {
            debug!("Not enough contestants to start");
            return Err(MatchError::ContestantsRequired(roster.len()));
        }
        self.grid.reset();
        self.move_count = 0;
        self.phase = MatchPhase::InProgress;
        info!("Match started");
        Ok(())
    }

    /// Plays one turn.
    ///
    /// Moves are requested from the next contestant until one targets an
    /// occupiable cell with that contestant's marker. Rejected input from a
    /// human is retried without limit; a quit ends the turn with
    /// [`MatchError::Quit`].
    ///
    /// # Errors
    ///
    /// [`MatchError::NotInProgress`] outside a match, [`MatchError::Quit`]
    /// when the user leaves, and contract violations
    /// ([`MatchError::NoVacantCell`], [`MatchError::UnownedMarker`]).
    #[instrument(skip(self, roster, input), fields(move_count = self.move_count))]
    pub fn play_turn(
        &mut self,
        roster: &mut Roster,
        input: &mut dyn MoveInput,
    ) -> Result<TurnReport, MatchError> {
        if self.phase != MatchPhase::InProgress {
            return Err(MatchError::NotInProgress);
        }

        let contestant = roster.next_contestant()?;
        let id = contestant.id();

        let mv = loop {
            match contestant.produce_move(&self.grid, input) {
                Ok(mv) if mv.marker() != contestant.marker() => {
                    warn!(%mv, "Move carries another contestant's marker, asking again");
                }
                Ok(mv) if !self.grid.is_occupiable(mv.position()) => {
                    debug!(%mv, "Target cell not occupiable, asking again");
                }
                Ok(mv) => break mv,
                Err(MoveError::Input(InputError::Quit)) => {
                    info!(contestant = %contestant.name(), "Quit during move");
                    return Err(MatchError::Quit);
                }
                Err(MoveError::Input(e)) => {
                    debug!(error = %e, "Move input failed, asking again");
                }
                Err(MoveError::NoVacantCell) => return Err(MatchError::NoVacantCell),
            }
        };

        self.grid.place(mv.position(), mv.marker());
        self.move_count += 1;
        debug!(%mv, move_count = self.move_count, "Move applied");

        let outcome = self.evaluate(roster)?;
        if let Some(outcome) = outcome {
            info!(?outcome, moves = self.move_count, "Match resolved");
            self.phase = MatchPhase::Resolved(outcome);
        }

        Ok(TurnReport {
            contestant: id,
            mv,
            outcome,
        })
    }

    /// Checks for a terminal state.
    ///
    /// The line scan only runs from the fifth move on; see
    /// [`WIN_CHECK_THRESHOLD`]. A draw needs all nine cells filled with no
    /// line found.
    #[instrument(skip(self, roster))]
    pub fn evaluate(&self, roster: &Roster) -> Result<Option<Outcome>, MatchError> {
        let found = if self.move_count >= WIN_CHECK_THRESHOLD {
            winning_line(&self.grid)
        } else {
            None
        };

        if let Some((line, marker)) = found {
            let winner = roster
                .owner_of_marker(marker)
                .ok_or(MatchError::UnownedMarker(marker))?;
            return Ok(Some(Outcome::Win {
                winner: winner.id(),
                marker,
                line,
            }));
        }

        if self.move_count == CELL_COUNT {
            return Ok(Some(Outcome::Draw));
        }

        Ok(None)
    }

    /// Records a resolved match in the roster and returns its outcome.
    ///
    /// The grid is left as it ended so it can still be shown; call
    /// [`Match::reset`] before the next match.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotResolved`] if the match has not ended.
    #[instrument(skip(self, roster))]
    pub fn conclude(&mut self, roster: &mut Roster) -> Result<Outcome, MatchError> {
        let MatchPhase::Resolved(outcome) = self.phase else {
            return Err(MatchError::NotResolved);
        };
        match outcome {
            Outcome::Win { winner, .. } => roster.record_win(winner),
            Outcome::Draw => roster.record_draw(),
        }
        Ok(outcome)
    }

    /// Clears the grid and counter and waits for the next start.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.grid.reset();
        self.move_count = 0;
        self.phase = MatchPhase::AwaitingContestants;
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Contestant, Controller, Grid, MarkerRegistry, Position, RandomMover, Record, Registrar,
    };
    use std::collections::VecDeque;

    /// Replays a fixed list of typed moves; quits when it runs out.
    struct Script {
        moves: VecDeque<(usize, usize)>,
        prompts: usize,
    }

    impl Script {
        fn new(moves: &[(usize, usize)]) -> Self {
            Self {
                moves: moves.iter().copied().collect(),
                prompts: 0,
            }
        }
    }

    impl MoveInput for Script {
        fn prompt_for_move(
            &mut self,
            contestant: &Contestant,
            _grid: &Grid,
        ) -> Result<Move, InputError> {
            self.prompts += 1;
            let (row, column) = self.moves.pop_front().ok_or(InputError::Quit)?;
            Ok(Move::new(Position::new(row, column), contestant.marker()))
        }
    }

    fn two_humans() -> Roster {
        let mut markers = MarkerRegistry::new();
        markers.register(Marker::X).unwrap();
        markers.register(Marker::O).unwrap();
        let mut registrar = Registrar::new();
        let mut roster = Roster::new();
        for (name, marker) in [("Ann", Marker::X), ("Bob", Marker::O)] {
            let c = registrar
                .enrol(name, marker, Controller::Human, &mut markers)
                .unwrap();
            roster.register(c);
        }
        roster
    }

    fn play_out(game: &mut Match, roster: &mut Roster, script: &mut Script) -> Vec<TurnReport> {
        let mut reports = Vec::new();
        loop {
            let report = game.play_turn(roster, script).unwrap();
            reports.push(report);
            if report.outcome.is_some() {
                return reports;
            }
        }
    }

    #[test]
    fn test_start_requires_two_contestants() {
        let mut game = Match::new();
        assert_eq!(
            game.start(&Roster::new()),
            Err(MatchError::ContestantsRequired(0))
        );
        assert_eq!(game.phase(), MatchPhase::AwaitingContestants);
    }

    #[test]
    fn test_turn_outside_match_rejected() {
        let mut game = Match::new();
        let mut roster = two_humans();
        let mut script = Script::new(&[(0, 0)]);
        assert_eq!(
            game.play_turn(&mut roster, &mut script),
            Err(MatchError::NotInProgress)
        );
    }

    #[test]
    fn test_occupied_and_off_grid_targets_are_retried() {
        let mut game = Match::new();
        let mut roster = two_humans();
        game.start(&roster).unwrap();
        let mut script = Script::new(&[(1, 1), (1, 1), (5, 5), (0, 0)]);

        let first = game.play_turn(&mut roster, &mut script).unwrap();
        let second = game.play_turn(&mut roster, &mut script).unwrap();

        assert_eq!(first.mv.position(), Position::new(1, 1));
        assert_eq!(second.mv.position(), Position::new(0, 0));
        assert_eq!(second.mv.marker(), Marker::O);
        assert_eq!(script.prompts, 4);
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn test_quit_propagates() {
        let mut game = Match::new();
        let mut roster = two_humans();
        game.start(&roster).unwrap();
        let mut script = Script::new(&[]);
        assert_eq!(
            game.play_turn(&mut roster, &mut script),
            Err(MatchError::Quit)
        );
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn test_win_on_fifth_move_then_conclude() {
        let mut game = Match::new();
        let mut roster = two_humans();
        game.start(&roster).unwrap();
        let mut script = Script::new(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);

        let reports = play_out(&mut game, &mut roster, &mut script);
        assert_eq!(reports.len(), 5);
        let ann = roster.contestants()[0].id();
        assert_eq!(
            reports[4].outcome,
            Some(Outcome::Win {
                winner: ann,
                marker: Marker::X,
                line: Line::Row(0),
            })
        );

        assert!(game.play_turn(&mut roster, &mut script).is_err());
        game.conclude(&mut roster).unwrap();
        assert_eq!(*roster.contestants()[0].record(), Record::new(1, 0, 0));
        assert_eq!(*roster.contestants()[1].record(), Record::new(0, 1, 0));
    }

    #[test]
    fn test_full_grid_without_line_is_draw() {
        let mut game = Match::new();
        let mut roster = two_humans();
        game.start(&roster).unwrap();
        // X O X / X O O / O X X
        let mut script = Script::new(&[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (1, 2),
            (2, 1),
            (2, 0),
            (2, 2),
        ]);

        let reports = play_out(&mut game, &mut roster, &mut script);
        assert_eq!(reports.len(), 9);
        assert!(reports[..8].iter().all(|r| r.outcome.is_none()));
        assert_eq!(reports[8].outcome, Some(Outcome::Draw));
    }

    #[test]
    fn test_reset_clears_grid_and_counter() {
        let mut game = Match::new();
        let mut roster = two_humans();
        game.start(&roster).unwrap();
        let mut script = Script::new(&[(2, 2)]);
        game.play_turn(&mut roster, &mut script).unwrap();

        game.reset();
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.grid(), &Grid::new());
        assert_eq!(game.phase(), MatchPhase::AwaitingContestants);
    }

    #[test]
    fn test_automated_contestants_always_finish() {
        let mut markers = MarkerRegistry::new();
        markers.register(Marker::X).unwrap();
        markers.register(Marker::O).unwrap();
        let mut registrar = Registrar::new();
        let mut roster = Roster::new();
        for (seed, name, marker) in [(11, "HAL", Marker::X), (12, "Deep", Marker::O)] {
            let controller = Controller::Automated(RandomMover::seeded(seed));
            let contestant = registrar
                .enrol(name, marker, controller, &mut markers)
                .unwrap();
            roster.register(contestant);
        }

        let mut game = Match::new();
        let mut script = Script::new(&[]);
        for _ in 0..50 {
            game.start(&roster).unwrap();
            let reports = play_out(&mut game, &mut roster, &mut script);
            assert!(reports.len() >= WIN_CHECK_THRESHOLD && reports.len() <= CELL_COUNT);
            game.conclude(&mut roster).unwrap();
            game.reset();
        }
        assert_eq!(script.prompts, 0);
        let total: u32 = roster.contestants().iter().map(|c| c.record().total()).sum();
        assert_eq!(total, 100);
    }
}
