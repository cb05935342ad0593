//! Contestants: human or automated participants taking turns.

use crate::action::Move;
use crate::collaborators::{InputError, MoveInput};
use crate::grid::Grid;
use crate::marker::Marker;
use crate::position::Position;
use derive_getters::Getters;
use derive_more::Display;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use tracing::{debug, instrument};

/// Sequence-assigned contestant identifier, starting at 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[display("#{}", _0)]
pub struct ContestantId(u32);

impl ContestantId {
    /// Wraps a raw sequence number.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The raw sequence number.
    pub fn value(self) -> u32 {
        self.0
    }
}

/// Cumulative win/loss/draw statistics.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Getters, derive_new::new, Serialize, Deserialize,
)]
pub struct Record {
    wins: u32,
    losses: u32,
    draws: u32,
}

impl Record {
    /// Total matches recorded.
    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    pub(crate) fn add_win(&mut self) {
        self.wins += 1;
    }

    pub(crate) fn add_loss(&mut self) {
        self.losses += 1;
    }

    pub(crate) fn add_draw(&mut self) {
        self.draws += 1;
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Wins, {} Losses, {} Drawn",
            self.wins, self.losses, self.draws
        )
    }
}

/// Which kind of contestant to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum ContestantKind {
    /// Moves are typed by a person.
    #[display("Human Player")]
    Human,
    /// Moves are chosen at random among vacant cells.
    #[display("System Player")]
    Automated,
}

/// Uniform-random move policy.
#[derive(Debug, Clone)]
pub struct RandomMover {
    rng: SmallRng,
}

impl RandomMover {
    /// Creates a policy seeded from the thread-local generator.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    /// Creates a reproducible policy.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Picks a vacant position uniformly at random.
    ///
    /// Returns `None` only when the grid is full.
    pub fn choose(&mut self, grid: &Grid) -> Option<Position> {
        grid.vacant_cells()
            .choose(&mut self.rng)
            .map(|cell| cell.position())
    }
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

/// How a contestant produces moves, fixed at registration.
#[derive(Debug, Clone)]
pub enum Controller {
    /// Delegates to the [`MoveInput`] collaborator, which re-prompts until it
    /// has a legal move (unbounded retries).
    Human,
    /// Self-generates moves; never retries.
    Automated(RandomMover),
}

impl Controller {
    /// The kind this controller implements.
    pub fn kind(&self) -> ContestantKind {
        match self {
            Controller::Human => ContestantKind::Human,
            Controller::Automated(_) => ContestantKind::Automated,
        }
    }
}

/// Error while obtaining a move from a contestant.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MoveError {
    /// The move-input collaborator failed or the user quit.
    #[display("{}", _0)]
    Input(InputError),

    /// An automated contestant was asked to move on a full grid.
    #[display("No vacant cell left to choose from")]
    NoVacantCell,
}

impl std::error::Error for MoveError {}

impl From<InputError> for MoveError {
    fn from(err: InputError) -> Self {
        Self::Input(err)
    }
}

/// A registered participant.
///
/// Contestants are built by [`crate::Registrar::enrol`], which enforces name
/// uniqueness and marker exclusivity.
#[derive(Debug, Clone)]
pub struct Contestant {
    id: ContestantId,
    name: String,
    marker: Marker,
    record: Record,
    controller: Controller,
}

impl Contestant {
    pub(crate) fn new(
        id: ContestantId,
        name: String,
        marker: Marker,
        controller: Controller,
    ) -> Self {
        Self {
            id,
            name,
            marker,
            record: Record::default(),
            controller,
        }
    }

    /// Sequence-assigned identifier.
    pub fn id(&self) -> ContestantId {
        self.id
    }

    /// Unique display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The marker this contestant owns.
    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Cumulative statistics.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Human or automated.
    pub fn kind(&self) -> ContestantKind {
        self.controller.kind()
    }

    /// Returns true for human contestants.
    pub fn is_human(&self) -> bool {
        self.kind() == ContestantKind::Human
    }

    /// Replaces the statistics, e.g. with a returning player's stored record.
    #[instrument(skip(self), fields(contestant = %self.name))]
    pub fn restore_record(&mut self, record: Record) {
        self.record = record;
    }

    pub(crate) fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }

    /// Produces this contestant's next move.
    ///
    /// Humans delegate to `input`. Automated contestants ignore `input` and
    /// pick a vacant cell; calling them on a full grid is a contract
    /// violation reported as [`MoveError::NoVacantCell`].
    #[instrument(skip(self, grid, input), fields(contestant = %self.name, kind = ?self.kind()))]
    pub fn produce_move(
        &mut self,
        grid: &Grid,
        input: &mut dyn MoveInput,
    ) -> Result<Move, MoveError> {
        match self.controller {
            Controller::Human => Ok(input.prompt_for_move(self, grid)?),
            Controller::Automated(ref mut mover) => {
                let position = mover.choose(grid).ok_or(MoveError::NoVacantCell)?;
                debug!(%position, "Automated contestant chose position");
                Ok(Move::new(position, self.marker))
            }
        }
    }
}

impl std::fmt::Display for Contestant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}...{}", self.marker, self.name, self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoInput;

    impl MoveInput for NoInput {
        fn prompt_for_move(
            &mut self,
            _contestant: &Contestant,
            _grid: &Grid,
        ) -> Result<Move, InputError> {
            Err(InputError::Quit)
        }
    }

    fn automated(seed: u64) -> Contestant {
        Contestant::new(
            ContestantId::new(1),
            "HAL".to_string(),
            Marker::O,
            Controller::Automated(RandomMover::seeded(seed)),
        )
    }

    #[test]
    fn test_automated_only_picks_vacant_cells() {
        let mut grid = Grid::new();
        let mut hal = automated(42);
        for _ in 0..9 {
            let mv = hal.produce_move(&grid, &mut NoInput).unwrap();
            assert_eq!(mv.marker(), Marker::O);
            assert!(grid.place(mv.position(), mv.marker()));
        }
        assert_eq!(
            hal.produce_move(&grid, &mut NoInput),
            Err(MoveError::NoVacantCell)
        );
    }

    #[test]
    fn test_automated_reaches_every_cell_eventually() {
        let grid = Grid::new();
        let mut hal = automated(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(hal.produce_move(&grid, &mut NoInput).unwrap().position());
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn test_human_delegates_to_input() {
        let mut human = Contestant::new(
            ContestantId::new(2),
            "Ann".to_string(),
            Marker::X,
            Controller::Human,
        );
        let result = human.produce_move(&Grid::new(), &mut NoInput);
        assert_eq!(result, Err(MoveError::Input(InputError::Quit)));
    }

    #[test]
    fn test_display_shows_marker_name_and_record() {
        let mut hal = automated(1);
        hal.restore_record(Record::new(2, 1, 3));
        assert_eq!(hal.to_string(), "O: HAL...2 Wins, 1 Losses, 3 Drawn");
    }
}
