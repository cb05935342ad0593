//! Narrow interfaces to the outside world.
//!
//! The match logic never reads a keyboard or writes a file. Consoles,
//! scripted test drivers and statistics stores implement these traits.

use crate::action::Move;
use crate::contestant::{Contestant, ContestantKind, Record};
use crate::grid::{Grid, Line};
use crate::marker::Marker;
use crate::registrar::SetupError;
use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Failure reported by an input collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InputError {
    /// The user asked to leave. Ends the whole session.
    #[display("Quit requested")]
    Quit,

    /// The collaborator could not produce an answer; the caller retries.
    #[display("Input rejected: {}", _0)]
    Rejected(String),
}

impl std::error::Error for InputError {}

/// Source of moves for human contestants.
pub trait MoveInput {
    /// Asks the contestant for a move on the given grid.
    ///
    /// Implementations re-prompt on malformed or occupied targets and must not
    /// return a move aimed at an off-grid or occupied cell. The match
    /// controller still discards such a move and asks again.
    fn prompt_for_move(&mut self, contestant: &Contestant, grid: &Grid)
    -> Result<Move, InputError>;
}

/// A stored statistics record for a previously seen human.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new, Serialize, Deserialize)]
pub struct KnownPlayer {
    name: String,
    record: Record,
}

/// Everything a registration prompt needs to offer.
#[derive(Debug, Clone, Getters)]
pub struct RegistrationRequest {
    /// Sequence number the next contestant will receive.
    sequence: u32,
    /// Markers nobody owns yet.
    available: Vec<Marker>,
    /// Stored humans not yet registered in this session.
    known_players: Vec<KnownPlayer>,
}

impl RegistrationRequest {
    pub(crate) fn new(
        sequence: u32,
        available: Vec<Marker>,
        known_players: Vec<KnownPlayer>,
    ) -> Self {
        Self {
            sequence,
            available,
            known_players,
        }
    }
}

/// A filled-in registration form.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Enrolment {
    name: String,
    kind: ContestantKind,
    marker: Marker,
    record: Record,
}

impl Enrolment {
    /// A brand-new contestant with an empty record.
    pub fn new(name: impl Into<String>, kind: ContestantKind, marker: Marker) -> Self {
        Self {
            name: name.into(),
            kind,
            marker,
            record: Record::default(),
        }
    }

    /// A returning human whose stored record carries over.
    pub fn returning(player: &KnownPlayer, marker: Marker) -> Self {
        Self {
            name: player.name().clone(),
            kind: ContestantKind::Human,
            marker,
            record: *player.record(),
        }
    }
}

/// Something worth showing to the people at the console.
#[derive(Debug, Clone)]
pub enum MatchEvent<'a> {
    /// A contestant was registered.
    ContestantJoined(&'a Contestant),
    /// A registration attempt failed and will be retried.
    RegistrationRejected(&'a SetupError),
    /// A contestant is about to be asked for a move.
    TurnStarted {
        /// Whose turn it is.
        contestant: &'a Contestant,
        /// The grid they will see.
        grid: &'a Grid,
    },
    /// A move landed on the grid.
    MoveApplied {
        /// Who moved.
        contestant: &'a Contestant,
        /// What they did.
        mv: Move,
    },
    /// The match ended with three in a line.
    MatchWon {
        /// The winner.
        winner: &'a Contestant,
        /// The completed line.
        line: Line,
        /// The final grid.
        grid: &'a Grid,
    },
    /// The grid filled up with no winner.
    MatchDrawn {
        /// The final grid.
        grid: &'a Grid,
    },
    /// Standings after a match was recorded.
    Standings {
        /// This session's contestants.
        contestants: &'a [Contestant],
        /// Every stored record, after the flush.
        stored: &'a [KnownPlayer],
    },
    /// Statistics could not be written; the result only lives in memory.
    StatsNotSaved(String),
}

/// Registration and match-flow prompts.
pub trait SetupUi {
    /// Asks for one more contestant.
    fn request_registration(
        &mut self,
        request: &RegistrationRequest,
    ) -> Result<Enrolment, InputError>;

    /// Asks whether to start another match with the same contestants.
    fn confirm_new_match(&mut self) -> Result<bool, InputError>;

    /// Shows an event.
    fn notify(&mut self, event: &MatchEvent<'_>);
}

/// Durable statistics.
pub trait StatsSink {
    /// Error type for store failures.
    type Error: std::fmt::Display;

    /// Records currently held by the store.
    fn known_players(&mut self) -> Result<Vec<KnownPlayer>, Self::Error>;

    /// Writes the current records of every human contestant.
    fn flush(&mut self, contestants: &[Contestant]) -> Result<(), Self::Error>;
}
