//! Turn scheduling and statistics bookkeeping.

use crate::contestant::{Contestant, ContestantId};
use crate::marker::Marker;
use derive_more::Display;
use tracing::{debug, info, instrument, warn};

/// Errors raised by the roster.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RosterError {
    /// No contestants are registered.
    #[display("Players list is empty")]
    EmptyRoster,
}

impl std::error::Error for RosterError {}

/// Ordered contestants plus a round-robin cursor.
///
/// The cursor survives across matches: a new match continues the cycle
/// where the previous one stopped.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    contestants: Vec<Contestant>,
    cursor: Option<usize>,
}

impl Roster {
    /// Creates an empty roster.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a contestant in registration order.
    #[instrument(skip(self, contestant), fields(contestant = %contestant.name()))]
    pub fn register(&mut self, contestant: Contestant) -> ContestantId {
        let id = contestant.id();
        self.contestants.push(contestant);
        info!(%id, size = self.contestants.len(), "Contestant added to roster");
        id
    }

    /// Number of registered contestants.
    pub fn len(&self) -> usize {
        self.contestants.len()
    }

    /// Returns true if nobody is registered.
    pub fn is_empty(&self) -> bool {
        self.contestants.is_empty()
    }

    /// Contestants in registration order.
    pub fn contestants(&self) -> &[Contestant] {
        &self.contestants
    }

    /// Looks a contestant up by id.
    pub fn get(&self, id: ContestantId) -> Option<&Contestant> {
        self.contestants.iter().find(|c| c.id() == id)
    }

    /// The contestant holding a marker.
    pub fn owner_of_marker(&self, marker: Marker) -> Option<&Contestant> {
        self.contestants.iter().find(|c| c.marker() == marker)
    }

    /// Whose turn comes next, without advancing the cursor.
    pub fn peek_next(&self) -> Option<&Contestant> {
        self.contestants.get(self.next_index())
    }

    /// Advances the cursor and returns whose turn it is.
    ///
    /// Cycles in registration order and wraps to the first contestant after
    /// the last.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::EmptyRoster`] if nobody is registered.
    #[instrument(skip(self))]
    pub fn next_contestant(&mut self) -> Result<&mut Contestant, RosterError> {
        if self.contestants.is_empty() {
            warn!("Turn requested from an empty roster");
            return Err(RosterError::EmptyRoster);
        }

        let next = self.next_index();
        self.cursor = Some(next);

        let contestant = &mut self.contestants[next];
        debug!(index = next, contestant = %contestant.name(), "Next contestant");
        Ok(contestant)
    }

    fn next_index(&self) -> usize {
        match self.cursor {
            Some(index) if index + 1 < self.contestants.len() => index + 1,
            _ => 0,
        }
    }

    /// Credits a win to `winner` and a loss to everyone else.
    #[instrument(skip(self))]
    pub fn record_win(&mut self, winner: ContestantId) {
        for contestant in &mut self.contestants {
            if contestant.id() == winner {
                contestant.record_mut().add_win();
            } else {
                contestant.record_mut().add_loss();
            }
        }
        info!(%winner, "Win recorded");
    }

    /// Credits a draw to every contestant.
    #[instrument(skip(self))]
    pub fn record_draw(&mut self) {
        for contestant in &mut self.contestants {
            contestant.record_mut().add_draw();
        }
        info!("Draw recorded");
    }
}
