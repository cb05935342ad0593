//! Markers and the pool that hands them out.
//!
//! A contestant owns its [`Marker`] by value. The registry keeps the reverse
//! relation as a plain [`ContestantId`] lookup, so ownership never forms a
//! cycle.

use crate::contestant::ContestantId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// The symbol a contestant places on the grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct Marker(char);

impl Marker {
    /// The conventional first marker.
    pub const X: Marker = Marker('X');
    /// The conventional second marker.
    pub const O: Marker = Marker('O');

    /// Creates a marker with the given symbol.
    pub const fn new(symbol: char) -> Self {
        Self(symbol)
    }

    /// Returns the marker's symbol.
    pub fn symbol(self) -> char {
        self.0
    }
}

/// Errors raised by the marker pool.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MarkerError {
    /// Every marker in a non-empty pool is owned.
    #[display("There are no available markers")]
    NoAvailableMarkers,

    /// The marker is already owned by another contestant.
    #[display("Marker '{}' belongs to another contestant", _0)]
    MarkerAlreadyOwned(Marker),

    /// The marker was never registered in the pool.
    #[display("Marker '{}' is not part of this game", _0)]
    UnknownMarker(Marker),

    /// A marker with the same symbol is already in the pool.
    #[display("Marker '{}' is already registered", _0)]
    DuplicateMarker(Marker),
}

impl std::error::Error for MarkerError {}

#[derive(Debug, Clone, Copy)]
struct MarkerSlot {
    marker: Marker,
    owner: Option<ContestantId>,
}

/// Pool of markers with exclusive ownership.
#[derive(Debug, Clone, Default)]
pub struct MarkerRegistry {
    slots: Vec<MarkerSlot>,
}

impl MarkerRegistry {
    /// Creates an empty pool.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a marker to the pool.
    ///
    /// # Errors
    ///
    /// Returns [`MarkerError::DuplicateMarker`] if the symbol is already pooled.
    #[instrument(skip(self))]
    pub fn register(&mut self, marker: Marker) -> Result<(), MarkerError> {
        if self.slot(marker).is_some() {
            warn!(%marker, "Marker registered twice");
            return Err(MarkerError::DuplicateMarker(marker));
        }
        self.slots.push(MarkerSlot {
            marker,
            owner: None,
        });
        debug!(%marker, pool_size = self.slots.len(), "Marker registered");
        Ok(())
    }

    /// All pooled markers in registration order.
    pub fn markers(&self) -> Vec<Marker> {
        self.slots.iter().map(|slot| slot.marker).collect()
    }

    /// Markers with no current owner, in registration order.
    ///
    /// An empty pool yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`MarkerError::NoAvailableMarkers`] when the pool is non-empty
    /// but every marker is owned.
    #[instrument(skip(self))]
    pub fn available_markers(&self) -> Result<Vec<Marker>, MarkerError> {
        let available: Vec<Marker> = self
            .slots
            .iter()
            .filter(|slot| slot.owner.is_none())
            .map(|slot| slot.marker)
            .collect();

        if available.is_empty() && !self.slots.is_empty() {
            debug!("All markers are owned");
            return Err(MarkerError::NoAvailableMarkers);
        }
        Ok(available)
    }

    /// Returns true if the marker is pooled and unowned.
    pub fn is_available(&self, marker: Marker) -> bool {
        self.slot(marker).is_some_and(|slot| slot.owner.is_none())
    }

    /// Returns the owner of a marker, if any.
    pub fn owner_of(&self, marker: Marker) -> Option<ContestantId> {
        self.slot(marker).and_then(|slot| slot.owner)
    }

    /// Assigns a marker to a contestant.
    ///
    /// # Errors
    ///
    /// Returns [`MarkerError::MarkerAlreadyOwned`] if the marker has an owner
    /// (the current owner keeps it), or [`MarkerError::UnknownMarker`] if the
    /// marker is not in the pool.
    #[instrument(skip(self))]
    pub fn assign(&mut self, marker: Marker, owner: ContestantId) -> Result<(), MarkerError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.marker == marker)
            .ok_or(MarkerError::UnknownMarker(marker))?;

        if let Some(current) = slot.owner {
            warn!(%marker, %current, requested_by = %owner, "Marker already owned");
            return Err(MarkerError::MarkerAlreadyOwned(marker));
        }

        slot.owner = Some(owner);
        debug!(%marker, %owner, "Marker assigned");
        Ok(())
    }

    /// Releases a marker so another contestant may claim it.
    ///
    /// Returns the previous owner.
    #[instrument(skip(self))]
    pub fn release(&mut self, marker: Marker) -> Option<ContestantId> {
        let slot = self.slots.iter_mut().find(|slot| slot.marker == marker)?;
        let previous = slot.owner.take();
        debug!(%marker, ?previous, "Marker released");
        previous
    }

    fn slot(&self, marker: Marker) -> Option<&MarkerSlot> {
        self.slots.iter().find(|slot| slot.marker == marker)
    }
}
