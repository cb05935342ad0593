//! First-class move type.
//!
//! A move is a contestant's intent, not a side effect: it can be checked
//! against the grid before anything changes.

use crate::marker::Marker;
use crate::position::Position;
use serde::{Deserialize, Serialize};

/// A marker aimed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    position: Position,
    marker: Marker,
}

impl Move {
    /// Target position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Marker to place.
    pub fn marker(&self) -> Marker {
        self.marker
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.marker, self.position)
    }
}
