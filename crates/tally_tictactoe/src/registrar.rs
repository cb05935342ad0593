//! Contestant registration.
//!
//! Name uniqueness and id sequencing are session state owned by a
//! [`Registrar`] value rather than anything global, so every session (and
//! every test) starts from a clean slate.

use crate::contestant::{Contestant, ContestantId, Controller};
use crate::marker::{Marker, MarkerError, MarkerRegistry};
use derive_more::Display;
use std::collections::HashSet;
use tracing::{info, instrument, warn};

/// Why a registration attempt failed. Never fatal: the prompt is repeated.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SetupError {
    /// The name is empty or whitespace.
    #[display("Player name is not valid")]
    InvalidName,

    /// Another contestant already uses the name.
    #[display("Player name '{}' already exists", _0)]
    DuplicateName(String),

    /// The requested marker cannot be claimed.
    #[display("{}", _0)]
    Marker(MarkerError),
}

impl std::error::Error for SetupError {}

impl From<MarkerError> for SetupError {
    fn from(err: MarkerError) -> Self {
        Self::Marker(err)
    }
}

/// Issues contestant ids and guards name uniqueness.
///
/// Names compare case-insensitively, matching how the statistics store
/// looks records up.
#[derive(Debug, Clone)]
pub struct Registrar {
    names: HashSet<String>,
    next_id: u32,
}

impl Registrar {
    /// Creates a registrar whose first id is `#1`.
    #[instrument]
    pub fn new() -> Self {
        Self {
            names: HashSet::new(),
            next_id: 1,
        }
    }

    /// The id the next successful enrolment will receive.
    pub fn next_sequence(&self) -> u32 {
        self.next_id
    }

    /// Returns true if the name has already been taken.
    pub fn is_taken(&self, name: &str) -> bool {
        self.names.contains(&Self::key(name))
    }

    /// Checks a candidate name without reserving it.
    ///
    /// # Errors
    ///
    /// [`SetupError::InvalidName`] for blank names and
    /// [`SetupError::DuplicateName`] for taken ones.
    #[instrument(skip(self))]
    pub fn validate_name(&self, name: &str) -> Result<(), SetupError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(SetupError::InvalidName);
        }
        if self.is_taken(trimmed) {
            return Err(SetupError::DuplicateName(trimmed.to_string()));
        }
        Ok(())
    }

    /// Builds a contestant: validates the name, claims the marker, assigns
    /// the next id.
    ///
    /// A failed enrolment reserves nothing and consumes no id.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] for invalid or duplicate names and for markers
    /// that are owned or unknown.
    #[instrument(skip(self, controller, markers), fields(kind = ?controller.kind()))]
    pub fn enrol(
        &mut self,
        name: &str,
        marker: Marker,
        controller: Controller,
        markers: &mut MarkerRegistry,
    ) -> Result<Contestant, SetupError> {
        self.validate_name(name).inspect_err(|e| {
            warn!(error = %e, "Registration rejected");
        })?;

        let id = ContestantId::new(self.next_id);
        markers.assign(marker, id)?;

        let name = name.trim().to_string();
        self.names.insert(Self::key(&name));
        self.next_id += 1;

        info!(%id, name = %name, %marker, "Contestant enrolled");
        Ok(Contestant::new(id, name, marker, controller))
    }

    fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }
}

impl Default for Registrar {
    fn default() -> Self {
        Self::new()
    }
}
