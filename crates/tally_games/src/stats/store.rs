//! Statistics file repository.

use crate::stats::{StoreError, StoredLine, parse_line};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tally_tictactoe::{Contestant, KnownPlayer, StatsSink};
use tracing::{debug, info, instrument};

/// Repository over the flat statistics file.
///
/// Every flush reads the whole file, updates or appends records, and
/// rewrites it. A missing file holds no records.
#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    /// Creates a store for the file at `path`. Nothing is touched yet.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every line of the file.
    ///
    /// Bytes that are not valid UTF-8 are decoded lossily, so such lines
    /// come back malformed instead of failing the whole file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be opened. A
    /// flush then refuses to rewrite a file it could not read.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Vec<StoredLine>, StoreError> {
        let content = match std::fs::read(&self.path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Statistics file absent, no records");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StoreError::new(format!(
                    "Failed to read '{}': {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let lines: Vec<StoredLine> = content.lines().map(parse_line).collect();
        debug!(lines = lines.len(), "Statistics file loaded");
        Ok(lines)
    }

    /// Well-formed records in file order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read.
    #[instrument(skip(self))]
    pub fn players(&self) -> Result<Vec<KnownPlayer>, StoreError> {
        Ok(self
            .load()?
            .iter()
            .filter_map(StoredLine::player)
            .cloned()
            .collect())
    }

    /// Looks one record up by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read.
    #[instrument(skip(self))]
    pub fn find(&self, name: &str) -> Result<Option<KnownPlayer>, StoreError> {
        Ok(self
            .load()?
            .iter()
            .find(|line| line.is_for(name))
            .and_then(StoredLine::player)
            .cloned())
    }

    /// Writes the records of every human contestant.
    ///
    /// Existing records are updated in place by case-insensitive name,
    /// unknown humans are appended, automated contestants are skipped and
    /// malformed lines are written back unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read or written.
    #[instrument(
        skip(self, contestants),
        fields(path = %self.path.display(), contestants = contestants.len())
    )]
    pub fn save(&self, contestants: &[Contestant]) -> Result<(), StoreError> {
        let mut lines = self.load()?;
        let mut updated = 0usize;
        let mut appended = 0usize;

        for contestant in contestants.iter().filter(|c| c.is_human()) {
            let record = StoredLine::Record(KnownPlayer::new(
                contestant.name().to_string(),
                *contestant.record(),
            ));
            match lines.iter_mut().find(|line| line.is_for(contestant.name())) {
                Some(line) => {
                    *line = record;
                    updated += 1;
                }
                None => {
                    lines.push(record);
                    appended += 1;
                }
            }
        }

        let mut content = String::new();
        for line in &lines {
            content.push_str(&line.to_line());
            content.push('\n');
        }
        std::fs::write(&self.path, content).map_err(|e| {
            StoreError::new(format!(
                "Unable to open/create '{}', stats not saved: {}",
                self.path.display(),
                e
            ))
        })?;

        info!(updated, appended, total = lines.len(), "Statistics saved");
        Ok(())
    }
}

impl StatsSink for StatsStore {
    type Error = StoreError;

    fn known_players(&mut self) -> Result<Vec<KnownPlayer>, StoreError> {
        self.players()
    }

    fn flush(&mut self, contestants: &[Contestant]) -> Result<(), StoreError> {
        self.save(contestants)
    }
}

/// Sink that keeps nothing, for runs whose results are not persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl StatsSink for Discard {
    type Error = std::convert::Infallible;

    fn known_players(&mut self) -> Result<Vec<KnownPlayer>, Self::Error> {
        Ok(Vec::new())
    }

    fn flush(&mut self, _contestants: &[Contestant]) -> Result<(), Self::Error> {
        Ok(())
    }
}
