//! Game configuration loaded from `tally.toml`.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tally_tictactoe::Marker;
use tracing::{debug, info, instrument};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "tally.toml";

/// Runtime settings for the console game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Flat file holding `name;wins;losses;drawn;` records.
    #[serde(default = "default_stats_file")]
    stats_file: PathBuf,

    /// The two marker symbols.
    #[serde(default = "default_markers")]
    markers: Vec<char>,

    /// Word that quits from any prompt, compared case-insensitively.
    #[serde(default = "default_quit_keyword")]
    quit_keyword: String,

    /// Style console output with colours.
    #[serde(default = "default_color")]
    color: bool,

    /// Where tracing output goes.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Human contestant name used by `quick`.
    #[serde(default = "default_quick_human_name")]
    quick_human_name: String,

    /// System contestant name used by `quick`.
    #[serde(default = "default_quick_system_name")]
    quick_system_name: String,
}

fn default_stats_file() -> PathBuf {
    PathBuf::from("playerData.txt")
}

fn default_markers() -> Vec<char> {
    vec![Marker::X.symbol(), Marker::O.symbol()]
}

fn default_quit_keyword() -> String {
    "quit".to_string()
}

fn default_color() -> bool {
    true
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tally.log")
}

fn default_quick_human_name() -> String {
    "Player".to_string()
}

fn default_quick_system_name() -> String {
    "HAL".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            stats_file: default_stats_file(),
            markers: default_markers(),
            quit_keyword: default_quit_keyword(),
            color: default_color(),
            log_file: default_log_file(),
            quick_human_name: default_quick_human_name(),
            quick_system_name: default_quick_system_name(),
        }
    }
}

impl GameConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or if
    /// the values are invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(stats_file = %config.stats_file.display(), "Config loaded");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on syntax errors or invalid values.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given; otherwise [`DEFAULT_CONFIG_FILE`] if it
    /// exists, falling back to defaults.
    ///
    /// # Errors
    ///
    /// An explicit path that cannot be loaded is an error. A missing default
    /// file is not.
    #[instrument(skip(path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// The marker pool as typed markers.
    pub fn marker_pool(&self) -> Vec<Marker> {
        self.markers.iter().copied().map(Marker::new).collect()
    }

    /// Overrides the statistics file.
    pub fn with_stats_file(mut self, stats_file: PathBuf) -> Self {
        self.stats_file = stats_file;
        self
    }

    /// Overrides colour output.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.markers.as_slice() {
            [a, b] if a != b && !a.is_whitespace() && !b.is_whitespace() => {}
            _ => {
                return Err(ConfigError::new(format!(
                    "markers must be exactly two distinct visible symbols, got {:?}",
                    self.markers
                )));
            }
        }
        if self.quit_keyword.trim().is_empty() {
            return Err(ConfigError::new("quit_keyword must not be blank".to_string()));
        }
        for (field, name) in [
            ("quick_human_name", &self.quick_human_name),
            ("quick_system_name", &self.quick_system_name),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::new(format!("{} must not be blank", field)));
            }
        }
        if self.quick_human_name.trim().eq_ignore_ascii_case(self.quick_system_name.trim()) {
            return Err(ConfigError::new(
                "quick_human_name and quick_system_name must differ".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
