//! Display and logging settings loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_tictactoe::{DEFAULT_DRAW_LABEL, SortOrder, ViewOptions};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt::MakeWriter};

/// User settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct Settings {
    /// Status text for a drawn game (e.g. "You both lost").
    #[serde(default = "default_draw_label")]
    draw_label: String,

    /// Show the move list latest-first.
    #[serde(default)]
    descending: bool,

    /// Highlight the winning line.
    #[serde(default = "default_highlight_winner")]
    highlight_winner: bool,

    /// Log file used while the TUI owns the terminal.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Log filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

#[instrument]
fn default_draw_label() -> String {
    DEFAULT_DRAW_LABEL.to_string()
}

#[instrument]
fn default_highlight_winner() -> bool {
    true
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_tictactoe.log")
}

#[instrument]
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            draw_label: default_draw_label(),
            descending: false,
            highlight_winner: default_highlight_winner(),
            log_file: default_log_file(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Parses settings from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let settings = Self::from_toml(&content)?;
        info!(draw_label = %settings.draw_label, "Config loaded successfully");
        Ok(settings)
    }

    /// Loads `path` if given and present, defaults otherwise.
    ///
    /// A path that exists but can't be read or parsed is an error.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => {
                warn!(
                    "Config file not found at {}, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Like [`Settings::load`], with events sent to a scoped subscriber.
    ///
    /// The process-wide subscriber is built from the loaded settings, so it
    /// can't exist yet while they load.
    pub fn load_logged<W>(
        path: Option<&Path>,
        filter: EnvFilter,
        writer: W,
    ) -> Result<Self, ConfigError>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || Self::load(path))
    }

    /// Initial move list order.
    pub fn sort_order(&self) -> SortOrder {
        if self.descending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }

    /// Options for rendering the game view.
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            draw_label: self.draw_label.clone(),
            highlight_winner: self.highlight_winner,
        }
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
