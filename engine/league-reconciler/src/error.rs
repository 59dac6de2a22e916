//! Error types for the league reconciler

use lineup_optimizer::RulesError;
use thiserror::Error;

/// Result type alias for reconciler operations
pub type Result<T> = std::result::Result<T, ReconcileError>;

/// Errors that abort a reconciliation run
///
/// Malformed data values never end up here; they are absorbed at the
/// ingestion boundary or skipped during the fold. Only missing structure
/// (no roster, no team-name table) and bad configuration are fatal.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// No roster table was supplied
    #[error("No roster supplied; cannot determine team membership")]
    MissingRoster,

    /// A roster table was supplied but holds no usable players
    #[error("Roster contains no players")]
    EmptyRoster,

    /// No team-name table was supplied while one is required
    #[error("No team-name table supplied")]
    MissingTeamNames,

    /// Lineup rules rejected
    #[error("Invalid lineup rules: {0}")]
    Rules(#[from] RulesError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl ReconcileError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error comes from missing structural input
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingRoster | Self::EmptyRoster | Self::MissingTeamNames)
    }
}
