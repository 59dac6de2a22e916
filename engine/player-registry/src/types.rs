use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical player key, the output of [`crate::normalize_player_name`]
pub type PlayerKey = String;

/// A rostered player as drafted into the league
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Player name as written on the roster (e.g., "Jon Smith Jr.")
    pub name: String,

    /// Owning team, legacy owner label or current team name
    pub owner: String,

    /// Position label (e.g., "G", "F", "G-F", "C")
    #[serde(default)]
    pub position: String,

    #[serde(default)]
    pub draft_order: Option<u32>,

    #[serde(default)]
    pub cost: Option<u32>,

    /// School abbreviation (e.g., "UK", "BAMA")
    #[serde(default)]
    pub team: String,

    #[serde(default)]
    pub height: String,

    #[serde(default)]
    pub weight: String,

    #[serde(default)]
    pub class: String,
}

impl RosterEntry {
    /// Create a roster entry with only the fields lineup solving needs
    pub fn new(name: impl Into<String>, owner: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            position: position.into(),
            draft_order: None,
            cost: None,
            team: String::new(),
            height: String::new(),
            weight: String::new(),
            class: String::new(),
        }
    }
}

/// Container for a league roster export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterFile {
    /// Season label (e.g., "2025-26")
    pub season: String,

    /// When the roster was last exported
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,

    pub players: Vec<RosterEntry>,
}

impl RosterFile {
    pub fn new(season: impl Into<String>, players: Vec<RosterEntry>) -> Self {
        Self { season: season.into(), last_updated: Some(Utc::now()), players }
    }
}

/// Errors that can occur during roster lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Player not on any roster
    PlayerNotFound(String),

    /// Owner has no rostered players
    OwnerNotFound(String),

    /// Roster table was supplied but contained no usable rows
    EmptyRoster,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::PlayerNotFound(name) => {
                write!(f, "Player '{name}' not found in roster")
            }
            RegistryError::OwnerNotFound(owner) => {
                write!(f, "Owner '{owner}' has no rostered players")
            }
            RegistryError::EmptyRoster => {
                write!(f, "Roster contains no players")
            }
        }
    }
}

impl std::error::Error for RegistryError {}
