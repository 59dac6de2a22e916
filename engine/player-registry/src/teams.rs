use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info, warn};

/// Owner label for players nobody drafted; never mapped to a team name
pub const UNDRAFTED: &str = "Undrafted";

/// One row of the team-name table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamNamePair {
    /// Legacy owner label used by older snapshots
    pub owner: String,

    /// Current display team name
    pub team_name: String,
}

impl TeamNamePair {
    pub fn new(owner: impl Into<String>, team_name: impl Into<String>) -> Self {
        Self { owner: owner.into(), team_name: team_name.into() }
    }
}

/// Bidirectional legacy-owner / display-team-name mapping
///
/// Snapshots written before and after the league renamed its teams both
/// resolve to the same legacy label through [`TeamResolver::to_legacy`].
/// Lookups are trimmed and case-insensitive; unmapped labels pass through.
#[derive(Debug, Clone, Default)]
pub struct TeamResolver {
    /// Legacy label -> display name, table spelling
    display_by_legacy: BTreeMap<String, String>,

    /// Folded legacy label -> legacy label
    legacy_by_folded_legacy: HashMap<String, String>,

    /// Folded display name -> legacy label
    legacy_by_folded_display: HashMap<String, String>,
}

fn fold(label: &str) -> String {
    label.trim().to_lowercase()
}

fn is_undrafted(label: &str) -> bool {
    fold(label) == fold(UNDRAFTED)
}

impl TeamResolver {
    /// Build the resolver from (legacy label, display name) rows
    ///
    /// Rows with a blank field or involving the undrafted sentinel are dropped.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = TeamNamePair>,
    {
        let mut resolver = Self::default();

        for pair in pairs {
            let owner = pair.owner.trim();
            let team_name = pair.team_name.trim();

            if owner.is_empty() || team_name.is_empty() {
                debug!("Dropping incomplete team-name row: {:?}", pair);
                continue;
            }
            if is_undrafted(owner) || is_undrafted(team_name) {
                debug!("Dropping team-name row touching the {} sentinel: {:?}", UNDRAFTED, pair);
                continue;
            }

            if let Some(previous) =
                resolver.legacy_by_folded_display.insert(fold(team_name), owner.to_string())
            {
                if previous != owner {
                    warn!(
                        "Team name '{}' claimed by both '{}' and '{}', keeping '{}'",
                        team_name, previous, owner, owner
                    );
                    resolver.display_by_legacy.remove(&previous);
                    resolver.legacy_by_folded_legacy.remove(&fold(&previous));
                }
            }

            resolver.legacy_by_folded_legacy.insert(fold(owner), owner.to_string());
            resolver.display_by_legacy.insert(owner.to_string(), team_name.to_string());
        }

        resolver
    }

    /// Load the team-name table from a JSON array of `{owner, team_name}` rows
    pub async fn load_from_file<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let path = file_path.as_ref();
        info!("Loading team names from: {:?}", path);

        let json_content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read team-name table {path:?}"))?;
        let pairs: Vec<TeamNamePair> = serde_json::from_str(&json_content)
            .with_context(|| format!("Failed to parse team-name table {path:?}"))?;

        let resolver = Self::from_pairs(pairs);
        info!("Loaded {} team-name mappings", resolver.len());
        Ok(resolver)
    }

    /// Display name for a legacy label, or the label itself when unmapped
    pub fn to_display(&self, legacy_label: &str) -> String {
        let trimmed = legacy_label.trim();
        if is_undrafted(trimmed) {
            return trimmed.to_string();
        }

        self.legacy_by_folded_legacy
            .get(&fold(trimmed))
            .and_then(|legacy| self.display_by_legacy.get(legacy))
            .cloned()
            .unwrap_or_else(|| trimmed.to_string())
    }

    /// Legacy label for either naming scheme, or the label itself when unmapped
    pub fn to_legacy(&self, label: &str) -> String {
        let trimmed = label.trim();
        if is_undrafted(trimmed) {
            return trimmed.to_string();
        }

        let folded = fold(trimmed);
        self.legacy_by_folded_display
            .get(&folded)
            .or_else(|| self.legacy_by_folded_legacy.get(&folded))
            .cloned()
            .unwrap_or_else(|| trimmed.to_string())
    }

    /// All mapped (legacy label, display name) pairs, ordered by legacy label
    pub fn teams(&self) -> impl Iterator<Item = (&str, &str)> {
        self.display_by_legacy.iter().map(|(legacy, display)| (legacy.as_str(), display.as_str()))
    }

    pub fn len(&self) -> usize {
        self.display_by_legacy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.display_by_legacy.is_empty()
    }
}
