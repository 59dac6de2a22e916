use crate::normalize::normalize_player_name;
use crate::teams::TeamResolver;
use crate::types::{PlayerKey, RegistryError, RosterEntry, RosterFile};
use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{info, warn};

/// Roster Registry - the closed set of rostered players
///
/// Entries are keyed by canonical player name and grouped by the legacy
/// label of the owning team, so snapshot rows and roster rows meet on the
/// same keys regardless of spelling or naming scheme.
#[derive(Debug, Clone, Default)]
pub struct RosterRegistry {
    /// Map from canonical key to roster entry
    entries_by_key: BTreeMap<PlayerKey, RosterEntry>,

    /// Map from legacy owner label to the keys it rosters
    keys_by_owner: BTreeMap<String, BTreeSet<PlayerKey>>,
}

impl RosterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from roster rows, resolving owners to legacy labels
    pub fn from_entries<I>(entries: I, resolver: &TeamResolver) -> Self
    where
        I: IntoIterator<Item = RosterEntry>,
    {
        let mut registry = Self::new();
        for entry in entries {
            registry.insert(entry, resolver);
        }
        registry
    }

    /// Load a roster export and build the registry from it
    pub async fn load_from_file<P: AsRef<Path>>(file_path: P, resolver: &TeamResolver) -> Result<Self> {
        let path = file_path.as_ref();
        info!("Loading roster from: {:?}", path);

        let json_content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read roster {path:?}"))?;
        let roster: RosterFile = serde_json::from_str(&json_content)
            .with_context(|| format!("Failed to parse roster {path:?}"))?;

        info!("Loaded {} roster rows for season {}", roster.players.len(), roster.season);

        let registry = Self::from_entries(roster.players, resolver);
        info!("Registered {} players across {} owners", registry.len(), registry.owner_count());
        Ok(registry)
    }

    fn insert(&mut self, mut entry: RosterEntry, resolver: &TeamResolver) {
        let key = normalize_player_name(&entry.name);
        if key.is_empty() {
            warn!("Skipping roster row with unusable name: {:?}", entry.name);
            return;
        }

        entry.owner = resolver.to_legacy(&entry.owner);

        if let Some(previous) = self.entries_by_key.remove(&key) {
            warn!(
                "Roster key '{}' appears twice ('{}' for {}, '{}' for {}), keeping the later row",
                key, previous.name, previous.owner, entry.name, entry.owner
            );
            if let Some(keys) = self.keys_by_owner.get_mut(&previous.owner) {
                keys.remove(&key);
                if keys.is_empty() {
                    self.keys_by_owner.remove(&previous.owner);
                }
            }
        }

        self.keys_by_owner.entry(entry.owner.clone()).or_default().insert(key.clone());
        self.entries_by_key.insert(key, entry);
    }

    /// Get a roster entry by canonical key
    pub fn get(&self, key: &str) -> Option<&RosterEntry> {
        self.entries_by_key.get(key)
    }

    /// Get a roster entry by any spelling of the player's name
    pub fn get_by_name(&self, name: &str) -> Result<&RosterEntry, RegistryError> {
        self.get(&normalize_player_name(name))
            .ok_or_else(|| RegistryError::PlayerNotFound(name.to_string()))
    }

    /// Legacy owner label of a rostered player
    pub fn owner_of(&self, key: &str) -> Option<&str> {
        self.get(key).map(|entry| entry.owner.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries_by_key.contains_key(key)
    }

    /// Canonical keys rostered by a legacy owner label
    pub fn players_for(&self, owner: &str) -> Result<impl Iterator<Item = &PlayerKey>, RegistryError> {
        self.keys_by_owner
            .get(owner)
            .map(|keys| keys.iter())
            .ok_or_else(|| RegistryError::OwnerNotFound(owner.to_string()))
    }

    /// Legacy owner labels with at least one rostered player, sorted
    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.keys_by_owner.keys().map(String::as_str)
    }

    pub fn owner_count(&self) -> usize {
        self.keys_by_owner.len()
    }

    /// All entries with their keys, sorted by key
    pub fn entries(&self) -> impl Iterator<Item = (&PlayerKey, &RosterEntry)> {
        self.entries_by_key.iter()
    }

    pub fn len(&self) -> usize {
        self.entries_by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries_by_key.is_empty()
    }

    /// Search for players by partial name match
    pub fn search(&self, query: &str) -> Vec<&RosterEntry> {
        let query = normalize_player_name(query);
        self.entries_by_key
            .iter()
            .filter(|(key, _)| key.contains(&query))
            .map(|(_, entry)| entry)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::TeamNamePair;

    fn create_test_resolver() -> TeamResolver {
        TeamResolver::from_pairs(vec![TeamNamePair::new("Acme", "The Eagles")])
    }

    fn create_test_entries() -> Vec<RosterEntry> {
        vec![
            RosterEntry::new("Jon Smith Jr.", "Acme", "G"),
            RosterEntry::new("Marcus Hill", "The Eagles", "F"),
            RosterEntry::new("Ray Cole", "Bob", "G-F"),
            RosterEntry::new("  ..  ", "Bob", "C"),
        ]
    }

    #[test]
    fn test_registry_creation() {
        let registry = RosterRegistry::from_entries(create_test_entries(), &create_test_resolver());

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.owner_count(), 2);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_owner_resolved_to_legacy_label() {
        let registry = RosterRegistry::from_entries(create_test_entries(), &create_test_resolver());

        assert_eq!(registry.owner_of("marcus hill"), Some("Acme"));
        let acme: Vec<_> = registry.players_for("Acme").unwrap().cloned().collect();
        assert_eq!(acme, vec!["jon smith".to_string(), "marcus hill".to_string()]);
        assert_eq!(registry.owners().collect::<Vec<_>>(), vec!["Acme", "Bob"]);
    }

    #[test]
    fn test_lookup_by_any_spelling() {
        let registry = RosterRegistry::from_entries(create_test_entries(), &create_test_resolver());

        let jon = registry.get_by_name("JON SMITH").unwrap();
        assert_eq!(jon.name, "Jon Smith Jr.");
        assert_eq!(
            registry.get_by_name("Nobody").unwrap_err(),
            RegistryError::PlayerNotFound("Nobody".to_string())
        );
        assert!(registry.players_for("Carl").is_err());
    }

    #[test]
    fn test_duplicate_key_keeps_later_row() {
        let entries = vec![
            RosterEntry::new("Jon Smith", "Acme", "G"),
            RosterEntry::new("Jon Smith Jr.", "Bob", "F"),
        ];
        let registry = RosterRegistry::from_entries(entries, &create_test_resolver());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.owner_of("jon smith"), Some("Bob"));
        assert_eq!(registry.owners().collect::<Vec<_>>(), vec!["Bob"]);
    }

    #[test]
    fn test_search_players() {
        let registry = RosterRegistry::from_entries(create_test_entries(), &create_test_resolver());

        let results = registry.search("hill");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Marcus Hill");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rosters.json");
        let roster = RosterFile::new("2025-26", create_test_entries());
        std::fs::write(&path, serde_json::to_string_pretty(&roster).unwrap()).unwrap();

        let registry = RosterRegistry::load_from_file(&path, &create_test_resolver()).await.unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("ray cole").unwrap().position, "G-F");
    }
}
