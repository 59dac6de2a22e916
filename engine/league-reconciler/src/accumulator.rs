//! Caller-owned fold state for one reconciliation run

use crate::series::PlayerPeriodSeries;
use period_snapshot::{PeriodId, RowFingerprint};
use player_registry::PlayerKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Why a row was left out of the fold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Player name normalizes to nothing
    EmptyPlayer,
    /// Period 0 or otherwise out of range
    InvalidPeriod,
    /// Period after the configured cap
    BeyondCap,
}

/// Result of folding a single row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldOutcome {
    Folded,
    /// Byte-for-byte repeat of a row already folded
    Duplicate,
    Skipped(SkipReason),
}

/// Counters for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldStats {
    pub rows_seen: u64,
    pub rows_folded: u64,
    pub duplicates: u64,
    pub skipped_empty_player: u64,
    pub skipped_invalid_period: u64,
    pub skipped_beyond_cap: u64,
    /// Rows the ingestion boundary refused before they reached the fold
    pub ingest_rejects: u64,
}

impl FoldStats {
    pub fn record(&mut self, outcome: FoldOutcome) {
        self.rows_seen += 1;
        match outcome {
            FoldOutcome::Folded => self.rows_folded += 1,
            FoldOutcome::Duplicate => self.duplicates += 1,
            FoldOutcome::Skipped(SkipReason::EmptyPlayer) => self.skipped_empty_player += 1,
            FoldOutcome::Skipped(SkipReason::InvalidPeriod) => self.skipped_invalid_period += 1,
            FoldOutcome::Skipped(SkipReason::BeyondCap) => self.skipped_beyond_cap += 1,
        }
    }

    pub fn record_ingest_reject(&mut self) {
        self.ingest_rejects += 1;
    }

    /// Rows dropped for any reason other than being a duplicate
    pub fn total_skipped(&self) -> u64 {
        self.skipped_empty_player + self.skipped_invalid_period + self.skipped_beyond_cap + self.ingest_rejects
    }
}

/// Starters credited to one team, per period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamLedger {
    starters: BTreeMap<PeriodId, BTreeMap<PlayerKey, i64>>,
}

impl TeamLedger {
    /// Credit a starter; a player starting twice in a period counts once, last score wins
    pub fn record_starter(&mut self, period: PeriodId, key: PlayerKey, score: i64) {
        self.starters.entry(period).or_default().insert(key, score);
    }

    /// Realized score for a period, 0 when no starters were recorded
    pub fn actual_score(&self, period: PeriodId) -> i64 {
        self.starters.get(&period).map_or(0, |starters| starters.values().sum())
    }

    /// Starters for a period, sorted by key
    pub fn starters_in(&self, period: PeriodId) -> impl Iterator<Item = &PlayerKey> {
        self.starters.get(&period).into_iter().flat_map(|starters| starters.keys())
    }

    pub fn started(&self, period: PeriodId, key: &str) -> bool {
        self.starters.get(&period).is_some_and(|starters| starters.contains_key(key))
    }

    pub fn periods(&self) -> impl Iterator<Item = PeriodId> + '_ {
        self.starters.keys().copied()
    }
}

/// Fold state: player series, team ledgers and run counters
///
/// Owned by the caller for the length of a run and passed by reference to
/// [`crate::SnapshotReconciler`]; drop it when the run is reported.
#[derive(Debug, Clone, Default)]
pub struct SeasonAccumulator {
    pub(crate) players: BTreeMap<PlayerKey, PlayerPeriodSeries>,
    pub(crate) teams: BTreeMap<String, TeamLedger>,
    pub(crate) seen_rows: HashSet<RowFingerprint>,
    pub(crate) stats: FoldStats,
    pub(crate) last_period: Option<PeriodId>,
}

impl SeasonAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(&self, key: &str) -> Option<&PlayerPeriodSeries> {
        self.players.get(key)
    }

    /// Every folded player, sorted by key
    pub fn players(&self) -> impl Iterator<Item = &PlayerPeriodSeries> {
        self.players.values()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Ledger for a legacy team label
    pub fn team(&self, legacy_label: &str) -> Option<&TeamLedger> {
        self.teams.get(legacy_label)
    }

    /// Legacy team labels with at least one credited starter
    pub fn teams(&self) -> impl Iterator<Item = (&str, &TeamLedger)> {
        self.teams.iter().map(|(label, ledger)| (label.as_str(), ledger))
    }

    pub fn actual_score(&self, legacy_label: &str, period: PeriodId) -> i64 {
        self.team(legacy_label).map_or(0, |ledger| ledger.actual_score(period))
    }

    pub fn stats(&self) -> &FoldStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut FoldStats {
        &mut self.stats
    }

    /// Highest period folded so far
    pub fn last_period(&self) -> Option<PeriodId> {
        self.last_period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_counts_each_starter_once() {
        let mut ledger = TeamLedger::default();
        ledger.record_starter(1, "jon smith".to_string(), 12);
        ledger.record_starter(1, "jon smith".to_string(), 12);
        ledger.record_starter(1, "ray cole".to_string(), 8);
        ledger.record_starter(2, "ray cole".to_string(), 4);

        assert_eq!(ledger.actual_score(1), 20);
        assert_eq!(ledger.actual_score(2), 4);
        assert_eq!(ledger.actual_score(3), 0);
        assert!(ledger.started(1, "jon smith"));
        assert!(!ledger.started(2, "jon smith"));
        assert_eq!(ledger.starters_in(1).count(), 2);
        assert_eq!(ledger.starters_in(9).count(), 0);
        assert_eq!(ledger.periods().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_fold_stats_record() {
        let mut stats = FoldStats::default();
        stats.record(FoldOutcome::Folded);
        stats.record(FoldOutcome::Duplicate);
        stats.record(FoldOutcome::Skipped(SkipReason::EmptyPlayer));
        stats.record(FoldOutcome::Skipped(SkipReason::BeyondCap));
        stats.record_ingest_reject();

        assert_eq!(stats.rows_seen, 4);
        assert_eq!(stats.rows_folded, 1);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.total_skipped(), 3);
    }
}
