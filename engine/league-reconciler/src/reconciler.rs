//! Folding snapshot rows into the accumulator

use crate::accumulator::{FoldOutcome, SeasonAccumulator, SkipReason};
use crate::config::ReconcilerConfig;
use crate::series::PlayerPeriodSeries;
use period_snapshot::{IngestError, PeriodId, PeriodSnapshotRow, RowFingerprint};
use player_registry::{normalize_player_name, PlayerKey, TeamResolver};
use tracing::{debug, warn};

/// Turns a normalized player name into the key the accumulator files it under
///
/// The default keys on the name alone, which lets two different people with
/// the same normalized name collide. A policy that also looks at the row
/// (for example the school) can split them; rosters must then be keyed the
/// same way for lineup solving to find them.
pub trait PlayerKeyPolicy: Send + Sync {
    fn player_key(&self, normalized_name: &str, row: &PeriodSnapshotRow) -> PlayerKey;
}

/// Key on the normalized name only
#[derive(Debug, Clone, Copy, Default)]
pub struct NameOnly;

impl PlayerKeyPolicy for NameOnly {
    fn player_key(&self, normalized_name: &str, _row: &PeriodSnapshotRow) -> PlayerKey {
        normalized_name.to_string()
    }
}

/// Period Snapshot Reconciler
///
/// Stateless apart from its configuration: all run state lives in the
/// [`SeasonAccumulator`] the caller passes in, so folding is a pure
/// function of the rows seen and the order rows arrive in does not matter
/// (except for the latest-owner/latest-name fields, which are last write wins).
pub struct SnapshotReconciler<'a> {
    resolver: &'a TeamResolver,
    through_period: Option<PeriodId>,
    max_period: PeriodId,
    key_policy: Box<dyn PlayerKeyPolicy + 'a>,
}

impl<'a> SnapshotReconciler<'a> {
    pub fn new(resolver: &'a TeamResolver, config: &ReconcilerConfig) -> Self {
        Self {
            resolver,
            through_period: config.through_period,
            max_period: config.max_period,
            key_policy: Box::new(NameOnly),
        }
    }

    /// Replace the player keying policy
    pub fn with_key_policy(mut self, policy: impl PlayerKeyPolicy + 'a) -> Self {
        self.key_policy = Box::new(policy);
        self
    }

    /// Fold one row into the accumulator
    pub fn fold_row(&self, acc: &mut SeasonAccumulator, row: &PeriodSnapshotRow) -> FoldOutcome {
        let outcome = self.apply(acc, row);
        acc.stats.record(outcome);
        outcome
    }

    fn apply(&self, acc: &mut SeasonAccumulator, row: &PeriodSnapshotRow) -> FoldOutcome {
        let normalized = normalize_player_name(&row.player);
        if normalized.is_empty() {
            warn!("Skipping period {} row with unusable player name {:?}", row.period, row.player);
            return FoldOutcome::Skipped(SkipReason::EmptyPlayer);
        }

        if row.period == 0 || row.period > self.max_period {
            warn!(
                "Skipping row for '{}' with out-of-range period {} (allowed 1..={})",
                row.player, row.period, self.max_period
            );
            return FoldOutcome::Skipped(SkipReason::InvalidPeriod);
        }

        if let Some(cap) = self.through_period {
            if row.period > cap {
                debug!("Skipping period {} row for '{}', beyond cap {}", row.period, row.player, cap);
                return FoldOutcome::Skipped(SkipReason::BeyondCap);
            }
        }

        if !acc.seen_rows.insert(RowFingerprint::of(row)) {
            debug!("Duplicate period {} row for '{}' ignored", row.period, row.player);
            return FoldOutcome::Duplicate;
        }

        let key = self.key_policy.player_key(&normalized, row);
        let owner = self.resolver.to_legacy(&row.owner);

        let series =
            acc.players.entry(key.clone()).or_insert_with(|| PlayerPeriodSeries::new(key.clone()));
        series.record_score(row.period, row.score);
        series.totals.add_game(&row.stats);
        series.name = row.player.clone();
        series.owner = owner.clone();
        if let Some(team) = &row.team {
            series.team = Some(team.clone());
        }

        if row.is_starter {
            if owner.is_empty() {
                warn!("Starter '{}' in period {} has no owner, not credited", row.player, row.period);
            } else {
                acc.teams.entry(owner).or_default().record_starter(row.period, key, row.score);
            }
        }

        acc.last_period = acc.last_period.max(Some(row.period));
        FoldOutcome::Folded
    }

    /// Fold a batch of rows, returning how many were folded
    pub fn fold_all<'r, I>(&self, acc: &mut SeasonAccumulator, rows: I) -> usize
    where
        I: IntoIterator<Item = &'r PeriodSnapshotRow>,
    {
        rows.into_iter().filter(|row| self.fold_row(acc, row) == FoldOutcome::Folded).count()
    }

    /// Fold rows straight from the ingestion boundary, counting and logging rejects
    pub fn fold_ingested<I>(&self, acc: &mut SeasonAccumulator, rows: I) -> usize
    where
        I: IntoIterator<Item = Result<PeriodSnapshotRow, IngestError>>,
    {
        let mut folded = 0;
        for row in rows {
            match row {
                Ok(row) => {
                    if self.fold_row(acc, &row) == FoldOutcome::Folded {
                        folded += 1;
                    }
                }
                Err(e) => {
                    warn!("Skipping snapshot row: {}", e);
                    acc.stats.record_ingest_reject();
                }
            }
        }
        folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use period_snapshot::StatLine;
    use player_registry::TeamNamePair;

    fn create_test_resolver() -> TeamResolver {
        TeamResolver::from_pairs(vec![TeamNamePair::new("Acme", "The Eagles")])
    }

    #[test]
    fn test_fold_creates_series_lazily() {
        let resolver = create_test_resolver();
        let reconciler = SnapshotReconciler::new(&resolver, &ReconcilerConfig::default());
        let mut acc = SeasonAccumulator::new();

        assert!(acc.player("jon smith").is_none());
        let row = PeriodSnapshotRow::new(2, "The Eagles", "Jon Smith Jr.", 9, false);
        assert_eq!(reconciler.fold_row(&mut acc, &row), FoldOutcome::Folded);

        let series = acc.player("jon smith").unwrap();
        assert_eq!(series.name, "Jon Smith Jr.");
        assert_eq!(series.owner, "Acme");
        assert_eq!(series.score_in(2), Some(9));
        assert_eq!(acc.last_period(), Some(2));
        assert!(acc.team("Acme").is_none());
    }

    #[test]
    fn test_rejected_rows_are_no_ops() {
        let resolver = create_test_resolver();
        let config = ReconcilerConfig { through_period: Some(3), ..Default::default() };
        let reconciler = SnapshotReconciler::new(&resolver, &config);
        let mut acc = SeasonAccumulator::new();

        let rows = vec![
            PeriodSnapshotRow::new(1, "Acme", " .. ", 5, true),
            PeriodSnapshotRow::new(0, "Acme", "Jon Smith", 5, true),
            PeriodSnapshotRow::new(4, "Acme", "Jon Smith", 5, true),
        ];
        assert_eq!(reconciler.fold_all(&mut acc, &rows), 0);

        assert_eq!(acc.player_count(), 0);
        assert_eq!(acc.actual_score("Acme", 1), 0);
        assert_eq!(acc.last_period(), None);

        let stats = acc.stats();
        assert_eq!(stats.rows_seen, 3);
        assert_eq!(stats.skipped_empty_player, 1);
        assert_eq!(stats.skipped_invalid_period, 1);
        assert_eq!(stats.skipped_beyond_cap, 1);
    }

    #[test]
    fn test_identical_row_folded_once() {
        let resolver = create_test_resolver();
        let reconciler = SnapshotReconciler::new(&resolver, &ReconcilerConfig::default());
        let mut acc = SeasonAccumulator::new();

        let row = PeriodSnapshotRow::new(1, "Acme", "Jon Smith", 12, true)
            .with_stats(StatLine { points: 20, ..Default::default() });
        assert_eq!(reconciler.fold_row(&mut acc, &row), FoldOutcome::Folded);
        assert_eq!(reconciler.fold_row(&mut acc, &row), FoldOutcome::Duplicate);

        let series = acc.player("jon smith").unwrap();
        assert_eq!(series.total_score(), 12);
        assert_eq!(series.totals.games, 1);
        assert_eq!(series.totals.points, 20);
        assert_eq!(acc.actual_score("Acme", 1), 12);
        assert_eq!(acc.stats().duplicates, 1);
    }

    #[test]
    fn test_latest_owner_wins() {
        let resolver = create_test_resolver();
        let reconciler = SnapshotReconciler::new(&resolver, &ReconcilerConfig::default());
        let mut acc = SeasonAccumulator::new();

        reconciler.fold_row(&mut acc, &PeriodSnapshotRow::new(1, "Acme", "Ray Cole", 3, false));
        reconciler.fold_row(&mut acc, &PeriodSnapshotRow::new(2, "Bob", "Ray Cole", 4, false).with_team("UK"));

        let series = acc.player("ray cole").unwrap();
        assert_eq!(series.owner, "Bob");
        assert_eq!(series.team.as_deref(), Some("UK"));
    }

    #[test]
    fn test_starter_without_owner_not_credited() {
        let resolver = create_test_resolver();
        let reconciler = SnapshotReconciler::new(&resolver, &ReconcilerConfig::default());
        let mut acc = SeasonAccumulator::new();

        reconciler.fold_row(&mut acc, &PeriodSnapshotRow::new(1, "", "Ray Cole", 3, true));
        assert_eq!(acc.teams().count(), 0);
        assert_eq!(acc.player("ray cole").unwrap().score_in(1), Some(3));
    }

    struct NameAndSchool;

    impl PlayerKeyPolicy for NameAndSchool {
        fn player_key(&self, normalized_name: &str, row: &PeriodSnapshotRow) -> PlayerKey {
            match &row.team {
                Some(team) => format!("{normalized_name}|{}", team.to_lowercase()),
                None => normalized_name.to_string(),
            }
        }
    }

    #[test]
    fn test_key_policy_splits_namesakes() {
        let resolver = create_test_resolver();
        let reconciler =
            SnapshotReconciler::new(&resolver, &ReconcilerConfig::default()).with_key_policy(NameAndSchool);
        let mut acc = SeasonAccumulator::new();

        reconciler.fold_row(&mut acc, &PeriodSnapshotRow::new(1, "Acme", "Chris Lee", 10, false).with_team("UK"));
        reconciler.fold_row(&mut acc, &PeriodSnapshotRow::new(1, "Bob", "Chris Lee", 4, false).with_team("LSU"));

        assert_eq!(acc.player_count(), 2);
        assert_eq!(acc.player("chris lee|uk").unwrap().total_score(), 10);
        assert_eq!(acc.player("chris lee|lsu").unwrap().total_score(), 4);
    }

    #[test]
    fn test_fold_ingested_counts_rejects() {
        let resolver = create_test_resolver();
        let reconciler = SnapshotReconciler::new(&resolver, &ReconcilerConfig::default());
        let mut acc = SeasonAccumulator::new();

        let rows = vec![
            Ok(PeriodSnapshotRow::new(1, "Acme", "Jon Smith", 12, true)),
            Err(IngestError::InvalidPeriod("PDx".to_string())),
        ];
        assert_eq!(reconciler.fold_ingested(&mut acc, rows), 1);
        assert_eq!(acc.stats().ingest_rejects, 1);
        assert_eq!(acc.stats().rows_folded, 1);
    }
}
