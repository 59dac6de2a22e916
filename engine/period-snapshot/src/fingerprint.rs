use crate::types::PeriodSnapshotRow;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Content hash of a snapshot row
///
/// Two rows share a fingerprint only when every field matches, so the same
/// export fed twice can be recognised without confusing it with a second
/// appearance spelled differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowFingerprint(u64);

impl RowFingerprint {
    pub fn of(row: &PeriodSnapshotRow) -> Self {
        let mut hasher = DefaultHasher::new();

        row.period.hash(&mut hasher);
        row.owner.hash(&mut hasher);
        row.player.hash(&mut hasher);
        row.score.hash(&mut hasher);
        row.is_starter.hash(&mut hasher);
        row.team.hash(&mut hasher);

        let stats = &row.stats;
        stats.minutes.to_bits().hash(&mut hasher);
        [
            stats.points,
            stats.rebounds,
            stats.assists,
            stats.steals,
            stats.blocks,
            stats.turnovers,
            stats.personal_fouls,
            stats.field_goals_made,
            stats.field_goals_attempted,
            stats.threes_made,
            stats.threes_attempted,
            stats.free_throws_made,
            stats.free_throws_attempted,
        ]
        .hash(&mut hasher);

        Self(hasher.finish())
    }
}
