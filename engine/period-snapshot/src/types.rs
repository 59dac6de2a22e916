use serde::{Deserialize, Serialize};

/// Scoring period number, 1-based
pub type PeriodId = u32;

/// One game's box-score line for a player
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub minutes: f64,
    pub points: i64,
    pub rebounds: i64,
    pub assists: i64,
    pub steals: i64,
    pub blocks: i64,
    pub turnovers: i64,
    pub personal_fouls: i64,
    pub field_goals_made: i64,
    pub field_goals_attempted: i64,
    pub threes_made: i64,
    pub threes_attempted: i64,
    pub free_throws_made: i64,
    pub free_throws_attempted: i64,
}

/// A single player appearance in one period's snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSnapshotRow {
    /// Scoring period the appearance belongs to
    pub period: PeriodId,

    /// Owner label as written in the snapshot, either naming scheme
    pub owner: String,

    /// Player name as written in the snapshot
    pub player: String,

    /// Pooh score for the appearance
    pub score: i64,

    /// Whether the player counted toward the owner's realized score
    pub is_starter: bool,

    /// School abbreviation, when the snapshot carries one
    #[serde(default)]
    pub team: Option<String>,

    #[serde(default)]
    pub stats: StatLine,
}

impl PeriodSnapshotRow {
    /// Create a row with an empty stat line
    pub fn new(
        period: PeriodId,
        owner: impl Into<String>,
        player: impl Into<String>,
        score: i64,
        is_starter: bool,
    ) -> Self {
        Self {
            period,
            owner: owner.into(),
            player: player.into(),
            score,
            is_starter,
            team: None,
            stats: StatLine::default(),
        }
    }

    pub fn with_stats(mut self, stats: StatLine) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }
}
