//! Stat leader boards over the rostered players

use crate::series::StatTotals;
use player_registry::PlayerKey;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A ranked stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaderCategory {
    FieldGoalPct,
    ThreePointPct,
    FreeThrowPct,
    Rebounds,
    Blocks,
    Assists,
    Steals,
    Turnovers,
    PersonalFouls,
}

impl LeaderCategory {
    pub const ALL: [LeaderCategory; 9] = [
        LeaderCategory::FieldGoalPct,
        LeaderCategory::ThreePointPct,
        LeaderCategory::FreeThrowPct,
        LeaderCategory::Rebounds,
        LeaderCategory::Blocks,
        LeaderCategory::Assists,
        LeaderCategory::Steals,
        LeaderCategory::Turnovers,
        LeaderCategory::PersonalFouls,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LeaderCategory::FieldGoalPct => "Field Goal Percentage",
            LeaderCategory::ThreePointPct => "3-Point Field Goal Percentage",
            LeaderCategory::FreeThrowPct => "Free Throw Percentage",
            LeaderCategory::Rebounds => "Rebounds",
            LeaderCategory::Blocks => "Blocked Shots",
            LeaderCategory::Assists => "Assists",
            LeaderCategory::Steals => "Steals",
            LeaderCategory::Turnovers => "Turnovers",
            LeaderCategory::PersonalFouls => "Personal Fouls",
        }
    }

    /// Whether the board ranks a shooting percentage rather than a per-game count
    pub fn is_percentage(self) -> bool {
        matches!(
            self,
            LeaderCategory::FieldGoalPct | LeaderCategory::ThreePointPct | LeaderCategory::FreeThrowPct
        )
    }

    /// (made, volume) for this stat
    ///
    /// Volume is attempts for percentages and the season total for counts.
    fn made_and_volume(self, totals: &StatTotals) -> (i64, i64) {
        match self {
            LeaderCategory::FieldGoalPct => (totals.field_goals_made, totals.field_goals_attempted),
            LeaderCategory::ThreePointPct => (totals.threes_made, totals.threes_attempted),
            LeaderCategory::FreeThrowPct => (totals.free_throws_made, totals.free_throws_attempted),
            LeaderCategory::Rebounds => (totals.rebounds, totals.rebounds),
            LeaderCategory::Blocks => (totals.blocks, totals.blocks),
            LeaderCategory::Assists => (totals.assists, totals.assists),
            LeaderCategory::Steals => (totals.steals, totals.steals),
            LeaderCategory::Turnovers => (totals.turnovers, totals.turnovers),
            LeaderCategory::PersonalFouls => (totals.personal_fouls, totals.personal_fouls),
        }
    }

    /// Percentage (no attempts gives `None`) or per-game rate (no games gives `None`)
    fn rate(self, totals: &StatTotals) -> Option<f64> {
        let shooting = totals.shooting();
        let per_game = totals.per_game();
        match self {
            LeaderCategory::FieldGoalPct => shooting.field_goal_pct,
            LeaderCategory::ThreePointPct => shooting.three_point_pct,
            LeaderCategory::FreeThrowPct => shooting.free_throw_pct,
            LeaderCategory::Rebounds => per_game.map(|rates| rates.rebounds),
            LeaderCategory::Blocks => per_game.map(|rates| rates.blocks),
            LeaderCategory::Assists => per_game.map(|rates| rates.assists),
            LeaderCategory::Steals => per_game.map(|rates| rates.steals),
            LeaderCategory::Turnovers => per_game.map(|rates| rates.turnovers),
            LeaderCategory::PersonalFouls => per_game.map(|rates| rates.personal_fouls),
        }
    }
}

/// One player's line on a leader board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderEntry {
    pub rank: usize,
    pub key: PlayerKey,
    pub name: String,
    /// Owner's display name
    pub owner: String,
    /// School abbreviation
    pub school: String,
    pub games: u32,
    pub made: i64,
    /// Attempts for percentages, season total for counts
    pub volume: i64,
    /// `None` when the player has no attempts (or no games)
    pub rate: Option<f64>,
}

impl LeaderEntry {
    /// Unranked entry for a player's totals
    pub fn new(
        category: LeaderCategory,
        key: impl Into<PlayerKey>,
        name: impl Into<String>,
        owner: impl Into<String>,
        school: impl Into<String>,
        totals: &StatTotals,
    ) -> Self {
        let (made, volume) = category.made_and_volume(totals);
        Self {
            rank: 0,
            key: key.into(),
            name: name.into(),
            owner: owner.into(),
            school: school.into(),
            games: totals.games,
            made,
            volume,
            rate: category.rate(totals),
        }
    }
}

/// A ranked board for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatLeaders {
    pub category: LeaderCategory,
    pub entries: Vec<LeaderEntry>,
}

impl StatLeaders {
    /// Rank entries: rate desc (players without a rate last), then volume desc, then name
    pub fn rank(category: LeaderCategory, mut entries: Vec<LeaderEntry>) -> Self {
        entries.sort_by(|a, b| {
            compare_rates(a.rate, b.rate)
                .then(b.volume.cmp(&a.volume))
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.key.cmp(&b.key))
        });

        for (index, entry) in entries.iter_mut().enumerate() {
            entry.rank = index + 1;
        }

        Self { category, entries }
    }

    pub fn leader(&self) -> Option<&LeaderEntry> {
        self.entries.first()
    }
}

fn compare_rates(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
