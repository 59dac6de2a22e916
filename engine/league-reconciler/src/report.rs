//! Report shapes handed to the rendering stage

use crate::accumulator::FoldStats;
use crate::leaders::{LeaderCategory, StatLeaders};
use crate::series::{PerGameRates, ShootingSplits};
use chrono::{DateTime, Utc};
use lineup_optimizer::EligibilityClass;
use period_snapshot::PeriodId;
use player_registry::PlayerKey;
use serde::{Deserialize, Serialize};

/// Realized and best-possible score for one team in one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPeriodSummary {
    /// Legacy owner label
    pub team: String,
    pub period: PeriodId,
    /// Sum of the period's credited starters
    pub actual_score: i64,
    /// Best legal lineup from the team's rostered players that period
    pub max_score: i64,
    /// Credited starters, sorted by key
    pub starters: Vec<PlayerKey>,
}

impl TeamPeriodSummary {
    /// Recorded starters beat every legal lineup, so they broke the positional quota
    pub fn violates_quota(&self) -> bool {
        self.actual_score > self.max_score
    }
}

/// Data-quality warning: actual score above the feasible maximum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaViolation {
    pub team: String,
    pub display_name: String,
    pub period: PeriodId,
    pub actual_score: i64,
    pub max_score: i64,
}

/// One rostered player's line on a team report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerLine {
    pub key: PlayerKey,
    pub name: String,
    pub position: String,
    pub eligibility: EligibilityClass,
    pub draft_order: Option<u32>,
    pub cost: Option<u32>,
    /// School abbreviation
    pub school: String,
    pub height: String,
    pub weight: String,
    pub class: String,
    /// Index `i` holds period `i + 1`; `None` when the player did not appear
    pub scores: Vec<Option<i64>>,
    pub total_score: i64,
    pub average_score: f64,
    pub games: u32,
    pub per_game: Option<PerGameRates>,
    pub shooting: ShootingSplits,
    /// Periods in which the player was a credited starter for this team
    pub starter_periods: Vec<PeriodId>,
}

/// Everything the team page needs for one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSeasonReport {
    /// Legacy owner label
    pub team: String,
    pub display_name: String,
    /// One entry per period, `1..=through_period`
    pub periods: Vec<TeamPeriodSummary>,
    pub total_actual: i64,
    pub total_max: i64,
    /// Sorted by average desc, total desc, then name
    pub players: Vec<PlayerLine>,
}

/// A player on the league-wide scoring list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub rank: usize,
    pub key: PlayerKey,
    pub name: String,
    /// Display name of the latest owner
    pub owner: String,
    pub total_score: i64,
    pub periods_present: u32,
    pub rostered: bool,
}

/// Output of a full run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonReport {
    pub through_period: PeriodId,
    pub generated_at: DateTime<Utc>,
    pub teams: Vec<TeamSeasonReport>,
    pub standings: Vec<PlayerStanding>,
    /// Shooting and per-game leader boards over rostered players
    pub leaders: Vec<StatLeaders>,
    pub violations: Vec<QuotaViolation>,
    pub fold_stats: FoldStats,
}

impl SeasonReport {
    pub fn team(&self, legacy_label: &str) -> Option<&TeamSeasonReport> {
        self.teams.iter().find(|team| team.team == legacy_label)
    }

    /// Summary for one team and period
    pub fn summary(&self, legacy_label: &str, period: PeriodId) -> Option<&TeamPeriodSummary> {
        self.team(legacy_label)?.periods.iter().find(|summary| summary.period == period)
    }

    pub fn leaders(&self, category: LeaderCategory) -> Option<&StatLeaders> {
        self.leaders.iter().find(|board| board.category == category)
    }
}
