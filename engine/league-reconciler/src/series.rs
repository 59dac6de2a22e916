//! Per-player period series and cumulative box-score totals

use period_snapshot::{PeriodId, StatLine};
use player_registry::PlayerKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Box-score totals across every folded appearance
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatTotals {
    /// One per folded row
    pub games: u32,
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

impl StatTotals {
    /// Fold one game appearance into the totals
    pub fn add_game(&mut self, line: &StatLine) {
        self.games += 1;
        self.minutes += line.minutes;
        self.points += line.points;
        self.rebounds += line.rebounds;
        self.assists += line.assists;
        self.steals += line.steals;
        self.blocks += line.blocks;
        self.turnovers += line.turnovers;
        self.personal_fouls += line.personal_fouls;
        self.field_goals_made += line.field_goals_made;
        self.field_goals_attempted += line.field_goals_attempted;
        self.threes_made += line.threes_made;
        self.threes_attempted += line.threes_attempted;
        self.free_throws_made += line.free_throws_made;
        self.free_throws_attempted += line.free_throws_attempted;
    }

    /// Per-game averages, `None` before the first game
    pub fn per_game(&self) -> Option<PerGameRates> {
        if self.games == 0 {
            return None;
        }
        let games = f64::from(self.games);
        let rate = |total: i64| total as f64 / games;

        Some(PerGameRates {
            minutes: self.minutes / games,
            points: rate(self.points),
            rebounds: rate(self.rebounds),
            assists: rate(self.assists),
            blocks: rate(self.blocks),
            steals: rate(self.steals),
            turnovers: rate(self.turnovers),
            personal_fouls: rate(self.personal_fouls),
        })
    }

    pub fn shooting(&self) -> ShootingSplits {
        ShootingSplits {
            field_goal_pct: pct(self.field_goals_made, self.field_goals_attempted),
            three_point_pct: pct(self.threes_made, self.threes_attempted),
            free_throw_pct: pct(self.free_throws_made, self.free_throws_attempted),
        }
    }
}

fn pct(made: i64, attempted: i64) -> Option<f64> {
    (attempted > 0).then(|| made as f64 / attempted as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerGameRates {
    pub minutes: f64,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub blocks: f64,
    pub steals: f64,
    pub turnovers: f64,
    pub personal_fouls: f64,
}

/// Shooting percentages as fractions; `None` without attempts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShootingSplits {
    pub field_goal_pct: Option<f64>,
    pub three_point_pct: Option<f64>,
    pub free_throw_pct: Option<f64>,
}

/// Everything known about one canonical player across the run
///
/// `scores` is sparse: a period is present only if the player appeared in
/// that period's box score, so an absent period and a present 0 differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPeriodSeries {
    pub key: PlayerKey,

    /// Latest spelling seen in a snapshot
    pub name: String,

    /// Latest legacy owner label seen (last write wins)
    pub owner: String,

    /// Latest school abbreviation seen
    pub team: Option<String>,

    scores: BTreeMap<PeriodId, i64>,
    total_score: i64,
    periods_present: u32,
    pub totals: StatTotals,
}

impl PlayerPeriodSeries {
    pub fn new(key: PlayerKey) -> Self {
        Self {
            key,
            name: String::new(),
            owner: String::new(),
            team: None,
            scores: BTreeMap::new(),
            total_score: 0,
            periods_present: 0,
            totals: StatTotals::default(),
        }
    }

    /// Record the score for a period; returns true the first time the period is seen
    ///
    /// A repeated period overwrites the earlier score and the running total
    /// follows it, so the total always equals the sum of the sparse map.
    pub fn record_score(&mut self, period: PeriodId, score: i64) -> bool {
        match self.scores.insert(period, score) {
            None => {
                self.total_score += score;
                self.periods_present += 1;
                true
            }
            Some(previous) => {
                self.total_score += score - previous;
                false
            }
        }
    }

    /// Score for a period, `None` if the player did not appear
    pub fn score_in(&self, period: PeriodId) -> Option<i64> {
        self.scores.get(&period).copied()
    }

    /// Present periods with their scores, in period order
    pub fn scores(&self) -> impl Iterator<Item = (PeriodId, i64)> + '_ {
        self.scores.iter().map(|(period, score)| (*period, *score))
    }

    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    pub fn periods_present(&self) -> u32 {
        self.periods_present
    }

    /// Average score over present periods, 0.0 when none
    pub fn average_score(&self) -> f64 {
        if self.periods_present == 0 {
            return 0.0;
        }
        self.total_score as f64 / f64::from(self.periods_present)
    }

    pub fn last_period(&self) -> Option<PeriodId> {
        self.scores.keys().next_back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_zero_differs_from_absent() {
        let mut series = PlayerPeriodSeries::new("jon smith".to_string());
        assert!(series.record_score(3, 0));

        assert_eq!(series.score_in(3), Some(0));
        assert_eq!(series.score_in(2), None);
        assert_eq!(series.periods_present(), 1);
        assert_eq!(series.average_score(), 0.0);
    }

    #[test]
    fn test_repeat_period_overwrites_without_double_count() {
        let mut series = PlayerPeriodSeries::new("jon smith".to_string());
        assert!(series.record_score(1, 12));
        assert!(!series.record_score(1, 12));
        assert_eq!(series.total_score(), 12);
        assert_eq!(series.periods_present(), 1);

        assert!(!series.record_score(1, 15));
        assert_eq!(series.score_in(1), Some(15));
        assert_eq!(series.total_score(), 15);

        assert!(series.record_score(2, 5));
        assert_eq!(series.total_score(), 20);
        assert_eq!(series.average_score(), 10.0);
        assert_eq!(series.last_period(), Some(2));
    }

    #[test]
    fn test_per_game_rates_and_shooting() {
        let mut totals = StatTotals::default();
        assert!(totals.per_game().is_none());
        assert_eq!(totals.shooting().field_goal_pct, None);

        totals.add_game(&StatLine {
            minutes: 30.0,
            points: 20,
            rebounds: 6,
            field_goals_made: 8,
            field_goals_attempted: 16,
            free_throws_made: 4,
            free_throws_attempted: 4,
            ..Default::default()
        });
        totals.add_game(&StatLine { minutes: 20.0, points: 10, turnovers: 3, ..Default::default() });

        let rates = totals.per_game().unwrap();
        assert_eq!(totals.games, 2);
        assert_eq!(rates.minutes, 25.0);
        assert_eq!(rates.points, 15.0);
        assert_eq!(rates.rebounds, 3.0);
        assert_eq!(rates.turnovers, 1.5);

        let shooting = totals.shooting();
        assert_eq!(shooting.field_goal_pct, Some(0.5));
        assert_eq!(shooting.three_point_pct, None);
        assert_eq!(shooting.free_throw_pct, Some(1.0));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn total_tracks_sparse_map(records in prop::collection::vec((1u32..8, -20i64..60), 0..40)) {
                let mut series = PlayerPeriodSeries::new("p".to_string());
                for (period, score) in &records {
                    series.record_score(*period, *score);
                }

                let sum: i64 = series.scores().map(|(_, score)| score).sum();
                prop_assert_eq!(series.total_score(), sum);
                prop_assert_eq!(series.periods_present() as usize, series.scores().count());
            }
        }
    }
}
