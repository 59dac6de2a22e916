//! Per-team, per-period actual vs. max scores and the season report

use crate::accumulator::{SeasonAccumulator, TeamLedger};
use crate::config::ReconcilerConfig;
use crate::error::{ReconcileError, Result};
use crate::leaders::{LeaderCategory, LeaderEntry, StatLeaders};
use crate::report::{
    PlayerLine, PlayerStanding, QuotaViolation, SeasonReport, TeamPeriodSummary, TeamSeasonReport,
};
use crate::series::StatTotals;
use chrono::Utc;
use lineup_optimizer::{classify, Candidate, LineupSolver};
use period_snapshot::PeriodId;
use player_registry::{RosterRegistry, TeamResolver};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Combines folded series with the roster into team/period summaries
///
/// Teams are the roster's owners; a team's lineup candidates for a period
/// are its rostered players that appeared in that period. Players who show
/// up in snapshots without being rostered are still reported in the
/// standings but never enter a candidate pool.
pub struct SeasonSummarizer<'a> {
    roster: &'a RosterRegistry,
    resolver: &'a TeamResolver,
    solver: LineupSolver,
    parallel_solve: bool,
    warn_on_quota_violations: bool,
}

impl<'a> SeasonSummarizer<'a> {
    pub fn new(roster: &'a RosterRegistry, resolver: &'a TeamResolver, config: &ReconcilerConfig) -> Result<Self> {
        config.validate()?;
        if roster.is_empty() {
            return Err(ReconcileError::EmptyRoster);
        }

        Ok(Self {
            roster,
            resolver,
            solver: LineupSolver::new(config.lineup)?,
            parallel_solve: config.parallel_solve,
            warn_on_quota_violations: config.monitoring.warn_on_quota_violations,
        })
    }

    /// Lineup candidates for a team in a period
    pub fn candidates(&self, acc: &SeasonAccumulator, team: &str, period: PeriodId) -> Vec<Candidate> {
        self.roster
            .players_for(team)
            .into_iter()
            .flatten()
            .filter_map(|key| {
                let score = acc.player(key)?.score_in(period)?;
                let position = self.roster.get(key).map_or("", |entry| entry.position.as_str());
                Some(Candidate::new(score, classify(position)))
            })
            .collect()
    }

    /// Actual and max score for one team in one period
    pub fn team_period(&self, acc: &SeasonAccumulator, team: &str, period: PeriodId) -> TeamPeriodSummary {
        let candidates = self.candidates(acc, team, period);
        let max_score = self.solver.best_lineup(&candidates);

        let (actual_score, starters) = match acc.team(team) {
            Some(ledger) => (ledger.actual_score(period), ledger.starters_in(period).cloned().collect()),
            None => (0, Vec::new()),
        };

        TeamPeriodSummary { team: team.to_string(), period, actual_score, max_score, starters }
    }

    /// Build the full season report from the accumulator
    pub fn summarize(&self, acc: &SeasonAccumulator) -> SeasonReport {
        let through_period = acc.last_period().unwrap_or(0);
        let owners: Vec<&str> = self.roster.owners().collect();

        let jobs: Vec<(&str, PeriodId)> = owners
            .iter()
            .flat_map(|owner| (1..=through_period).map(move |period| (*owner, period)))
            .collect();

        info!(
            "Solving {} team/period lineups for {} teams through period {}",
            jobs.len(),
            owners.len(),
            through_period
        );

        let summaries: Vec<TeamPeriodSummary> = if self.parallel_solve {
            jobs.par_iter().map(|&(team, period)| self.team_period(acc, team, period)).collect()
        } else {
            jobs.iter().map(|&(team, period)| self.team_period(acc, team, period)).collect()
        };

        let violations = self.collect_violations(&summaries);
        self.warn_unrostered_teams(acc);

        let mut summaries = summaries.into_iter();
        let teams = owners
            .iter()
            .map(|owner| {
                let periods: Vec<TeamPeriodSummary> =
                    summaries.by_ref().take(through_period as usize).collect();
                self.team_report(acc, owner, periods, through_period)
            })
            .collect();

        SeasonReport {
            through_period,
            generated_at: Utc::now(),
            teams,
            standings: self.standings(acc),
            leaders: self.stat_leaders(acc),
            violations,
            fold_stats: *acc.stats(),
        }
    }

    fn collect_violations(&self, summaries: &[TeamPeriodSummary]) -> Vec<QuotaViolation> {
        summaries
            .iter()
            .filter(|summary| summary.violates_quota())
            .map(|summary| {
                let display_name = self.resolver.to_display(&summary.team);
                if self.warn_on_quota_violations {
                    warn!(
                        "{} period {}: actual {} exceeds best legal lineup {}; starters break the positional quota",
                        display_name, summary.period, summary.actual_score, summary.max_score
                    );
                }
                QuotaViolation {
                    team: summary.team.clone(),
                    display_name,
                    period: summary.period,
                    actual_score: summary.actual_score,
                    max_score: summary.max_score,
                }
            })
            .collect()
    }

    fn warn_unrostered_teams(&self, acc: &SeasonAccumulator) {
        for (team, ledger) in acc.teams() {
            if self.roster.players_for(team).is_err() {
                warn!(
                    "Starters credited to '{}' in {} periods, but no roster lists that team",
                    team,
                    ledger.periods().count()
                );
            }
        }
    }

    fn team_report(
        &self,
        acc: &SeasonAccumulator,
        team: &str,
        periods: Vec<TeamPeriodSummary>,
        through_period: PeriodId,
    ) -> TeamSeasonReport {
        let ledger = acc.team(team);

        let mut players: Vec<PlayerLine> = self
            .roster
            .players_for(team)
            .into_iter()
            .flatten()
            .filter_map(|key| self.player_line(acc, key, ledger, through_period))
            .collect();

        players.sort_by(|a, b| {
            b.average_score
                .total_cmp(&a.average_score)
                .then(b.total_score.cmp(&a.total_score))
                .then_with(|| a.name.cmp(&b.name))
        });

        let total_actual = periods.iter().map(|summary| summary.actual_score).sum();
        let total_max = periods.iter().map(|summary| summary.max_score).sum();
        debug!("{}: actual {} / max {}", team, total_actual, total_max);

        TeamSeasonReport {
            team: team.to_string(),
            display_name: self.resolver.to_display(team),
            periods,
            total_actual,
            total_max,
            players,
        }
    }

    fn player_line(
        &self,
        acc: &SeasonAccumulator,
        key: &str,
        ledger: Option<&TeamLedger>,
        through_period: PeriodId,
    ) -> Option<PlayerLine> {
        let entry = self.roster.get(key)?;
        let series = acc.player(key);
        let totals = series.map_or_else(StatTotals::default, |series| series.totals);

        Some(PlayerLine {
            key: key.to_string(),
            name: entry.name.clone(),
            position: entry.position.clone(),
            eligibility: classify(&entry.position),
            draft_order: entry.draft_order,
            cost: entry.cost,
            school: entry.team.clone(),
            height: entry.height.clone(),
            weight: entry.weight.clone(),
            class: entry.class.clone(),
            scores: (1..=through_period)
                .map(|period| series.and_then(|series| series.score_in(period)))
                .collect(),
            total_score: series.map_or(0, |series| series.total_score()),
            average_score: series.map_or(0.0, |series| series.average_score()),
            games: totals.games,
            per_game: totals.per_game(),
            shooting: totals.shooting(),
            starter_periods: (1..=through_period)
                .filter(|period| ledger.is_some_and(|ledger| ledger.started(*period, key)))
                .collect(),
        })
    }

    /// Leader boards for every category, over all rostered players
    ///
    /// Players who never appeared still get a line; without attempts or games
    /// they sort to the bottom of each board.
    pub fn stat_leaders(&self, acc: &SeasonAccumulator) -> Vec<StatLeaders> {
        LeaderCategory::ALL
            .iter()
            .map(|&category| {
                let entries = self
                    .roster
                    .entries()
                    .map(|(key, entry)| {
                        let series = acc.player(key);
                        let totals = series.map_or_else(StatTotals::default, |series| series.totals);
                        let school = series
                            .and_then(|series| series.team.clone())
                            .unwrap_or_else(|| entry.team.clone());
                        LeaderEntry::new(
                            category,
                            key.clone(),
                            entry.name.clone(),
                            self.resolver.to_display(&entry.owner),
                            school,
                            &totals,
                        )
                    })
                    .collect();
                StatLeaders::rank(category, entries)
            })
            .collect()
    }

    /// Every folded player ranked by total score, ties broken by name
    pub fn standings(&self, acc: &SeasonAccumulator) -> Vec<PlayerStanding> {
        let mut players: Vec<_> = acc.players().collect();
        players.sort_by(|a, b| {
            b.total_score().cmp(&a.total_score()).then_with(|| a.name.cmp(&b.name)).then_with(|| a.key.cmp(&b.key))
        });

        players
            .into_iter()
            .enumerate()
            .map(|(index, series)| PlayerStanding {
                rank: index + 1,
                key: series.key.clone(),
                name: series.name.clone(),
                owner: self.resolver.to_display(&series.owner),
                total_score: series.total_score(),
                periods_present: series.periods_present(),
                rostered: self.roster.contains(&series.key),
            })
            .collect()
    }
}
