//! League inputs bundled for a reconciliation run

use crate::accumulator::SeasonAccumulator;
use crate::config::ReconcilerConfig;
use crate::error::{ReconcileError, Result};
use crate::reconciler::SnapshotReconciler;
use crate::report::SeasonReport;
use crate::summary::SeasonSummarizer;
use player_registry::{RosterEntry, RosterRegistry, TeamResolver};
use tracing::{info, warn};

enum RosterSource {
    Registry(RosterRegistry),
    Entries(Vec<RosterEntry>),
}

/// Builder for [`League`]
#[derive(Default)]
pub struct LeagueBuilder {
    config: ReconcilerConfig,
    roster: Option<RosterSource>,
    team_names: Option<TeamResolver>,
}

impl LeagueBuilder {
    pub fn config(mut self, config: ReconcilerConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an already-built registry. Its owners must already be legacy labels.
    pub fn roster(mut self, roster: RosterRegistry) -> Self {
        self.roster = Some(RosterSource::Registry(roster));
        self
    }

    /// Raw roster rows; owners are resolved against the team-name table at build time
    pub fn roster_entries(mut self, entries: Vec<RosterEntry>) -> Self {
        self.roster = Some(RosterSource::Entries(entries));
        self
    }

    pub fn team_names(mut self, resolver: TeamResolver) -> Self {
        self.team_names = Some(resolver);
        self
    }

    pub fn build(self) -> Result<League> {
        self.config.validate()?;

        let source = self.roster.ok_or(ReconcileError::MissingRoster)?;

        let resolver = match self.team_names {
            Some(resolver) => resolver,
            None if self.config.require_team_names => return Err(ReconcileError::MissingTeamNames),
            None => {
                warn!("No team-name table supplied; owner labels will be used as-is");
                TeamResolver::default()
            }
        };

        let roster = match source {
            RosterSource::Registry(roster) => roster,
            RosterSource::Entries(entries) => RosterRegistry::from_entries(entries, &resolver),
        };

        if roster.is_empty() {
            return Err(ReconcileError::EmptyRoster);
        }

        info!(
            "League ready: {} rostered players across {} teams, {} team names",
            roster.len(),
            roster.owner_count(),
            resolver.len()
        );

        Ok(League { config: self.config, roster, resolver })
    }
}

/// Validated roster, team-name table and configuration
pub struct League {
    config: ReconcilerConfig,
    roster: RosterRegistry,
    resolver: TeamResolver,
}

impl League {
    pub fn builder() -> LeagueBuilder {
        LeagueBuilder::default()
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    pub fn roster(&self) -> &RosterRegistry {
        &self.roster
    }

    pub fn resolver(&self) -> &TeamResolver {
        &self.resolver
    }

    /// A reconciler bound to this league's team names and period cap
    pub fn reconciler(&self) -> SnapshotReconciler<'_> {
        SnapshotReconciler::new(&self.resolver, &self.config)
    }

    pub fn summarizer(&self) -> Result<SeasonSummarizer<'_>> {
        SeasonSummarizer::new(&self.roster, &self.resolver, &self.config)
    }

    /// Solve every team/period and assemble the season report
    pub fn summarize(&self, acc: &SeasonAccumulator) -> Result<SeasonReport> {
        Ok(self.summarizer()?.summarize(acc))
    }
}
