//! # League Reconciler
//!
//! Folds weekly period snapshots into per-player score series and per-team
//! ledgers, then measures each team's realized score against the best
//! lineup its roster could legally have fielded that period.
//!
//! A run goes: build a [`League`] from the roster and team-name tables,
//! fold every snapshot row through [`League::reconciler`] into a
//! [`SeasonAccumulator`], and hand the accumulator to [`League::summarize`].

pub mod accumulator;
pub mod config;
pub mod error;
pub mod leaders;
pub mod league;
pub mod reconciler;
pub mod report;
pub mod series;
pub mod summary;


pub use accumulator::{FoldOutcome, FoldStats, SeasonAccumulator, SkipReason, TeamLedger};
pub use config::{MonitoringConfig, ReconcilerConfig};
pub use error::{ReconcileError, Result};
pub use leaders::{LeaderCategory, LeaderEntry, StatLeaders};
pub use league::{League, LeagueBuilder};
pub use reconciler::{NameOnly, PlayerKeyPolicy, SnapshotReconciler};
pub use report::{PlayerLine, PlayerStanding, QuotaViolation, SeasonReport, TeamPeriodSummary, TeamSeasonReport};
pub use series::{PerGameRates, PlayerPeriodSeries, ShootingSplits, StatTotals};
pub use summary::SeasonSummarizer;

/// Re-export commonly used types
pub use lineup_optimizer::{EligibilityClass, LineupRules};
pub use period_snapshot::{PeriodId, PeriodSnapshotRow, StatLine};
pub use player_registry::{PlayerKey, RosterEntry, RosterRegistry, TeamResolver};

/// Current version of the league reconciler
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Highest period a snapshot row may carry unless configured otherwise
pub const DEFAULT_MAX_PERIOD: u32 = 100;

/// Default tracing filter for tools built on the reconciler
pub const DEFAULT_LOG_LEVEL: &str = "info";
