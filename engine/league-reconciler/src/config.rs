//! Configuration for the league reconciler

use crate::error::{ReconcileError, Result};
use crate::{DEFAULT_LOG_LEVEL, DEFAULT_MAX_PERIOD};
use lineup_optimizer::LineupRules;
use period_snapshot::PeriodId;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Ignore snapshot rows after this period ("through PDn")
    pub through_period: Option<PeriodId>,

    /// Rows with a period above this are out of range and skipped
    pub max_period: PeriodId,

    /// Fail the run when no team-name table is supplied
    pub require_team_names: bool,

    /// Solve (team, period) lineups on the rayon pool
    pub parallel_solve: bool,

    /// Lineup shape the max score is solved under
    pub lineup: LineupRules,

    /// Monitoring configuration
    pub monitoring: MonitoringConfig,
}

/// Logging and data-quality reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,

    /// Log a warning for every team/period whose actual score beats the max
    pub warn_on_quota_violations: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            through_period: None,
            max_period: DEFAULT_MAX_PERIOD,
            require_team_names: true,
            parallel_solve: false,
            lineup: LineupRules::default(),
            monitoring: MonitoringConfig::default(),
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self { log_level: DEFAULT_LOG_LEVEL.to_string(), warn_on_quota_violations: true }
    }
}

impl ReconcilerConfig {
    pub fn validate(&self) -> Result<()> {
        self.lineup.validate()?;
        if self.through_period == Some(0) {
            return Err(ReconcileError::config("through_period must be at least 1"));
        }
        if self.max_period == 0 {
            return Err(ReconcileError::config("max_period must be at least 1"));
        }
        if let Some(through) = self.through_period {
            if through > self.max_period {
                return Err(ReconcileError::config(format!(
                    "through_period {} exceeds max_period {}",
                    through, self.max_period
                )));
            }
        }
        Ok(())
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ReconcilerConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ReconcilerConfig::default();
        assert_eq!(config.through_period, None);
        assert_eq!(config.max_period, 100);
        assert!(config.require_team_names);
        assert!(!config.parallel_solve);
        assert_eq!(config.lineup, LineupRules { lineup_size: 5, min_guards: 2, max_guards: 3 });
        assert_eq!(config.monitoring.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reconciler.toml");

        let config = ReconcilerConfig { through_period: Some(7), parallel_solve: true, ..Default::default() };
        config.to_file(&path).unwrap();

        assert_eq!(ReconcilerConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reconciler.toml");
        std::fs::write(&path, "through_period = 4\n\n[monitoring]\nlog_level = \"debug\"\n").unwrap();

        let config = ReconcilerConfig::from_file(&path).unwrap();
        assert_eq!(config.through_period, Some(4));
        assert!(config.require_team_names);
        assert_eq!(config.monitoring.log_level, "debug");
        assert!(config.monitoring.warn_on_quota_violations);
        assert_eq!(config.lineup, LineupRules::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ReconcilerConfig { through_period: Some(0), ..Default::default() };
        assert!(matches!(config.validate(), Err(ReconcileError::Config(_))));

        let config = ReconcilerConfig {
            lineup: LineupRules { lineup_size: 5, min_guards: 4, max_guards: 3 },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ReconcileError::Rules(_))));

        let config = ReconcilerConfig { max_period: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ReconcileError::Config(_))));

        let config = ReconcilerConfig { through_period: Some(30), max_period: 20, ..Default::default() };
        assert!(matches!(config.validate(), Err(ReconcileError::Config(_))));
    }
}
