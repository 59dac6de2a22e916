use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lineup shape: `lineup_size` players, `min_guards..=max_guards` of them at guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupRules {
    pub lineup_size: usize,
    pub min_guards: usize,
    pub max_guards: usize,
}

impl Default for LineupRules {
    fn default() -> Self {
        Self { lineup_size: 5, min_guards: 2, max_guards: 3 }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("lineup size must be at least 1")]
    EmptyLineup,
    #[error("guard range {min}..={max} is inverted")]
    GuardRangeInverted { min: usize, max: usize },
    #[error("max guards {max_guards} exceeds lineup size {lineup_size}")]
    GuardsExceedLineup { max_guards: usize, lineup_size: usize },
}

impl LineupRules {
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.lineup_size == 0 {
            return Err(RulesError::EmptyLineup);
        }
        if self.min_guards > self.max_guards {
            return Err(RulesError::GuardRangeInverted {
                min: self.min_guards,
                max: self.max_guards,
            });
        }
        if self.max_guards > self.lineup_size {
            return Err(RulesError::GuardsExceedLineup {
                max_guards: self.max_guards,
                lineup_size: self.lineup_size,
            });
        }
        Ok(())
    }

    /// Forward slots available once the guard minimum is met
    #[inline]
    pub fn max_forwards(&self) -> usize {
        self.lineup_size - self.min_guards
    }
}
