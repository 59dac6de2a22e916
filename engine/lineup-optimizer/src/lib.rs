//! Lineup Optimizer - eligibility classes and the best legal five

mod eligibility;
mod rules;
mod solver;

pub use eligibility::{classify, EligibilityClass};
pub use rules::{LineupRules, RulesError};
pub use solver::{best_lineup, Candidate, LineupSolver};
