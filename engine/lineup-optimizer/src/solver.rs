use crate::eligibility::EligibilityClass;
use crate::rules::{LineupRules, RulesError};
use serde::{Deserialize, Serialize};

/// One player available for a period: what they scored and where they may line up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub score: i64,
    pub class: EligibilityClass,
}

impl Candidate {
    pub fn new(score: i64, class: EligibilityClass) -> Self {
        Self { score, class }
    }
}

impl From<(i64, EligibilityClass)> for Candidate {
    fn from((score, class): (i64, EligibilityClass)) -> Self {
        Self { score, class }
    }
}

/// Best-legal-lineup solver
///
/// Dynamic program over (players picked, guards assigned). Each candidate is
/// skipped, placed at guard or placed at forward where its class allows; the
/// table only ever holds `(lineup_size + 1) x (max_guards + 1)` states, so a
/// solve is linear in the candidate count.
#[derive(Debug, Clone, Copy)]
pub struct LineupSolver {
    rules: LineupRules,
}

impl Default for LineupSolver {
    fn default() -> Self {
        Self { rules: LineupRules::default() }
    }
}

impl LineupSolver {
    pub fn new(rules: LineupRules) -> Result<Self, RulesError> {
        rules.validate()?;
        Ok(Self { rules })
    }

    #[inline]
    pub fn rules(&self) -> &LineupRules {
        &self.rules
    }

    /// Highest total of any legal lineup, floored at 0
    ///
    /// An infeasible pool and a pool whose best lineup scores below zero both
    /// report 0, so adding a candidate can never lower the result.
    pub fn best_lineup(&self, candidates: &[Candidate]) -> i64 {
        let size = self.rules.lineup_size;
        let max_guards = self.rules.max_guards;
        let max_forwards = self.rules.max_forwards();

        if candidates.len() < size {
            return 0;
        }

        // dp[picked][guards] = best sum reaching that state
        let mut dp = vec![vec![None::<i64>; max_guards + 1]; size + 1];
        dp[0][0] = Some(0);

        for candidate in candidates {
            let mut next = dp.clone();

            for picked in 0..size {
                for guards in 0..=max_guards.min(picked) {
                    let Some(current) = dp[picked][guards] else { continue };
                    let total = current + candidate.score;
                    let forwards = picked - guards;

                    if candidate.class.can_play_guard() && guards < max_guards {
                        relax(&mut next[picked + 1][guards + 1], total);
                    }
                    if candidate.class.can_play_forward() && forwards < max_forwards {
                        relax(&mut next[picked + 1][guards], total);
                    }
                }
            }

            dp = next;
        }

        (self.rules.min_guards..=max_guards)
            .filter_map(|guards| dp[size][guards])
            .max()
            .unwrap_or(0)
            .max(0)
    }
}

#[inline]
fn relax(slot: &mut Option<i64>, total: i64) {
    if slot.map_or(true, |best| total > best) {
        *slot = Some(total);
    }
}

/// Solve under the league's standard rules (5 players, 2-3 guards)
pub fn best_lineup(candidates: &[Candidate]) -> i64 {
    LineupSolver::default().best_lineup(candidates)
}
