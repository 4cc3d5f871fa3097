//! Feasibility gate for restricted double round-robin.
//!
//! # Test
//!
//! With `required = 2 * (n - 1)` and `half = required / 2`, the roster passes iff
//!
//! ```text
//! max_same_city_group_size * half <= required
//! ```
//!
//! This is a necessary-condition heuristic, not a schedulability proof. It
//! runs before any round is built so that generation either proceeds in full
//! or produces nothing.

use serde::{Deserialize, Serialize};

use crate::error::{LeagueError, Result};
use crate::graph::RestrictionGraph;
use crate::models::TeamRegistry;

/// Outcome of the feasibility test, with the numbers behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeasibilityReport {
    /// Whether generation may proceed.
    pub feasible: bool,
    /// Number of teams checked.
    pub team_count: usize,
    /// Largest same-city cluster (1 + max restriction degree).
    pub max_group_size: usize,
    /// Rounds per leg.
    pub half_rounds: usize,
    /// Rounds in the full double round-robin.
    pub required_rounds: usize,
    /// Human-readable explanation.
    pub reason: String,
}

impl FeasibilityReport {
    /// Converts a failed report into `InfeasibleRestrictions`.
    pub fn into_result(self) -> Result<Self> {
        if self.feasible {
            Ok(self)
        } else {
            Err(LeagueError::InfeasibleRestrictions {
                max_group_size: self.max_group_size,
                half_rounds: self.half_rounds,
                required_rounds: self.required_rounds,
            })
        }
    }
}

/// Checks the registry's roster against its current restrictions.
///
/// Teams registered after the last restriction build are still counted
/// against their city groups.
///
/// # Errors
/// - `OddTeamCount` for an odd roster.
/// - `NotEnoughTeams` for an empty roster.
///
/// An infeasible density is *not* an error here; it is reported through
/// `feasible = false` so callers can decide what to do.
pub fn check_feasibility(registry: &TeamRegistry) -> Result<FeasibilityReport> {
    check_graph(registry.team_count(), &registry.current_restrictions())
}

/// Checks a team count against a restriction graph.
pub fn check_graph(team_count: usize, graph: &RestrictionGraph) -> Result<FeasibilityReport> {
    if team_count % 2 != 0 {
        return Err(LeagueError::OddTeamCount { count: team_count });
    }
    if team_count < 2 {
        return Err(LeagueError::NotEnoughTeams { count: team_count });
    }

    let required_rounds = 2 * (team_count - 1);
    let half_rounds = required_rounds / 2;
    let max_group_size = graph.max_same_city_group_size();
    let load = max_group_size * half_rounds;
    let feasible = load <= required_rounds;

    let reason = if feasible {
        format!(
            "largest same-city group of {max_group_size} fits: \
             {max_group_size} x {half_rounds} = {load} <= {required_rounds} rounds"
        )
    } else {
        format!(
            "largest same-city group of {max_group_size} is too large: \
             {max_group_size} x {half_rounds} = {load} > {required_rounds} rounds"
        )
    };

    Ok(FeasibilityReport {
        feasible,
        team_count,
        max_group_size,
        half_rounds,
        required_rounds,
        reason,
    })
}
