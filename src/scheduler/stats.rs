//! Schedule quality metrics.
//!
//! Measures what the pairing heuristic leaves behind; it never changes a
//! schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Home / away games | Matches per team on each side |
//! | Longest home streak | Max consecutive rounds a team is at home |
//! | Longest away streak | Max consecutive rounds a team is away |
//! | Home-side clashes | Restricted pairs both at home in the same round |
//! | Away-side clashes | Restricted pairs both away in the same round |
//!
//! # Reference
//! Ribeiro & Urrutia (2007), "Scheduling the Brazilian soccer tournament
//! with fairness and broadcast objectives"

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::graph::RestrictionGraph;
use crate::models::{Round, Schedule};

/// Per-team side counts and streaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    /// Team code.
    pub code: String,
    /// Matches at home.
    pub home_games: usize,
    /// Matches away.
    pub away_games: usize,
    /// Longest run of consecutive home rounds.
    pub longest_home_streak: usize,
    /// Longest run of consecutive away rounds.
    pub longest_away_streak: usize,
}

/// Same-city clashes in one round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundClashes {
    /// Restricted pairs both on the home side.
    pub home: usize,
    /// Restricted pairs both on the away side.
    pub away: usize,
}

/// Schedule-wide statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStats {
    /// Per-team stats, in restriction-graph node order.
    pub teams: Vec<TeamStats>,
    /// Clashes per round number.
    pub clashes_by_round: BTreeMap<u32, RoundClashes>,
    /// Sum of home-side clashes.
    pub home_side_clashes: usize,
    /// Sum of away-side clashes.
    pub away_side_clashes: usize,
    /// Number of rounds.
    pub round_count: usize,
    /// Number of matches.
    pub match_count: usize,
}

impl ScheduleStats {
    /// Computes statistics for `schedule` against `graph`.
    pub fn calculate(schedule: &Schedule, graph: &RestrictionGraph) -> Self {
        let teams = graph
            .nodes()
            .map(|code| team_stats(schedule, code))
            .collect();

        let mut clashes_by_round = BTreeMap::new();
        let mut home_side_clashes = 0;
        let mut away_side_clashes = 0;
        for round in schedule.rounds() {
            let clashes = round_clashes(round, graph);
            home_side_clashes += clashes.home;
            away_side_clashes += clashes.away;
            clashes_by_round.insert(round.id, clashes);
        }

        Self {
            teams,
            clashes_by_round,
            home_side_clashes,
            away_side_clashes,
            round_count: schedule.round_count(),
            match_count: schedule.match_count(),
        }
    }

    /// Stats for one team.
    pub fn team(&self, code: &str) -> Option<&TeamStats> {
        self.teams.iter().find(|t| t.code == code)
    }

    /// Longest same-side streak of any team.
    pub fn max_streak(&self) -> usize {
        self.teams
            .iter()
            .map(|t| t.longest_home_streak.max(t.longest_away_streak))
            .max()
            .unwrap_or(0)
    }

    /// Total clashes on either side.
    pub fn total_clashes(&self) -> usize {
        self.home_side_clashes + self.away_side_clashes
    }
}

fn team_stats(schedule: &Schedule, code: &str) -> TeamStats {
    let mut stats = TeamStats {
        code: code.to_string(),
        home_games: 0,
        away_games: 0,
        longest_home_streak: 0,
        longest_away_streak: 0,
    };
    let mut home_run = 0;
    let mut away_run = 0;

    for round in schedule.rounds() {
        if round.match_of(code).is_none() {
            home_run = 0;
            away_run = 0;
            continue;
        }
        if round.is_home(code) {
            stats.home_games += 1;
            home_run += 1;
            away_run = 0;
        } else {
            stats.away_games += 1;
            away_run += 1;
            home_run = 0;
        }
        stats.longest_home_streak = stats.longest_home_streak.max(home_run);
        stats.longest_away_streak = stats.longest_away_streak.max(away_run);
    }

    stats
}

fn count_clashes<'a>(side: impl Iterator<Item = &'a str>, graph: &RestrictionGraph) -> usize {
    let side: Vec<&str> = side.collect();
    let mut count = 0;
    for (i, a) in side.iter().enumerate() {
        count += side[i + 1..]
            .iter()
            .filter(|b| graph.has_restriction(a, b))
            .count();
    }
    count
}

/// Restricted pairs placed on the same side of `round`.
pub fn round_clashes(round: &Round, graph: &RestrictionGraph) -> RoundClashes {
    RoundClashes {
        home: count_clashes(round.home_teams(), graph),
        away: count_clashes(round.away_teams(), graph),
    }
}
