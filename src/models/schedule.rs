//! Schedule (solution) model.
//!
//! A double round-robin schedule for `n` teams has `2 * (n - 1)` rounds.
//! Rounds `1..=n-1` form the first leg; round `k + (n - 1)` of the second
//! leg is the venue reversal of first-leg round `k`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Match, Round};

/// A complete (or in-progress) double round-robin schedule.
///
/// Rounds are keyed by round number and always iterate in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleData")]
pub struct Schedule {
    /// Championship name.
    pub name: String,
    /// Number of teams the schedule was built for.
    pub team_count: usize,
    rounds: BTreeMap<u32, Round>,
}

#[derive(Deserialize)]
struct ScheduleData {
    name: String,
    team_count: usize,
    rounds: BTreeMap<u32, Round>,
}

impl TryFrom<ScheduleData> for Schedule {
    type Error = String;

    fn try_from(data: ScheduleData) -> Result<Self, Self::Error> {
        if let Some((key, round)) = data.rounds.iter().find(|(key, r)| **key != r.id) {
            return Err(format!("round {} stored under key {key}", round.id));
        }
        Ok(Self {
            name: data.name,
            team_count: data.team_count,
            rounds: data.rounds,
        })
    }
}

impl Schedule {
    /// Creates an empty schedule for `team_count` teams.
    pub fn new(name: impl Into<String>, team_count: usize) -> Self {
        Self {
            name: name.into(),
            team_count,
            rounds: BTreeMap::new(),
        }
    }

    /// Rounds a full double round-robin needs: `2 * (team_count - 1)`.
    pub fn total_rounds(&self) -> usize {
        2 * self.half_rounds()
    }

    /// Rounds per leg: `team_count - 1`.
    pub fn half_rounds(&self) -> usize {
        self.team_count.saturating_sub(1)
    }

    /// Adds a round, replacing any round with the same number.
    pub fn add_round(&mut self, round: Round) -> Option<Round> {
        self.rounds.insert(round.id, round)
    }

    /// Looks up a round by number.
    pub fn round(&self, id: u32) -> Option<&Round> {
        self.rounds.get(&id)
    }

    /// All rounds, ascending by number.
    pub fn rounds(&self) -> impl Iterator<Item = &Round> {
        self.rounds.values()
    }

    /// First-leg rounds (`1..=half_rounds`).
    pub fn first_leg(&self) -> impl Iterator<Item = &Round> {
        let half = self.half_rounds() as u32;
        self.rounds.values().filter(move |r| r.id <= half)
    }

    /// Second-leg rounds (`half_rounds + 1..=total_rounds`).
    pub fn second_leg(&self) -> impl Iterator<Item = &Round> {
        let half = self.half_rounds() as u32;
        self.rounds.values().filter(move |r| r.id > half)
    }

    /// The first-leg round that `id` mirrors, if `id` is a second-leg round.
    pub fn mirror_of(&self, id: u32) -> Option<u32> {
        let half = self.half_rounds() as u32;
        (id > half && id <= 2 * half).then(|| id - half)
    }

    /// Number of rounds stored.
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Whether no rounds are stored.
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Total number of matches across all rounds.
    pub fn match_count(&self) -> usize {
        self.rounds.values().map(Round::match_count).sum()
    }

    /// Every match `code` plays, with its round number.
    pub fn matches_for_team(&self, code: &str) -> Vec<(u32, &Match)> {
        self.rounds
            .values()
            .filter_map(|r| r.match_of(code).map(|m| (r.id, m)))
            .collect()
    }

    /// Every meeting between `a` and `b`, with its round number.
    pub fn meetings(&self, a: &str, b: &str) -> Vec<(u32, &Match)> {
        self.rounds
            .values()
            .flat_map(move |r| {
                r.matches()
                    .iter()
                    .filter(move |m| m.is_between(a, b))
                    .map(move |m| (r.id, m))
            })
            .collect()
    }

    /// Whether every required round is present and valid.
    pub fn is_complete(&self) -> bool {
        self.round_count() == self.total_rounds()
            && (1..=self.total_rounds() as u32).all(|id| {
                self.round(id)
                    .is_some_and(|r| r.is_valid(self.team_count))
            })
    }
}
