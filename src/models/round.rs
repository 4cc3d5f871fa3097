//! Round (match-day) model.
//!
//! A round is a bipartite structure: teams are labeled home or away, and
//! each match is an edge from a home-labeled team to an away-labeled team.
//!
//! # Slot lifecycle
//!
//! Per team within one round: `Unassigned → Home | Away → Paired`.
//! The only way back to `Unassigned` is [`Round::reset`].

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{LeagueError, Result};

/// State of a team within a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotState {
    /// Not placed in this round.
    Unassigned,
    /// Labeled home, not yet paired.
    Home,
    /// Labeled away, not yet paired.
    Away,
    /// Part of a match.
    Paired,
}

/// A single home-vs-away pairing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    /// Home team code.
    pub home: String,
    /// Away team code.
    pub away: String,
}

impl Match {
    /// Creates a new match.
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
        }
    }

    /// The same fixture with venues swapped.
    pub fn reversed(&self) -> Self {
        Self::new(self.away.clone(), self.home.clone())
    }

    /// Whether `code` plays in this match.
    pub fn involves(&self, code: &str) -> bool {
        self.home == code || self.away == code
    }

    /// Whether this match is between `a` and `b`, in either direction.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.home == a && self.away == b) || (self.home == b && self.away == a)
    }
}

/// A match-day.
///
/// Deserializing replays the labels and matches through
/// [`Round::add_home`], [`Round::add_away`] and [`Round::pair`], so a stored
/// round obeys the same rules as one built in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoundData")]
pub struct Round {
    /// Round number (1-based).
    pub id: u32,
    home: IndexSet<String>,
    away: IndexSet<String>,
    matches: Vec<Match>,
}

#[derive(Deserialize)]
struct RoundData {
    id: u32,
    home: Vec<String>,
    away: Vec<String>,
    matches: Vec<Match>,
}

impl TryFrom<RoundData> for Round {
    type Error = LeagueError;

    fn try_from(data: RoundData) -> Result<Self> {
        let mut round = Round::new(data.id);
        for code in data.home {
            round.add_home(code)?;
        }
        for code in data.away {
            round.add_away(code)?;
        }
        for m in &data.matches {
            round.pair(&m.home, &m.away)?;
        }
        Ok(round)
    }
}

impl Round {
    /// Creates an empty round.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            home: IndexSet::new(),
            away: IndexSet::new(),
            matches: Vec::new(),
        }
    }

    /// Labels a team as home.
    ///
    /// # Errors
    /// `DuplicateTeamInRound` if the team is already on either side.
    pub fn add_home(&mut self, code: impl Into<String>) -> Result<()> {
        let code = code.into();
        self.ensure_absent(&code)?;
        self.home.insert(code);
        Ok(())
    }

    /// Labels a team as away.
    ///
    /// # Errors
    /// `DuplicateTeamInRound` if the team is already on either side.
    pub fn add_away(&mut self, code: impl Into<String>) -> Result<()> {
        let code = code.into();
        self.ensure_absent(&code)?;
        self.away.insert(code);
        Ok(())
    }

    /// Records a match between a home-labeled and an away-labeled team.
    ///
    /// # Errors
    /// `InvalidPairing` if `home` is not labeled home, `away` is not labeled
    /// away, or either team is already paired in this round.
    pub fn pair(&mut self, home: &str, away: &str) -> Result<()> {
        let reason = match (self.slot(home), self.slot(away)) {
            (SlotState::Home, SlotState::Away) => None,
            (SlotState::Paired, _) => Some(format!("'{home}' is already paired")),
            (_, SlotState::Paired) => Some(format!("'{away}' is already paired")),
            (SlotState::Home, _) => Some(format!("'{away}' is not an away team")),
            _ => Some(format!("'{home}' is not a home team")),
        };

        if let Some(reason) = reason {
            return Err(LeagueError::InvalidPairing {
                round: self.id,
                home: home.to_string(),
                away: away.to_string(),
                reason,
            });
        }

        self.matches.push(Match::new(home, away));
        Ok(())
    }

    /// Labels both teams and pairs them in one step.
    pub fn add_match(&mut self, home: &str, away: &str) -> Result<()> {
        self.add_home(home)?;
        self.add_away(away)?;
        self.pair(home, away)
    }

    /// Current slot state of a team.
    pub fn slot(&self, code: &str) -> SlotState {
        let labeled_home = self.home.contains(code);
        if !labeled_home && !self.away.contains(code) {
            SlotState::Unassigned
        } else if self.matches.iter().any(|m| m.involves(code)) {
            SlotState::Paired
        } else if labeled_home {
            SlotState::Home
        } else {
            SlotState::Away
        }
    }

    /// Whether the team is labeled home (paired or not).
    pub fn is_home(&self, code: &str) -> bool {
        self.home.contains(code)
    }

    /// Whether the team is labeled away (paired or not).
    pub fn is_away(&self, code: &str) -> bool {
        self.away.contains(code)
    }

    /// Whether the team takes part in this round.
    pub fn contains(&self, code: &str) -> bool {
        self.is_home(code) || self.is_away(code)
    }

    /// Home-labeled teams, in placement order.
    pub fn home_teams(&self) -> impl Iterator<Item = &str> {
        self.home.iter().map(String::as_str)
    }

    /// Away-labeled teams, in placement order.
    pub fn away_teams(&self) -> impl Iterator<Item = &str> {
        self.away.iter().map(String::as_str)
    }

    /// Matches in insertion order.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Number of matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Whether the round has no matches.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The match `code` plays in, if any.
    pub fn match_of(&self, code: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.involves(code))
    }

    /// A round over `team_count` teams is valid iff it holds `team_count / 2` matches.
    pub fn is_valid(&self, team_count: usize) -> bool {
        self.matches.len() == team_count / 2
    }

    /// Builds a new round with every match of this one reversed, in the same order.
    pub fn mirrored(&self, id: u32) -> Result<Round> {
        let mut round = Round::new(id);
        for m in &self.matches {
            let r = m.reversed();
            round.add_match(&r.home, &r.away)?;
        }
        Ok(round)
    }

    /// Clears all labels and matches.
    pub fn reset(&mut self) {
        self.home.clear();
        self.away.clear();
        self.matches.clear();
    }

    fn ensure_absent(&self, code: &str) -> Result<()> {
        if self.contains(code) {
            return Err(LeagueError::DuplicateTeamInRound {
                round: self.id,
                code: code.to_string(),
            });
        }
        Ok(())
    }
}
