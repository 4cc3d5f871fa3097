//! Team model.
//!
//! A team is an immutable identity record. Its short code is the primary
//! key; everything outside the registry refers to a team by code only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered team.
///
/// Fields are read-only once the team is registered: the registry hands
/// out shared references, and identity never changes after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique short code (e.g. "FLA").
    pub code: String,
    /// Full team name.
    pub name: String,
    /// Home city. Teams sharing a city are restricted against each other.
    pub city: String,
}

impl Team {
    /// Creates a new team.
    pub fn new(code: impl Into<String>, name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            city: city.into(),
        }
    }

    /// Whether this team and `other` are distinct teams from the same city.
    pub fn shares_city_with(&self, other: &Team) -> bool {
        self.code != other.code && self.city == other.city
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.code, self.name, self.city)
    }
}

/// One `(code, name, city)` record of the input feed.
///
/// Collaborators (CSV readers, JSON payloads) produce these; the registry
/// turns them into [`Team`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub code: String,
    pub name: String,
    pub city: String,
}

impl TeamEntry {
    /// Creates a new input record.
    pub fn new(code: impl Into<String>, name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            city: city.into(),
        }
    }
}

impl From<TeamEntry> for Team {
    fn from(entry: TeamEntry) -> Self {
        Team::new(entry.code, entry.name, entry.city)
    }
}
