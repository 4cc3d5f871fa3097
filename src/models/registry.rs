//! Team registry.
//!
//! Owns the roster and the restriction graph together: registering a team
//! always creates its graph node, so the two can never drift apart.
//!
//! Edges are derived by [`TeamRegistry::build_restrictions`]. Registering a
//! team after (or without) a build marks the edge set stale, and
//! [`TeamRegistry::current_restrictions`] rebuilds it on the fly for readers
//! that need the full invariant.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::{debug, warn};

use super::{Team, TeamEntry};
use crate::error::{LeagueError, Result};
use crate::graph::RestrictionGraph;

/// Roster of uniquely-coded teams plus their same-city restriction graph.
///
/// Serializes as its name and team list; deserializing replays every team
/// through [`TeamRegistry::add_team`] and rebuilds the restrictions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RegistryData", into = "RegistryData")]
pub struct TeamRegistry {
    /// Championship name.
    pub name: String,
    teams: IndexMap<String, Team>,
    restrictions: RestrictionGraph,
    restrictions_stale: bool,
}

/// Wire form of [`TeamRegistry`].
#[derive(Serialize, Deserialize)]
struct RegistryData {
    name: String,
    teams: Vec<Team>,
}

impl From<TeamRegistry> for RegistryData {
    fn from(registry: TeamRegistry) -> Self {
        Self {
            name: registry.name,
            teams: registry.teams.into_values().collect(),
        }
    }
}

impl TryFrom<RegistryData> for TeamRegistry {
    type Error = LeagueError;

    fn try_from(data: RegistryData) -> Result<Self> {
        Self::from_entries(
            data.name,
            data.teams
                .into_iter()
                .map(|t| TeamEntry::new(t.code, t.name, t.city)),
        )
    }
}

impl TeamRegistry {
    /// Creates an empty registry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            teams: IndexMap::new(),
            restrictions: RestrictionGraph::new(),
            restrictions_stale: false,
        }
    }

    /// Builds a registry from an input feed, then derives restrictions.
    ///
    /// Stops at the first duplicate code.
    pub fn from_entries<I>(name: impl Into<String>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = TeamEntry>,
    {
        let mut registry = Self::new(name);
        for entry in entries {
            registry.add_team(entry.code, entry.name, entry.city)?;
        }
        registry.build_restrictions();
        Ok(registry)
    }

    /// Registers a team and adds its node to the restriction graph.
    ///
    /// No edges are added here; the restrictions stay stale until the next
    /// [`build_restrictions`](Self::build_restrictions).
    ///
    /// # Errors
    /// `DuplicateTeam` if the code is taken; the registry is left unchanged.
    pub fn add_team(
        &mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<&Team> {
        let code = code.into();
        if self.teams.contains_key(&code) {
            return Err(LeagueError::DuplicateTeam { code });
        }

        let team = Team::new(code.clone(), name, city);
        debug!(code = %team.code, city = %team.city, "team registered");
        self.restrictions.add_node(code.clone());
        self.restrictions_stale = true;
        let (idx, _) = self.teams.insert_full(code, team);
        Ok(&self.teams[idx])
    }

    /// Adds a restriction edge for every pair of registered teams sharing a city.
    ///
    /// Returns the number of new edges; zero when re-run on an unchanged roster.
    pub fn build_restrictions(&mut self) -> usize {
        self.restrictions_stale = false;
        self.restrictions.build_restrictions(self.teams.values())
    }

    /// Whether teams were registered since the last restriction build.
    pub fn restrictions_stale(&self) -> bool {
        self.restrictions_stale
    }

    /// Number of registered teams.
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Whether no teams are registered.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Looks up a team by code.
    pub fn team(&self, code: &str) -> Option<&Team> {
        self.teams.get(code)
    }

    /// Teams in registration order.
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    /// Team codes in registration order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }

    /// The restriction graph as last built.
    pub fn restrictions(&self) -> &RestrictionGraph {
        &self.restrictions
    }

    /// The restriction graph for the current roster.
    ///
    /// Borrows the stored graph when it is up to date; otherwise derives a
    /// fresh one from the roster without touching the registry.
    pub fn current_restrictions(&self) -> Cow<'_, RestrictionGraph> {
        if !self.restrictions_stale {
            return Cow::Borrowed(&self.restrictions);
        }
        warn!(
            championship = %self.name,
            teams = self.teams.len(),
            "restrictions not rebuilt since last registration, deriving them"
        );
        Cow::Owned(RestrictionGraph::from_teams(self.teams.values()))
    }
}
