//! Same-city restriction graph.
//!
//! Undirected graph over team codes. An edge `{a, b}` exists iff `a != b`
//! and both teams share a home city. Stored as an adjacency map from code to
//! the set of restricted codes, so edge tests are O(1) and iteration follows
//! registration order.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Team;

/// Undirected "same city" constraint graph.
///
/// Deserialization rejects self-loops and one-sided edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GraphData")]
pub struct RestrictionGraph {
    adjacency: IndexMap<String, IndexSet<String>>,
}

/// Wire form of [`RestrictionGraph`], checked before it becomes a graph.
#[derive(Deserialize)]
struct GraphData {
    adjacency: IndexMap<String, IndexSet<String>>,
}

impl TryFrom<GraphData> for RestrictionGraph {
    type Error = String;

    fn try_from(data: GraphData) -> Result<Self, Self::Error> {
        for (code, neighbors) in &data.adjacency {
            for other in neighbors {
                if other == code {
                    return Err(format!("self-restriction on '{code}'"));
                }
                let mirrored = data
                    .adjacency
                    .get(other)
                    .is_some_and(|back| back.contains(code));
                if !mirrored {
                    return Err(format!("restriction '{code}' -> '{other}' is one-sided"));
                }
            }
        }
        Ok(Self {
            adjacency: data.adjacency,
        })
    }
}

impl RestrictionGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an isolated node. Returns `false` if it already existed.
    pub fn add_node(&mut self, code: impl Into<String>) -> bool {
        let code = code.into();
        if self.adjacency.contains_key(&code) {
            return false;
        }
        self.adjacency.insert(code, IndexSet::new());
        true
    }

    /// Adds the undirected edge `{a, b}`, creating missing nodes.
    ///
    /// Self-loops are ignored. Returns `true` only if the edge is new.
    pub fn add_edge(&mut self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        let inserted = self
            .adjacency
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.adjacency
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
        inserted
    }

    /// Graph of the given roster: one node per team, edges per shared city.
    pub fn from_teams<'a, I>(teams: I) -> Self
    where
        I: IntoIterator<Item = &'a Team>,
    {
        let mut graph = Self::new();
        graph.build_restrictions(teams);
        graph
    }

    /// Adds an edge for every unordered pair of distinct teams sharing a city.
    ///
    /// O(n²) over the roster. Re-running on an unchanged roster adds nothing.
    /// Returns the number of newly created edges.
    pub fn build_restrictions<'a, I>(&mut self, teams: I) -> usize
    where
        I: IntoIterator<Item = &'a Team>,
    {
        let teams: Vec<&Team> = teams.into_iter().collect();
        let mut created = 0;

        for (i, first) in teams.iter().enumerate() {
            self.add_node(first.code.as_str());
            for second in &teams[i + 1..] {
                if first.shares_city_with(second) && self.add_edge(&first.code, &second.code) {
                    debug!(a = %first.code, b = %second.code, city = %first.city, "restriction added");
                    created += 1;
                }
            }
        }

        created
    }

    /// Whether `a` and `b` must not be clustered on the same side of a round.
    pub fn has_restriction(&self, a: &str, b: &str) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|neighbors| neighbors.contains(b))
    }

    /// Whether the code is a node of the graph.
    pub fn contains(&self, code: &str) -> bool {
        self.adjacency.contains_key(code)
    }

    /// Codes restricted against `code`, in insertion order.
    pub fn neighbors(&self, code: &str) -> impl Iterator<Item = &str> {
        self.adjacency
            .get(code)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Number of other teams sharing `code`'s city (0 for unknown codes).
    pub fn degree(&self, code: &str) -> usize {
        self.adjacency.get(code).map_or(0, IndexSet::len)
    }

    /// Node codes in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Each undirected edge once, as `(earlier, later)` in node order.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut edges = Vec::new();
        for (idx, (code, neighbors)) in self.adjacency.iter().enumerate() {
            for other in neighbors {
                let later = self
                    .adjacency
                    .get_index_of(other)
                    .is_some_and(|other_idx| other_idx > idx);
                if later {
                    edges.push((code.as_str(), other.as_str()));
                }
            }
        }
        edges
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(IndexSet::len).sum::<usize>() / 2
    }

    /// Size of the largest same-city cluster: 1 + maximum degree.
    ///
    /// Returns 0 for an empty graph.
    pub fn max_same_city_group_size(&self) -> usize {
        self.adjacency
            .values()
            .map(|neighbors| neighbors.len() + 1)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_teams() -> Vec<Team> {
        vec![
            Team::new("FLA", "Flamengo", "Rio de Janeiro"),
            Team::new("VAS", "Vasco", "Rio de Janeiro"),
            Team::new("FLU", "Fluminense", "Rio de Janeiro"),
            Team::new("PAL", "Palmeiras", "Sao Paulo"),
            Team::new("COR", "Corinthians", "Sao Paulo"),
            Team::new("GRE", "Gremio", "Porto Alegre"),
        ]
    }

    #[test]
    fn test_build_restrictions() {
        let teams = sample_teams();
        let mut g = RestrictionGraph::new();
        let created = g.build_restrictions(&teams);

        // Rio: 3 edges, Sao Paulo: 1 edge.
        assert_eq!(created, 4);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.node_count(), 6);
        assert!(g.has_restriction("FLA", "VAS"));
        assert!(g.has_restriction("VAS", "FLA"));
        assert!(g.has_restriction("PAL", "COR"));
        assert!(!g.has_restriction("FLA", "PAL"));
        assert!(!g.has_restriction("GRE", "GRE"));
    }

    #[test]
    fn test_build_is_idempotent() {
        let teams = sample_teams();
        let mut g = RestrictionGraph::new();
        g.build_restrictions(&teams);
        let before = g.clone();

        assert_eq!(g.build_restrictions(&teams), 0);
        assert_eq!(g, before);
        assert_eq!(g.edges(), before.edges());
    }

    #[test]
    fn test_degree_and_group_size() {
        let teams = sample_teams();
        let mut g = RestrictionGraph::new();
        g.build_restrictions(&teams);

        assert_eq!(g.degree("FLA"), 2);
        assert_eq!(g.degree("COR"), 1);
        assert_eq!(g.degree("GRE"), 0);
        assert_eq!(g.degree("NONE"), 0);
        assert_eq!(g.max_same_city_group_size(), 3);
    }

    #[test]
    fn test_empty_graph_group_size() {
        assert_eq!(RestrictionGraph::new().max_same_city_group_size(), 0);
    }

    #[test]
    fn test_isolated_nodes_group_size() {
        let mut g = RestrictionGraph::new();
        g.add_node("A");
        g.add_node("B");
        assert_eq!(g.max_same_city_group_size(), 1);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_no_self_loops() {
        let mut g = RestrictionGraph::new();
        assert!(!g.add_edge("A", "A"));
        assert_eq!(g.edge_count(), 0);
        assert!(!g.has_restriction("A", "A"));
    }

    #[test]
    fn test_edges_listed_once() {
        let mut g = RestrictionGraph::new();
        g.add_node("A");
        g.add_node("B");
        g.add_node("C");
        g.add_edge("C", "A");
        g.add_edge("A", "B");

        assert_eq!(g.edges(), vec![("A", "C"), ("A", "B")]);
        let neighbors: Vec<&str> = g.neighbors("A").collect();
        assert_eq!(neighbors, vec!["C", "B"]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let g = RestrictionGraph::from_teams(&sample_teams());
        let json = serde_json::to_string(&g).unwrap();
        let back: RestrictionGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
        assert_eq!(back.edges(), g.edges());
    }

    #[test]
    fn test_deserialize_rejects_self_loop() {
        let json = r#"{"adjacency":{"A":["A"]}}"#;
        let err = serde_json::from_str::<RestrictionGraph>(json).unwrap_err();
        assert!(err.to_string().contains("self-restriction"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_one_sided_edge() {
        let json = r#"{"adjacency":{"A":["B"],"B":[]}}"#;
        assert!(serde_json::from_str::<RestrictionGraph>(json).is_err());

        let json = r#"{"adjacency":{"A":["Z"]}}"#;
        assert!(serde_json::from_str::<RestrictionGraph>(json).is_err());
    }
}
