//! Greedy coloring of the restriction graph.
//!
//! # Algorithm
//!
//! Largest-first greedy coloring:
//! 1. Order nodes by degree, descending. Ties keep registration order.
//! 2. Give each node the smallest color not used by an already-colored neighbor.
//!
//! Uses at most `max_degree + 1` colors. The result describes how same-city
//! clusters group together and is informational: neither the feasibility
//! gate nor the schedule builder consult it.
//!
//! # Reference
//! Welsh & Powell (1967), "An upper bound for the chromatic number of a graph
//! and its application to timetabling problems"

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::RestrictionGraph;

/// A node → color assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coloring {
    /// Color index per team code, in coloring order.
    pub colors: IndexMap<String, usize>,
}

impl Coloring {
    /// Color assigned to `code`.
    pub fn color_of(&self, code: &str) -> Option<usize> {
        self.colors.get(code).copied()
    }

    /// Number of distinct colors used.
    pub fn color_count(&self) -> usize {
        self.colors.values().collect::<BTreeSet<_>>().len()
    }

    /// Team codes grouped by color, colors ascending.
    pub fn classes(&self) -> Vec<Vec<&str>> {
        let mut classes: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        for (code, &color) in &self.colors {
            classes.entry(color).or_default().push(code.as_str());
        }
        classes.into_values().collect()
    }
}

/// Colors the graph with the largest-first greedy strategy.
pub fn greedy_coloring(graph: &RestrictionGraph) -> Coloring {
    let mut order: Vec<&str> = graph.nodes().collect();
    order.sort_by_key(|code| std::cmp::Reverse(graph.degree(code)));

    let mut colors: IndexMap<String, usize> = IndexMap::with_capacity(order.len());
    for code in order {
        let mut used: Vec<bool> = vec![false; graph.degree(code) + 1];
        for neighbor in graph.neighbors(code) {
            if let Some(&c) = colors.get(neighbor) {
                if c < used.len() {
                    used[c] = true;
                }
            }
        }
        let color = used.iter().position(|&taken| !taken).unwrap_or(used.len());
        colors.insert(code.to_string(), color);
    }

    Coloring { colors }
}
