//! Constraint graphs over team codes.
//!
//! - **`restriction`**: the undirected same-city [`RestrictionGraph`]
//! - **`coloring`**: largest-first greedy coloring of that graph, for
//!   reporting how same-city clusters group together

mod coloring;
mod restriction;

pub use coloring::{greedy_coloring, Coloring};
pub use restriction::RestrictionGraph;
