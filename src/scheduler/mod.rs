//! Round-robin scheduling and schedule metrics.
//!
//! Generation runs in a fixed order: feasibility gate, randomized first
//! leg, mirrored second leg.
//!
//! # Algorithm
//!
//! `ScheduleBuilder` seats teams in random order and pairs them with the
//! circle method, repairing same-city clustering on the home side with a
//! single home/away swap per pairing. It does not backtrack and makes no
//! balance or optimality guarantee beyond the feasibility heuristic.
//!
//! # Metrics
//!
//! `ScheduleStats` reports side counts, streaks, and same-city clashes
//! remaining in a finished schedule.
//!
//! # References
//!
//! - de Werra (1981), "Scheduling in sports"
//! - Kendall et al. (2010), "Scheduling in sports: An annotated bibliography"

mod config;
mod feasibility;
mod round_robin;
mod stats;

pub use config::SchedulerConfig;
pub use feasibility::{check_feasibility, check_graph, FeasibilityReport};
pub use round_robin::ScheduleBuilder;
pub use stats::{round_clashes, RoundClashes, ScheduleStats, TeamStats};
