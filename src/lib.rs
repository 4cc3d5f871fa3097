//! Double round-robin league scheduling under same-city restrictions.
//!
//! Builds a home-and-away schedule for an even number of teams, keeping
//! teams from the same city apart on the home side where a single swap can
//! do it, and refusing rosters whose same-city clusters are too dense.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Team`, `TeamRegistry`, `Round`, `Match`, `Schedule`
//! - **`graph`**: Same-city `RestrictionGraph` and largest-first greedy coloring
//! - **`scheduler`**: Feasibility gate, `ScheduleBuilder`, `ScheduleStats`
//! - **`validation`**: Roster checks before registration, schedule checks after generation
//! - **`report`**: Ordered round listing and text rendering
//! - **`error`**: `LeagueError`
//!
//! # Flow
//!
//! `TeamRegistry` → `RestrictionGraph` → feasibility gate → `ScheduleBuilder`
//! → `Schedule` → reporting.
//!
//! ```
//! use league_schedule::models::TeamRegistry;
//! use league_schedule::report::render_schedule;
//! use league_schedule::scheduler::{ScheduleBuilder, SchedulerConfig};
//!
//! let mut registry = TeamRegistry::new("Campeonato");
//! registry.add_team("FLA", "Flamengo", "Rio de Janeiro").unwrap();
//! registry.add_team("VAS", "Vasco", "Rio de Janeiro").unwrap();
//! registry.add_team("PAL", "Palmeiras", "Sao Paulo").unwrap();
//! registry.add_team("GRE", "Gremio", "Porto Alegre").unwrap();
//! registry.build_restrictions();
//!
//! let schedule = ScheduleBuilder::new(&registry)
//!     .with_config(SchedulerConfig::default().with_seed(2024))
//!     .build()
//!     .unwrap();
//! assert_eq!(schedule.round_count(), 6);
//!
//! let text = render_schedule(&schedule, &registry);
//! assert!(text.starts_with("Campeonato\nRound 1:"));
//! ```
//!
//! # References
//!
//! - de Werra (1981), "Scheduling in sports"
//! - Welsh & Powell (1967), "An upper bound for the chromatic number of a graph"

pub mod error;
pub mod graph;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;

pub use error::{LeagueError, Result};
