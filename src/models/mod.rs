//! League domain models.
//!
//! Provides the data types for a double round-robin league: the teams,
//! the registry that owns them, the per-round bipartite match structure,
//! and the finished schedule.
//!
//! | Type | Role |
//! |------|------|
//! | `Team` | Immutable identity (code, name, city) |
//! | `TeamRegistry` | Roster keyed by code, plus restriction graph |
//! | `Round` | One match-day: home side, away side, matches |
//! | `Schedule` | Round number → `Round`, both legs |

mod registry;
mod round;
mod schedule;
mod team;

pub use registry::TeamRegistry;
pub use round::{Match, Round, SlotState};
pub use schedule::Schedule;
pub use team::{Team, TeamEntry};
