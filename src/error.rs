//! Error types for league construction and scheduling.
//!
//! Registry and precondition failures are expected outcomes that callers
//! report to the user. Round construction failures (`DuplicateTeamInRound`,
//! `InvalidPairing`) mean the pairing bookkeeping was driven incorrectly and
//! are surfaced as-is.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LeagueError>;

/// Errors raised by the registry, the feasibility gate, and round construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeagueError {
    /// A team with this code is already registered. The registry is unchanged.
    #[error("team '{code}' is already registered")]
    DuplicateTeam { code: String },

    /// Double round-robin needs an even number of teams.
    #[error("cannot schedule an odd number of teams ({count})")]
    OddTeamCount { count: usize },

    /// Fewer than two teams leaves nothing to schedule.
    #[error("at least 2 teams are required, got {count}")]
    NotEnoughTeams { count: usize },

    /// The largest same-city cluster cannot be spread over the available rounds.
    #[error(
        "restrictions too dense: largest same-city group {max_group_size} x {half_rounds} \
         rounds per leg exceeds {required_rounds} total rounds"
    )]
    InfeasibleRestrictions {
        max_group_size: usize,
        half_rounds: usize,
        required_rounds: usize,
    },

    /// The team already sits on the home or away side of this round.
    #[error("team '{code}' already placed in round {round}")]
    DuplicateTeamInRound { round: u32, code: String },

    /// Pairing endpoints are not labeled home/away as required, or already paired.
    #[error("invalid pairing {home} x {away} in round {round}: {reason}")]
    InvalidPairing {
        round: u32,
        home: String,
        away: String,
        reason: String,
    },
}
