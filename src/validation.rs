//! Input and output validation for league scheduling.
//!
//! Roster checks run before registration and report every problem at once:
//! - Duplicate team codes
//! - Empty code, name, or city fields
//! - Odd or too-small rosters
//!
//! Schedule checks re-verify a finished schedule:
//! - Every round present and holding `n / 2` matches
//! - Every pair of teams meets exactly twice, once at each venue
//! - Each second-leg round is the reversal of its first-leg round

use std::collections::{HashMap, HashSet};

use crate::models::{Match, Schedule, TeamEntry};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entries share the same code.
    DuplicateCode,
    /// An entry has an empty field.
    EmptyField,
    /// The roster size is odd.
    OddTeamCount,
    /// Fewer than two teams.
    NotEnoughTeams,
    /// A round number in `1..=total_rounds` has no round.
    MissingRound,
    /// A round number outside `1..=total_rounds`.
    UnexpectedRound,
    /// A round does not hold exactly `n / 2` matches.
    InvalidRound,
    /// The schedule's teams do not match its team count.
    TeamCountMismatch,
    /// A pair of teams does not meet exactly twice.
    MeetingCount,
    /// A pair meets twice at the same venue.
    VenueNotSwapped,
    /// A second-leg round is not the reversal of its first-leg round.
    UnmirroredRound,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates an input feed before registration.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(entries: &[TeamEntry]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut codes = HashSet::new();

    for (row, entry) in entries.iter().enumerate() {
        if !codes.insert(entry.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCode,
                format!("Duplicate team code: {}", entry.code),
            ));
        }

        for (field, value) in [
            ("code", &entry.code),
            ("name", &entry.name),
            ("city", &entry.city),
        ] {
            if value.trim().is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyField,
                    format!("Entry {} has an empty {field}", row + 1),
                ));
            }
        }
    }

    if entries.len() % 2 != 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::OddTeamCount,
            format!("Roster has an odd number of teams ({})", entries.len()),
        ));
    } else if entries.len() < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NotEnoughTeams,
            format!("Roster needs at least 2 teams, got {}", entries.len()),
        ));
    }

    finish(errors)
}

/// Validates a finished double round-robin schedule.
pub fn validate_schedule(schedule: &Schedule) -> ValidationResult {
    let mut errors = Vec::new();
    let total = schedule.total_rounds() as u32;

    for id in 1..=total {
        match schedule.round(id) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::MissingRound,
                format!("Round {id} is missing"),
            )),
            Some(round) if !round.is_valid(schedule.team_count) => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidRound,
                    format!(
                        "Round {id} has {} matches, expected {}",
                        round.match_count(),
                        schedule.team_count / 2
                    ),
                ))
            }
            Some(_) => {}
        }
    }
    for round in schedule.rounds().filter(|r| r.id == 0 || r.id > total) {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnexpectedRound,
            format!("Round {} is outside 1..={total}", round.id),
        ));
    }

    check_meetings(schedule, &mut errors);
    check_mirroring(schedule, &mut errors);

    finish(errors)
}

/// Every pair meets exactly twice, with venues swapped.
fn check_meetings(schedule: &Schedule, errors: &mut Vec<ValidationError>) {
    let mut teams: Vec<&str> = Vec::new();
    let mut seen = HashSet::new();
    let mut meetings: HashMap<(&str, &str), Vec<&Match>> = HashMap::new();

    for round in schedule.rounds() {
        for m in round.matches() {
            for code in [m.home.as_str(), m.away.as_str()] {
                if seen.insert(code) {
                    teams.push(code);
                }
            }
            meetings.entry(pair_key(&m.home, &m.away)).or_default().push(m);
        }
    }

    if teams.len() != schedule.team_count {
        errors.push(ValidationError::new(
            ValidationErrorKind::TeamCountMismatch,
            format!(
                "Schedule for {} teams involves {} teams",
                schedule.team_count,
                teams.len()
            ),
        ));
    }

    for (i, a) in teams.iter().enumerate() {
        for b in &teams[i + 1..] {
            let found = meetings.get(&pair_key(a, b)).map_or(&[][..], Vec::as_slice);
            match found {
                [first, second] => {
                    if first.home == second.home {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::VenueNotSwapped,
                            format!("{a} and {b} meet twice at {}", first.home),
                        ));
                    }
                }
                _ => errors.push(ValidationError::new(
                    ValidationErrorKind::MeetingCount,
                    format!("{a} and {b} meet {} times, expected 2", found.len()),
                )),
            }
        }
    }
}

/// Each second-leg round reverses its first-leg counterpart.
fn check_mirroring(schedule: &Schedule, errors: &mut Vec<ValidationError>) {
    for round in schedule.second_leg() {
        let Some(first) = schedule.mirror_of(round.id).and_then(|id| schedule.round(id)) else {
            continue;
        };
        let expected: HashSet<Match> = first.matches().iter().map(Match::reversed).collect();
        let actual: HashSet<Match> = round.matches().iter().cloned().collect();
        if expected != actual {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnmirroredRound,
                format!("Round {} does not reverse round {}", round.id, first.id),
            ));
        }
    }
}

fn pair_key<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
