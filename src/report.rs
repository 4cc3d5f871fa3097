//! Read-only schedule reporting.
//!
//! Rounds come out in ascending round number; matches inside a round keep
//! their insertion order. Rounds without matches are reported as empty, not
//! skipped.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Match, Schedule, TeamRegistry};

/// One round's matches, flattened for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    /// Round number.
    pub id: u32,
    /// Matches in insertion order.
    pub matches: Vec<Match>,
}

/// Lists every round with its matches.
pub fn list_rounds(schedule: &Schedule) -> Vec<RoundReport> {
    schedule
        .rounds()
        .map(|round| RoundReport {
            id: round.id,
            matches: round.matches().to_vec(),
        })
        .collect()
}

/// Text rendering of a schedule, resolving codes to team names.
///
/// Codes the registry does not know are printed as-is.
pub struct ScheduleDisplay<'a> {
    schedule: &'a Schedule,
    registry: &'a TeamRegistry,
}

impl fmt::Display for ScheduleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.schedule.name)?;
        for round in self.schedule.rounds() {
            writeln!(f, "Round {}:", round.id)?;
            if round.is_empty() {
                writeln!(f, "  (no matches)")?;
            }
            for m in round.matches() {
                writeln!(f, "  {} x {}", self.label(&m.home), self.label(&m.away))?;
            }
        }
        Ok(())
    }
}

impl ScheduleDisplay<'_> {
    fn label(&self, code: &str) -> String {
        match self.registry.team(code) {
            Some(team) => format!("{} ({})", team.name, team.code),
            None => code.to_string(),
        }
    }
}

/// Wraps a schedule for display.
pub fn display_schedule<'a>(
    schedule: &'a Schedule,
    registry: &'a TeamRegistry,
) -> ScheduleDisplay<'a> {
    ScheduleDisplay { schedule, registry }
}

/// Renders every round, one match per line (`Home (HOM) x Away (AWY)`).
pub fn render_schedule(schedule: &Schedule, registry: &TeamRegistry) -> String {
    display_schedule(schedule, registry).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Round;

    fn fixture() -> (Schedule, TeamRegistry) {
        let mut reg = TeamRegistry::new("Copa Teste");
        reg.add_team("FLA", "Flamengo", "Rio").unwrap();
        reg.add_team("PAL", "Palmeiras", "SP").unwrap();

        let mut s = Schedule::new("Copa Teste", 2);
        let mut r2 = Round::new(2);
        r2.add_match("PAL", "FLA").unwrap();
        s.add_round(r2);
        let mut r1 = Round::new(1);
        r1.add_match("FLA", "PAL").unwrap();
        s.add_round(r1);
        (s, reg)
    }

    #[test]
    fn test_list_rounds_order() {
        let (s, _) = fixture();
        let rounds = list_rounds(&s);
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].id, 1);
        assert_eq!(rounds[0].matches, vec![Match::new("FLA", "PAL")]);
        assert_eq!(rounds[1].matches, vec![Match::new("PAL", "FLA")]);
    }

    #[test]
    fn test_list_rounds_keeps_insertion_order() {
        let mut s = Schedule::new("x", 4);
        let mut r = Round::new(1);
        r.add_match("D", "C").unwrap();
        r.add_match("A", "B").unwrap();
        s.add_round(r);

        let rounds = list_rounds(&s);
        assert_eq!(
            rounds[0].matches,
            vec![Match::new("D", "C"), Match::new("A", "B")]
        );
    }

    #[test]
    fn test_empty_round_reported() {
        let mut s = Schedule::new("x", 2);
        s.add_round(Round::new(1));
        let rounds = list_rounds(&s);
        assert_eq!(rounds.len(), 1);
        assert!(rounds[0].matches.is_empty());

        let text = render_schedule(&s, &TeamRegistry::new("x"));
        assert!(text.contains("Round 1:\n  (no matches)"));
    }

    #[test]
    fn test_render_schedule() {
        let (s, reg) = fixture();
        let text = render_schedule(&s, &reg);
        assert_eq!(
            text,
            "Copa Teste\n\
             Round 1:\n  Flamengo (FLA) x Palmeiras (PAL)\n\
             Round 2:\n  Palmeiras (PAL) x Flamengo (FLA)\n"
        );
    }

    #[test]
    fn test_render_unknown_code() {
        let mut s = Schedule::new("x", 2);
        let mut r = Round::new(1);
        r.add_match("AAA", "BBB").unwrap();
        s.add_round(r);
        let text = render_schedule(&s, &TeamRegistry::new("x"));
        assert!(text.contains("  AAA x BBB"));
    }
}
