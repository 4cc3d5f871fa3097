//! Randomized double round-robin builder with same-city repair.
//!
//! # Algorithm
//!
//! 1. Gate: odd rosters and rosters failing the feasibility test are rejected
//!    before any round exists.
//! 2. Seat the teams in a uniformly shuffled order.
//! 3. First leg, round `r` (0-based): keep seat 0 fixed and rotate the other
//!    seats by `r` (circle method). Pair position `i` from the front (home)
//!    with position `i` from the back (away).
//! 4. Process the round's candidate pairings in a freshly shuffled order. If
//!    the prospective home team is restricted against any team already on
//!    the home side of this round, swap home/away for that pairing. One swap
//!    only; a clash that survives it is accepted.
//! 5. Second leg: round `half + k` is first-leg round `k` with every match
//!    reversed, in the same order.
//!
//! # Complexity
//! O(n² · d) where n = teams and d = max restriction degree.
//!
//! # Reference
//! de Werra (1981), "Scheduling in sports" (circle method, mirrored legs)

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use super::{check_graph, FeasibilityReport, SchedulerConfig};
use crate::error::Result;
use crate::graph::RestrictionGraph;
use crate::models::{Round, Schedule, TeamRegistry};

/// Builds double round-robin schedules for a registry.
///
/// # Example
///
/// ```
/// use league_schedule::models::TeamRegistry;
/// use league_schedule::scheduler::{ScheduleBuilder, SchedulerConfig};
///
/// let mut registry = TeamRegistry::new("Cup");
/// registry.add_team("FLA", "Flamengo", "Rio de Janeiro").unwrap();
/// registry.add_team("PAL", "Palmeiras", "Sao Paulo").unwrap();
/// registry.add_team("GRE", "Gremio", "Porto Alegre").unwrap();
/// registry.add_team("CAM", "Atletico", "Belo Horizonte").unwrap();
/// registry.build_restrictions();
///
/// let schedule = ScheduleBuilder::new(&registry)
///     .with_config(SchedulerConfig::default().with_seed(7))
///     .build()
///     .unwrap();
/// assert_eq!(schedule.round_count(), 6);
/// assert!(schedule.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleBuilder<'a> {
    registry: &'a TeamRegistry,
    config: SchedulerConfig,
}

impl<'a> ScheduleBuilder<'a> {
    /// Creates a builder with the default configuration.
    pub fn new(registry: &'a TeamRegistry) -> Self {
        Self {
            registry,
            config: SchedulerConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds a schedule using the RNG described by the configuration.
    ///
    /// # Errors
    /// - `OddTeamCount` / `NotEnoughTeams` for unusable rosters.
    /// - `InfeasibleRestrictions` when the feasibility gate fails.
    ///
    /// On error no rounds are produced.
    pub fn build(&self) -> Result<Schedule> {
        let mut rng = self.config.rng();
        self.build_with_rng(&mut rng)
    }

    /// Builds a schedule drawing randomness from `rng`.
    pub fn build_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Schedule> {
        let graph = self.registry.current_restrictions();
        let report = check_graph(self.registry.team_count(), &graph)
            .and_then(FeasibilityReport::into_result)
            .inspect_err(|e| warn!(error = %e, "schedule generation aborted"))?;

        let team_count = self.registry.team_count();
        let half = report.half_rounds;
        info!(
            championship = %self.registry.name,
            teams = team_count,
            rounds = report.required_rounds,
            "generating schedule"
        );

        let mut seating: Vec<&str> = self.registry.codes().collect();
        seating.shuffle(rng);

        let mut first_leg = Vec::with_capacity(half);
        for r in 0..half {
            first_leg.push(self.first_leg_round(r, &seating, &graph, rng)?);
        }

        let mut schedule = Schedule::new(self.registry.name.clone(), team_count);
        for round in first_leg {
            let mirrored = round.mirrored(round.id + half as u32)?;
            schedule.add_round(round);
            schedule.add_round(mirrored);
        }

        info!(
            rounds = schedule.round_count(),
            matches = schedule.match_count(),
            "schedule generated"
        );
        Ok(schedule)
    }

    /// Builds first-leg round `index + 1` from the rotated seating.
    fn first_leg_round<R: Rng + ?Sized>(
        &self,
        index: usize,
        seating: &[&str],
        graph: &RestrictionGraph,
        rng: &mut R,
    ) -> Result<Round> {
        let arrangement = rotate_seats(seating, index);
        let n = arrangement.len();
        let mut candidates: Vec<(&str, &str)> = (0..n / 2)
            .map(|i| (arrangement[i], arrangement[n - 1 - i]))
            .collect();
        candidates.shuffle(rng);

        let mut round = Round::new(index as u32 + 1);
        for (mut home, mut away) in candidates {
            if self.config.repair_home_clashes && clashes_with_home_side(&round, home, graph) {
                std::mem::swap(&mut home, &mut away);
                if clashes_with_home_side(&round, home, graph) {
                    warn!(
                        round = round.id,
                        home, away, "same-city clash on home side left unresolved"
                    );
                }
            }
            round.add_home(home)?;
            round.add_away(away)?;
            round.pair(home, away)?;
        }

        debug!(round = round.id, matches = round.match_count(), "round built");
        Ok(round)
    }
}

/// Whether `code` shares a city with a team already at home in `round`.
fn clashes_with_home_side(round: &Round, code: &str, graph: &RestrictionGraph) -> bool {
    round
        .home_teams()
        .any(|placed| graph.has_restriction(code, placed))
}

/// Circle-method arrangement for round `index`: seat 0 stays put, the rest
/// rotate by `index` positions.
fn rotate_seats<'s>(seating: &[&'s str], index: usize) -> Vec<&'s str> {
    let Some((&fixed, rest)) = seating.split_first() else {
        return Vec::new();
    };
    let m = rest.len();
    let mut arrangement = Vec::with_capacity(seating.len());
    arrangement.push(fixed);
    arrangement.extend((0..m).map(|j| rest[(j + index) % m]));
    arrangement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LeagueError;
    use crate::models::Match;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn registry(cities: &[&str]) -> TeamRegistry {
        let mut reg = TeamRegistry::new("Test League");
        for (i, city) in cities.iter().enumerate() {
            reg.add_team(format!("T{i:02}"), format!("Team {i}"), *city)
                .unwrap();
        }
        reg.build_restrictions();
        reg
    }

    fn distinct_cities(n: usize) -> TeamRegistry {
        let cities: Vec<String> = (0..n).map(|i| format!("City {i}")).collect();
        let refs: Vec<&str> = cities.iter().map(String::as_str).collect();
        registry(&refs)
    }

    fn build(reg: &TeamRegistry, seed: u64) -> Result<Schedule> {
        ScheduleBuilder::new(reg)
            .with_config(SchedulerConfig::default().with_seed(seed))
            .build()
    }

    #[test]
    fn test_four_distinct_cities() {
        let reg = distinct_cities(4);
        let s = build(&reg, 1).unwrap();

        assert_eq!(s.round_count(), 6);
        for round in s.rounds() {
            assert!(round.is_valid(4), "round {} invalid", round.id);
            assert_eq!(round.match_count(), 2);
        }
    }

    #[test]
    fn test_every_pair_meets_twice_with_swapped_venues() {
        for n in [2, 4, 6, 8, 10] {
            let reg = distinct_cities(n);
            for seed in 0..20 {
                let s = build(&reg, seed).unwrap();
                assert_eq!(s.total_rounds(), 2 * (n - 1));
                assert!(s.is_complete());

                let codes: Vec<&str> = reg.codes().collect();
                for (i, a) in codes.iter().enumerate() {
                    for b in &codes[i + 1..] {
                        let meetings = s.meetings(a, b);
                        assert_eq!(meetings.len(), 2, "{a} vs {b}, n={n}, seed={seed}");
                        assert_eq!(meetings[0].1.reversed(), *meetings[1].1);
                    }
                }
            }
        }
    }

    #[test]
    fn test_second_leg_mirrors_first_leg() {
        let reg = distinct_cities(6);
        let s = build(&reg, 3).unwrap();

        for first in s.first_leg() {
            let second = s.round(first.id + 5).unwrap();
            let expected: Vec<Match> = first.matches().iter().map(Match::reversed).collect();
            assert_eq!(second.matches(), expected.as_slice());

            let m = &first.matches()[0];
            let involving: Vec<&Match> = second
                .matches()
                .iter()
                .filter(|x| x.involves(&m.home) || x.involves(&m.away))
                .collect();
            assert_eq!(involving, vec![&m.reversed()]);
        }
    }

    #[test]
    fn test_no_team_on_both_sides() {
        let reg = registry(&["A", "A", "B", "B", "C", "C", "D", "E"]);
        let s = build(&reg, 11).unwrap();
        for round in s.rounds() {
            let home: HashSet<&str> = round.home_teams().collect();
            let away: HashSet<&str> = round.away_teams().collect();
            assert!(home.is_disjoint(&away));
            assert_eq!(home.len() + away.len(), 8);
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let reg = registry(&["A", "A", "B", "C", "D", "E"]);
        assert_eq!(build(&reg, 42).unwrap(), build(&reg, 42).unwrap());
    }

    #[test]
    fn test_build_with_external_rng() {
        let reg = distinct_cities(4);
        let mut rng = StdRng::seed_from_u64(5);
        let s = ScheduleBuilder::new(&reg).build_with_rng(&mut rng).unwrap();
        assert!(s.is_complete());
        assert_eq!(s.name, "Test League");
    }

    #[test]
    fn test_repair_keeps_pairs_apart_at_home() {
        // Two teams from one city, everyone else distinct. The pairing that
        // places the second same-city team at home is swapped, so no round
        // ends with both at home unless they play each other.
        let reg = registry(&["Rio", "Rio", "B", "C", "D", "E"]);
        for seed in 0..30 {
            let s = build(&reg, seed).unwrap();
            for round in s.first_leg() {
                let both_home = round.is_home("T00") && round.is_home("T01");
                assert!(!both_home, "seed {seed} round {}", round.id);
            }
        }
    }

    #[test]
    fn test_generated_schedule_validates() {
        let reg = registry(&["Rio", "Rio", "SP", "SP", "POA", "BH", "CTB", "REC"]);
        for seed in 0..10 {
            let s = build(&reg, seed).unwrap();
            assert!(crate::validation::validate_schedule(&s).is_ok(), "seed {seed}");

            let stats = crate::scheduler::ScheduleStats::calculate(&s, reg.restrictions());
            assert_eq!(stats.round_count, 14);
            assert_eq!(stats.match_count, 56);
            // Mirroring turns each first-leg home clash into a second-leg away clash.
            let first_leg_home: usize = (1..=7).map(|id| stats.clashes_by_round[&id].home).sum();
            let second_leg_away: usize = (8..=14).map(|id| stats.clashes_by_round[&id].away).sum();
            assert_eq!(first_leg_home, second_leg_away, "seed {seed}");
        }
    }

    #[test]
    fn test_odd_roster_produces_nothing() {
        let reg = distinct_cities(5);
        assert_eq!(
            build(&reg, 0).unwrap_err(),
            LeagueError::OddTeamCount { count: 5 }
        );
    }

    #[test]
    fn test_infeasible_roster_produces_nothing() {
        let reg = registry(&["Rio", "Rio", "Rio", "Rio"]);
        assert!(matches!(
            build(&reg, 0),
            Err(LeagueError::InfeasibleRestrictions {
                max_group_size: 4,
                half_rounds: 3,
                required_rounds: 6,
            })
        ));
    }

    #[test]
    fn test_unbuilt_restrictions_are_enforced() {
        let mut reg = TeamRegistry::new("Test League");
        for code in ["A", "B", "C", "D"] {
            reg.add_team(code, code, "Rio").unwrap();
        }
        assert!(matches!(
            build(&reg, 0),
            Err(LeagueError::InfeasibleRestrictions { max_group_size: 4, .. })
        ));
    }

    #[test]
    fn test_late_registration_is_enforced() {
        let mut reg = registry(&["Rio", "SP"]);
        reg.add_team("T02", "Team 2", "Rio").unwrap();
        reg.add_team("T03", "Team 3", "Rio").unwrap();
        assert!(!reg.restrictions().has_restriction("T00", "T02"));
        assert!(matches!(
            build(&reg, 0),
            Err(LeagueError::InfeasibleRestrictions { max_group_size: 3, .. })
        ));
    }

    #[test]
    fn test_late_registration_repairs_against_current_cities() {
        // Same roster as the repair test above, but the second Rio team
        // arrives after the last restriction build.
        let mut reg = registry(&["Rio", "B", "C", "D", "E"]);
        reg.add_team("T05", "Team 5", "Rio").unwrap();
        for seed in 0..30 {
            let s = build(&reg, seed).unwrap();
            for round in s.first_leg() {
                let both_home = round.is_home("T00") && round.is_home("T05");
                assert!(!both_home, "seed {seed} round {}", round.id);
            }
        }
    }

    #[test]
    fn test_repair_disabled_leaves_clashes() {
        // Same seeds, same draws: only the swap differs between the two runs.
        let reg = registry(&["Rio", "Rio", "SP", "SP", "POA", "POA", "BH", "CTB"]);
        let mut repaired = 0;
        let mut unrepaired = 0;
        let mut seeds_differing = 0;
        for seed in 0..30 {
            let on = build(&reg, seed).unwrap();
            let off = ScheduleBuilder::new(&reg)
                .with_config(
                    SchedulerConfig::default()
                        .with_seed(seed)
                        .with_home_clash_repair(false),
                )
                .build()
                .unwrap();
            assert!(crate::validation::validate_schedule(&off).is_ok());

            let on_stats = crate::scheduler::ScheduleStats::calculate(&on, reg.restrictions());
            let off_stats = crate::scheduler::ScheduleStats::calculate(&off, reg.restrictions());
            let first_leg_home = |stats: &crate::scheduler::ScheduleStats| -> usize {
                (1..=7).map(|id| stats.clashes_by_round[&id].home).sum()
            };
            repaired += first_leg_home(&on_stats);
            unrepaired += first_leg_home(&off_stats);
            if on != off {
                seeds_differing += 1;
            }
        }
        assert!(unrepaired > repaired, "{unrepaired} vs {repaired}");
        assert!(seeds_differing > 0);
    }

    #[test]
    fn test_rotate_seats() {
        let seats = ["A", "B", "C", "D"];
        assert_eq!(rotate_seats(&seats, 0), vec!["A", "B", "C", "D"]);
        assert_eq!(rotate_seats(&seats, 1), vec!["A", "C", "D", "B"]);
        assert_eq!(rotate_seats(&seats, 3), vec!["A", "B", "C", "D"]);
        assert!(rotate_seats(&[], 2).is_empty());
    }
}
