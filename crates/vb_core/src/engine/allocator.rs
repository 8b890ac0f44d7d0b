//! Two-team allocator.
//!
//! Pipeline over one immutable roster snapshot:
//! 1. precondition checks (setters, then head count)
//! 2. seeding: one setter and one libero per team, best first
//! 3. greedy fill: smallest team first, lowest running total on ties
//! 4. finalize: averages, position counts, bench
//!
//! All sorts are stable on skill level only, so equal levels keep roster
//! order and the same input always yields the same teams.

use crate::config::AllocatorConfig;
use crate::error::AllocationError;
use crate::models::{AllocationResult, Gender, Player, Position, Team, TEAM_COUNT};
use tracing::{debug, info};

/// Setters needed to guarantee one per team.
pub const MIN_SETTERS: usize = TEAM_COUNT;

/// Roster entry tagged with its position in the input.
type Indexed<'a> = (usize, &'a Player);

/// Disjoint role buckets, each sorted by level descending.
#[derive(Debug, Default)]
struct RoleBuckets<'a> {
    setters: Vec<Indexed<'a>>,
    liberos: Vec<Indexed<'a>>,
    men: Vec<Indexed<'a>>,
    women: Vec<Indexed<'a>>,
}

impl<'a> RoleBuckets<'a> {
    fn partition(players: &'a [Player]) -> Self {
        let mut buckets = Self::default();
        for entry in players.iter().enumerate() {
            match (entry.1.position, entry.1.gender) {
                (Position::Setter, _) => buckets.setters.push(entry),
                (Position::Libero, _) => buckets.liberos.push(entry),
                (_, Gender::Male) => buckets.men.push(entry),
                (_, Gender::Female) => buckets.women.push(entry),
            }
        }

        sort_by_level_desc(&mut buckets.setters);
        sort_by_level_desc(&mut buckets.liberos);
        sort_by_level_desc(&mut buckets.men);
        sort_by_level_desc(&mut buckets.women);
        buckets
    }

    /// Remaining men followed by remaining women, re-sorted by level.
    fn field_players(&self) -> Vec<Indexed<'a>> {
        let mut merged: Vec<Indexed<'a>> =
            self.men.iter().chain(self.women.iter()).copied().collect();
        sort_by_level_desc(&mut merged);
        merged
    }
}

// `sort_by` is stable: equal levels keep their relative order.
fn sort_by_level_desc(bucket: &mut [Indexed<'_>]) {
    bucket.sort_by(|a, b| b.1.level.cmp(&a.1.level));
}

/// Splits a confirmed roster into two balanced teams plus a bench.
#[derive(Debug, Clone, Default)]
pub struct TeamAllocator {
    config: AllocatorConfig,
}

impl TeamAllocator {
    pub fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    pub fn team_capacity(&self) -> usize {
        self.config.team_capacity
    }

    /// Minimum roster size for a run to succeed.
    pub fn required_players(&self) -> usize {
        self.team_capacity() * TEAM_COUNT
    }

    pub fn allocate(&self, players: &[Player]) -> Result<AllocationResult, AllocationError> {
        let team_count = self.check_preconditions(players)?;

        let buckets = RoleBuckets::partition(players);
        debug!(
            setters = buckets.setters.len(),
            liberos = buckets.liberos.len(),
            men = buckets.men.len(),
            women = buckets.women.len(),
            "partitioned roster"
        );

        let mut teams: Vec<Team> =
            (0..team_count).map(|_| Team::new(self.team_capacity())).collect();
        let mut placed = vec![false; players.len()];

        seed_role(&mut teams, &buckets.setters, &mut placed);
        seed_role(&mut teams, &buckets.liberos, &mut placed);
        debug!(
            team_sizes = ?teams.iter().map(Team::len).collect::<Vec<_>>(),
            "seeded setters and liberos"
        );

        distribute_greedy(&mut teams, &buckets.field_players(), &mut placed);

        let bench: Vec<Player> = players
            .iter()
            .zip(&placed)
            .filter(|&(_, &is_placed)| !is_placed)
            .map(|(player, _)| player.clone())
            .collect();

        let result = AllocationResult::finalize(&teams, bench);
        info!(
            total = result.summary.total_confirmed_players,
            in_teams = result.summary.players_in_teams,
            bench = result.summary.players_on_bench,
            level_gap = result.summary.average_level_difference,
            "teams allocated"
        );
        Ok(result)
    }

    /// Returns the number of teams to build. Setter supply is checked first.
    fn check_preconditions(&self, players: &[Player]) -> Result<usize, AllocationError> {
        let setters = players.iter().filter(|p| p.is_setter()).count();
        if setters < MIN_SETTERS {
            return Err(AllocationError::InsufficientSetters {
                found: setters,
                required: MIN_SETTERS,
            });
        }

        let team_count = (players.len() / self.team_capacity()).min(TEAM_COUNT);
        if team_count < TEAM_COUNT {
            return Err(AllocationError::InsufficientPlayers {
                found: players.len(),
                required: self.required_players(),
            });
        }

        Ok(team_count)
    }
}

/// Allocate with the standard six-a-side configuration.
pub fn allocate(players: &[Player]) -> Result<AllocationResult, AllocationError> {
    TeamAllocator::default().allocate(players)
}

/// Best `teams.len()` players of one role, one per team, index-aligned.
fn seed_role(teams: &mut [Team], bucket: &[Indexed<'_>], placed: &mut [bool]) {
    for (team, &(idx, player)) in teams.iter_mut().zip(bucket) {
        if team.try_assign(player) {
            placed[idx] = true;
        }
    }
}

/// Each player joins the non-full team with the fewest players, then the
/// lowest running total, then the lowest index. Full teams everywhere means
/// the player stays on the bench.
fn distribute_greedy(teams: &mut [Team], field_players: &[Indexed<'_>], placed: &mut [bool]) {
    for &(idx, player) in field_players {
        let target = teams
            .iter()
            .enumerate()
            .filter(|(_, team)| team.can_accept(player))
            .min_by_key(|(i, team)| (team.len(), team.total_level(), *i))
            .map(|(i, _)| i);

        match target {
            Some(i) => placed[idx] = teams[i].try_assign(player),
            None => debug!(player = %player.id, level = player.level, "all teams full, benched"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TEAM_CAPACITY;

    fn p(id: &str, gender: Gender, position: Position, level: u8) -> Player {
        Player::new(id, id.to_uppercase(), gender, position, level)
    }

    fn others(count: usize, level: u8) -> Vec<Player> {
        (0..count)
            .map(|i| {
                let gender = if i % 2 == 0 { Gender::Male } else { Gender::Female };
                p(&format!("o{i}"), gender, Position::OutsideHitter, level)
            })
            .collect()
    }

    /// 2 setters (5,4), 2 liberos (3,3), 8 others (5,5,4,4,3,3,2,2).
    fn exact_fill_roster() -> Vec<Player> {
        vec![
            p("s1", Gender::Male, Position::Setter, 5),
            p("s2", Gender::Female, Position::Setter, 4),
            p("l1", Gender::Female, Position::Libero, 3),
            p("l2", Gender::Male, Position::Libero, 3),
            p("m1", Gender::Male, Position::Middle, 5),
            p("f1", Gender::Female, Position::OutsideHitter, 5),
            p("m2", Gender::Male, Position::Opposite, 4),
            p("f2", Gender::Female, Position::Middle, 4),
            p("m3", Gender::Male, Position::OutsideHitter, 3),
            p("f3", Gender::Female, Position::Opposite, 3),
            p("m4", Gender::Male, Position::Other, 2),
            p("f4", Gender::Female, Position::Other, 2),
        ]
    }

    #[test]
    fn test_one_setter_fails_before_head_count() {
        let mut roster = others(20, 3);
        roster.push(p("s1", Gender::Male, Position::Setter, 5));

        let err = allocate(&roster).unwrap_err();
        assert_eq!(err, AllocationError::InsufficientSetters { found: 1, required: 2 });
    }

    #[test]
    fn test_eleven_players_reports_observed_count() {
        let mut roster = others(9, 3);
        roster.push(p("s1", Gender::Male, Position::Setter, 5));
        roster.push(p("s2", Gender::Male, Position::Setter, 4));

        let err = allocate(&roster).unwrap_err();
        assert_eq!(err, AllocationError::InsufficientPlayers { found: 11, required: 12 });
        assert_eq!(err.missing(), 1);
    }

    #[test]
    fn test_exact_fill_scenario() {
        let result = allocate(&exact_fill_roster()).unwrap();

        assert_eq!(result.teams.len(), 2);
        assert!(result.bench_players.is_empty());
        for team in &result.teams {
            assert_eq!(team.total_players, TEAM_CAPACITY);
            assert_eq!(team.positions.setter, 1);
            assert_eq!(team.positions.libero, 1);
            assert!(team.has_setter && team.has_libero);
        }

        // Seeds: team 1 = s1(5)+l1(3)=8, team 2 = s2(4)+l2(3)=7.
        // Field order: m1 f1 m2 f2 m3 f3 m4 f4 (men before women within a level).
        let ids = |n: usize| {
            result.teams[n].players.iter().map(|p| p.id.as_str()).collect::<Vec<_>>()
        };
        assert_eq!(ids(0), vec!["s1", "l1", "f1", "f2", "f3", "f4"]);
        assert_eq!(ids(1), vec!["s2", "l2", "m1", "m2", "m3", "m4"]);

        assert_eq!(result.teams[0].total_level(), 22);
        assert_eq!(result.teams[1].total_level(), 21);
        assert_eq!(result.teams[0].average_level, 3.67);
        assert_eq!(result.teams[1].average_level, 3.5);
        assert_eq!(result.summary.average_level_difference, 0.17);
        assert_eq!(result.summary.players_in_teams, 12);
        assert_eq!(result.summary.players_on_bench, 0);
    }

    #[test]
    fn test_bench_scenario() {
        let mut roster = vec![
            p("s1", Gender::Male, Position::Setter, 4),
            p("s2", Gender::Female, Position::Setter, 4),
            p("l1", Gender::Female, Position::Libero, 3),
        ];
        roster.extend((0..15).map(|i| {
            let level = (i % 5) as u8 + 1;
            let gender = if i % 3 == 0 { Gender::Female } else { Gender::Male };
            p(&format!("o{i}"), gender, Position::Middle, level)
        }));

        let result = allocate(&roster).unwrap();

        assert_eq!(result.teams[0].total_players, 6);
        assert_eq!(result.teams[1].total_players, 6);
        assert_eq!(result.bench_players.len(), 6);
        assert_eq!(result.summary.total_confirmed_players, 18);
        assert!(result.teams[0].has_libero);
        assert!(!result.teams[1].has_libero);
        // Lowest levels are the ones left over.
        assert!(result.bench_players.iter().all(|b| b.level <= 2));
    }

    #[test]
    fn test_unseeded_setter_is_benched() {
        let mut roster = exact_fill_roster();
        roster.push(p("s3", Gender::Male, Position::Setter, 4));

        let result = allocate(&roster).unwrap();

        assert!(result.is_benched("s3"));
        for team in &result.teams {
            assert_eq!(team.positions.setter, 1);
        }
        // Equal levels keep roster order: s2 precedes s3.
        assert_eq!(result.team_of("s2"), Some(2));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut roster = vec![
            p("s1", Gender::Male, Position::Setter, 3),
            p("s2", Gender::Male, Position::Setter, 3),
        ];
        roster.extend(others(10, 3));

        let result = allocate(&roster).unwrap();

        assert_eq!(result.team_of("s1"), Some(1));
        assert_eq!(result.team_of("s2"), Some(2));
        // Sizes and totals tie, so the first team wins the first field player.
        assert_eq!(result.team_of("o0"), Some(1));
        assert_eq!(result.team_of("o2"), Some(2));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let roster = exact_fill_roster();
        assert_eq!(allocate(&roster).unwrap(), allocate(&roster).unwrap());
    }

    #[test]
    fn test_custom_capacity() {
        let allocator = TeamAllocator::new(AllocatorConfig { team_capacity: 4 });
        let mut roster = vec![
            p("s1", Gender::Male, Position::Setter, 3),
            p("s2", Gender::Male, Position::Setter, 3),
        ];
        roster.extend(others(7, 2));

        let result = allocator.allocate(&roster).unwrap();
        assert!(result.teams.iter().all(|t| t.total_players == 4));
        assert_eq!(result.bench_players.len(), 1);
    }
}
