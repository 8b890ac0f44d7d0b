//! Property-based tests for the allocator and the statistics reduction.

use super::allocator::allocate;
use super::statistics::roster_statistics;
use crate::error::AllocationError;
use crate::models::{Gender, Player, Position, TEAM_CAPACITY};
use proptest::prelude::*;
use std::collections::HashSet;

pub fn gender_strategy() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female)]
}

pub fn position_strategy() -> impl Strategy<Value = Position> {
    prop_oneof![
        Just(Position::Setter),
        Just(Position::Libero),
        Just(Position::OutsideHitter),
        Just(Position::Middle),
        Just(Position::Opposite),
        Just(Position::Other),
    ]
}

/// Rosters of 0..=30 players with unique ids.
pub fn roster_strategy() -> impl Strategy<Value = Vec<Player>> {
    prop::collection::vec((gender_strategy(), position_strategy(), 1u8..=5), 0..=30).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (gender, position, level))| {
                    Player::new(format!("p{i}"), format!("Player {i}"), gender, position, level)
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn prop_every_player_lands_exactly_once(roster in roster_strategy()) {
        if let Ok(result) = allocate(&roster) {
            let mut seen = HashSet::new();
            let placed = result.teams.iter().flat_map(|t| t.players.iter());
            for player in placed.chain(result.bench_players.iter()) {
                prop_assert!(seen.insert(player.id.clone()), "duplicate {}", player.id);
            }
            prop_assert_eq!(seen.len(), roster.len());
            prop_assert_eq!(result.summary.total_confirmed_players, roster.len());
            prop_assert_eq!(
                result.summary.players_in_teams + result.summary.players_on_bench,
                roster.len()
            );
        }
    }

    #[test]
    fn prop_capacity_and_roles_hold(roster in roster_strategy()) {
        if let Ok(result) = allocate(&roster) {
            prop_assert_eq!(result.teams.len(), 2);
            for team in &result.teams {
                prop_assert!(team.total_players <= TEAM_CAPACITY);
                prop_assert_eq!(team.positions.setter, 1);
                prop_assert!(team.positions.libero <= 1);
                prop_assert_eq!(team.has_libero, team.positions.libero == 1);
                prop_assert_eq!(team.men_count + team.women_count, team.total_players);
            }
        }
    }

    #[test]
    fn prop_preconditions_gate_results(roster in roster_strategy()) {
        let setters = roster.iter().filter(|p| p.is_setter()).count();
        match allocate(&roster) {
            Ok(_) => prop_assert!(setters >= 2 && roster.len() >= 2 * TEAM_CAPACITY),
            Err(AllocationError::InsufficientSetters { found, .. }) => {
                prop_assert_eq!(found, setters);
                prop_assert!(setters < 2);
            }
            Err(AllocationError::InsufficientPlayers { found, .. }) => {
                prop_assert_eq!(found, roster.len());
                prop_assert!(setters >= 2);
            }
        }
    }

    #[test]
    fn prop_allocation_is_deterministic(roster in roster_strategy()) {
        prop_assert_eq!(allocate(&roster), allocate(&roster));
    }

    #[test]
    fn prop_statistics_buckets_sum_to_roster(roster in roster_strategy()) {
        let stats = roster_statistics(&roster);
        prop_assert_eq!(stats.by_gender.men + stats.by_gender.women, roster.len());
        prop_assert_eq!(stats.by_level.values().sum::<usize>(), roster.len());
        prop_assert_eq!(stats.by_position.total(), roster.len());
    }
}
