//! Read-only aggregate statistics over a confirmed roster.

use crate::models::team::round_hundredths;
use crate::models::{Gender, Player, PositionCounts, MAX_LEVEL, MIN_LEVEL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenderCounts {
    #[serde(rename = "M")]
    pub men: usize,
    #[serde(rename = "F")]
    pub women: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RosterStatistics {
    pub total_players: usize,
    pub by_gender: GenderCounts,
    pub by_position: PositionCounts,
    /// Level → head count; levels 1..=5 are always present
    pub by_level: BTreeMap<u8, usize>,
    pub average_level: f64,
}

impl RosterStatistics {
    pub fn level_count(&self, level: u8) -> usize {
        self.by_level.get(&level).copied().unwrap_or(0)
    }
}

/// Reduce a roster to head counts and mean level. Never fails; an empty
/// roster reports zeros.
pub fn roster_statistics(players: &[Player]) -> RosterStatistics {
    let mut by_gender = GenderCounts::default();
    let mut by_level: BTreeMap<u8, usize> = (MIN_LEVEL..=MAX_LEVEL).map(|l| (l, 0)).collect();
    let mut level_sum: u32 = 0;

    for player in players {
        match player.gender {
            Gender::Male => by_gender.men += 1,
            Gender::Female => by_gender.women += 1,
        }
        *by_level.entry(player.level).or_insert(0) += 1;
        level_sum += u32::from(player.level);
    }

    let average_level = if players.is_empty() {
        0.0
    } else {
        round_hundredths(f64::from(level_sum) / players.len() as f64)
    };

    RosterStatistics {
        total_players: players.len(),
        by_gender,
        by_position: PositionCounts::from_players(players),
        by_level,
        average_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    #[test]
    fn test_counts_sum_to_roster_size() {
        let players = vec![
            Player::new("a", "A", Gender::Male, Position::Setter, 5),
            Player::new("b", "B", Gender::Female, Position::Libero, 2),
            Player::new("c", "C", Gender::Female, Position::Middle, 2),
            Player::new("d", "D", Gender::Male, Position::Other, 4),
        ];
        let stats = roster_statistics(&players);

        assert_eq!(stats.total_players, 4);
        assert_eq!(stats.by_gender, GenderCounts { men: 2, women: 2 });
        assert_eq!(stats.by_level.values().sum::<usize>(), 4);
        assert_eq!(stats.level_count(2), 2);
        assert_eq!(stats.level_count(1), 0);
        assert_eq!(stats.by_position.total(), 4);
        assert_eq!(stats.average_level, 3.25);
    }

    #[test]
    fn test_empty_roster() {
        let stats = roster_statistics(&[]);
        assert_eq!(stats.total_players, 0);
        assert_eq!(stats.average_level, 0.0);
        assert_eq!(stats.by_level.len(), 5);
    }

    #[test]
    fn test_wire_format() {
        let stats = roster_statistics(&[Player::new("a", "A", Gender::Female, Position::Opposite, 3)]);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["byGender"]["F"], 1);
        assert_eq!(value["byLevel"]["3"], 1);
        assert_eq!(value["byPosition"]["opposite"], 1);
        assert_eq!(value["averageLevel"], 3.0);
    }
}
