use super::{Gender, Player, Position};
use serde::{Deserialize, Serialize};

/// Players per team on court.
pub const TEAM_CAPACITY: usize = 6;
/// Teams produced per allocation run.
pub const TEAM_COUNT: usize = 2;

/// Round to two decimals (averages and gaps are reported this way).
pub(crate) fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Head count per court position.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositionCounts {
    pub setter: usize,
    pub libero: usize,
    #[serde(rename = "outside-hitter")]
    pub outside_hitter: usize,
    pub middle: usize,
    pub opposite: usize,
    pub other: usize,
}

impl PositionCounts {
    pub fn from_players<'a>(players: impl IntoIterator<Item = &'a Player>) -> Self {
        let mut counts = Self::default();
        for player in players {
            counts.add(player.position);
        }
        counts
    }

    pub fn add(&mut self, position: Position) {
        *self.slot_mut(position) += 1;
    }

    pub fn get(&self, position: Position) -> usize {
        match position {
            Position::Setter => self.setter,
            Position::Libero => self.libero,
            Position::OutsideHitter => self.outside_hitter,
            Position::Middle => self.middle,
            Position::Opposite => self.opposite,
            Position::Other => self.other,
        }
    }

    pub fn total(&self) -> usize {
        Position::ALL.iter().map(|p| self.get(*p)).sum()
    }

    fn slot_mut(&mut self, position: Position) -> &mut usize {
        match position {
            Position::Setter => &mut self.setter,
            Position::Libero => &mut self.libero,
            Position::OutsideHitter => &mut self.outside_hitter,
            Position::Middle => &mut self.middle,
            Position::Opposite => &mut self.opposite,
            Position::Other => &mut self.other,
        }
    }
}

/// Team under construction.
///
/// Only the allocator mutates a `Team`, and only through [`Team::try_assign`],
/// which enforces capacity and the one-setter / one-libero rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    players: Vec<Player>,
    capacity: usize,
    total_level: u32,
    men: usize,
    women: usize,
    has_setter: bool,
    has_libero: bool,
}

impl Team {
    pub fn new(capacity: usize) -> Self {
        Self {
            players: Vec::with_capacity(capacity),
            capacity,
            total_level: 0,
            men: 0,
            women: 0,
            has_setter: false,
            has_libero: false,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.capacity
    }

    pub fn total_level(&self) -> u32 {
        self.total_level
    }

    pub fn men_count(&self) -> usize {
        self.men
    }

    pub fn women_count(&self) -> usize {
        self.women
    }

    pub fn has_setter(&self) -> bool {
        self.has_setter
    }

    pub fn has_libero(&self) -> bool {
        self.has_libero
    }

    /// Whether `player` may join without breaking capacity or role rules.
    pub fn can_accept(&self, player: &Player) -> bool {
        if self.is_full() {
            return false;
        }
        match player.position {
            Position::Setter => !self.has_setter,
            Position::Libero => !self.has_libero,
            _ => true,
        }
    }

    /// Add `player` and update running totals. Returns `false` (and leaves the
    /// team untouched) when [`Team::can_accept`] would refuse.
    pub fn try_assign(&mut self, player: &Player) -> bool {
        if !self.can_accept(player) {
            return false;
        }

        self.total_level += u32::from(player.level);
        match player.gender {
            Gender::Male => self.men += 1,
            Gender::Female => self.women += 1,
        }
        match player.position {
            Position::Setter => self.has_setter = true,
            Position::Libero => self.has_libero = true,
            _ => {}
        }
        self.players.push(player.clone());
        true
    }

    /// Mean level rounded to two decimals; 0.0 for an empty team.
    pub fn average_level(&self) -> f64 {
        if self.players.is_empty() {
            return 0.0;
        }
        round_hundredths(f64::from(self.total_level) / self.players.len() as f64)
    }

    pub fn position_counts(&self) -> PositionCounts {
        PositionCounts::from_players(&self.players)
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }
}
