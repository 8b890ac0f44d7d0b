//! Roster snapshots per event.
//!
//! The allocator only ever sees `Vec<Player>` produced by a [`RosterSource`].
//! [`InMemoryRoster`] is the bundled source: attendance-aware event rosters
//! with a waiting list, loadable from a JSON document.

use crate::error::{CoreError, Result};
use crate::models::Player;
use crate::player::PlayerValidator;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[default]
    Confirmed,
    Waiting,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RosterEntry {
    #[serde(flatten)]
    pub player: Player,
    #[serde(default)]
    pub status: AttendanceStatus,
}

/// Supplies the confirmed players of an event at call time.
pub trait RosterSource {
    fn confirmed_players(&self, event_id: &str) -> Result<Vec<Player>>;
}

/// Attendance list for one event, in registration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRoster {
    pub event_id: String,
    /// Confirmed head count limit; further confirmations go to the waiting list
    #[serde(default)]
    pub max_players: Option<usize>,
    #[serde(default)]
    pub entries: Vec<RosterEntry>,
}

impl EventRoster {
    pub fn new(event_id: impl Into<String>, max_players: Option<usize>) -> Self {
        Self { event_id: event_id.into(), max_players, entries: Vec::new() }
    }

    pub fn confirmed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.status == AttendanceStatus::Confirmed).count()
    }

    fn is_full(&self) -> bool {
        self.max_players.is_some_and(|max| self.confirmed_count() >= max)
    }

    /// Register attendance. Returns the resulting status: `Confirmed` while
    /// seats remain, `Waiting` once the event is full. Players already
    /// confirmed or waiting keep their place. Invalid player records are
    /// rejected before the roster changes.
    pub fn confirm(&mut self, player: Player) -> Result<AttendanceStatus> {
        PlayerValidator::validate_player(&player)?;

        if let Some(pos) = self.entries.iter().position(|e| e.player.id == player.id) {
            let current = self.entries[pos].status;
            if current != AttendanceStatus::Cancelled {
                return Ok(current);
            }
            // Re-registration after a cancellation goes to the back of the line.
            self.entries.remove(pos);
        }

        let status =
            if self.is_full() { AttendanceStatus::Waiting } else { AttendanceStatus::Confirmed };
        debug!(event = %self.event_id, player = %player.id, ?status, "attendance registered");
        self.entries.push(RosterEntry { player, status });
        Ok(status)
    }

    /// Cancel attendance. When a confirmed seat frees up, the earliest waiting
    /// player is promoted; their id is returned.
    pub fn cancel(&mut self, player_id: &str) -> Result<Option<String>> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.player.id == player_id)
            .ok_or_else(|| CoreError::NotFound(format!("player {player_id} in {}", self.event_id)))?;

        let was_confirmed = entry.status == AttendanceStatus::Confirmed;
        entry.status = AttendanceStatus::Cancelled;
        if !was_confirmed || self.is_full() {
            return Ok(None);
        }

        let promoted = self
            .entries
            .iter_mut()
            .find(|e| e.status == AttendanceStatus::Waiting)
            .map(|e| {
                e.status = AttendanceStatus::Confirmed;
                e.player.id.clone()
            });

        if let Some(id) = &promoted {
            info!(event = %self.event_id, player = %id, "promoted from waiting list");
        }
        Ok(promoted)
    }

    pub fn confirmed_players(&self) -> Vec<Player> {
        self.players_with(AttendanceStatus::Confirmed)
    }

    pub fn waiting_list(&self) -> Vec<Player> {
        self.players_with(AttendanceStatus::Waiting)
    }

    fn players_with(&self, status: AttendanceStatus) -> Vec<Player> {
        self.entries.iter().filter(|e| e.status == status).map(|e| e.player.clone()).collect()
    }

    pub fn validate(&self) -> Result<()> {
        let players: Vec<Player> = self.entries.iter().map(|e| e.player.clone()).collect();
        PlayerValidator::validate_roster(&players)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RosterDocument {
    events: Vec<EventRoster>,
}

/// Event rosters held in memory, keyed by event id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoster {
    events: BTreeMap<String, EventRoster>,
}

impl InMemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, event: EventRoster) -> Option<EventRoster> {
        self.events.insert(event.event_id.clone(), event)
    }

    pub fn event(&self, event_id: &str) -> Option<&EventRoster> {
        self.events.get(event_id)
    }

    pub fn event_mut(&mut self, event_id: &str) -> Option<&mut EventRoster> {
        self.events.get_mut(event_id)
    }

    pub fn event_ids(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }

    /// Parse `{ "events": [ { "event_id", "max_players", "entries": [...] } ] }`.
    /// Every entry is validated.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: RosterDocument = serde_json::from_str(json)?;
        let mut roster = Self::new();
        for event in document.events {
            event.validate()?;
            if roster.insert(event).is_some() {
                return Err(CoreError::InvalidParameter("duplicate event id".to_string()));
            }
        }
        Ok(roster)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        let document = RosterDocument { events: self.events.values().cloned().collect() };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

impl RosterSource for InMemoryRoster {
    fn confirmed_players(&self, event_id: &str) -> Result<Vec<Player>> {
        self.event(event_id)
            .map(EventRoster::confirmed_players)
            .ok_or_else(|| CoreError::NotFound(format!("event {event_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Position};
    use serde_json::json;

    fn player(id: &str) -> Player {
        Player::new(id, id, Gender::Male, Position::Middle, 3)
    }

    #[test]
    fn test_confirm_fills_then_waits() {
        let mut event = EventRoster::new("tue", Some(2));
        assert_eq!(event.confirm(player("a")).unwrap(), AttendanceStatus::Confirmed);
        assert_eq!(event.confirm(player("b")).unwrap(), AttendanceStatus::Confirmed);
        assert_eq!(event.confirm(player("c")).unwrap(), AttendanceStatus::Waiting);
        assert_eq!(event.confirm(player("a")).unwrap(), AttendanceStatus::Confirmed);
        assert_eq!(event.confirmed_count(), 2);
        assert_eq!(event.waiting_list().len(), 1);
    }

    #[test]
    fn test_confirm_rejects_invalid_player() {
        let mut event = EventRoster::new("tue", None);
        let too_strong = Player::new("a", "A", Gender::Male, Position::Setter, 200);
        let unnamed = Player::new("b", "", Gender::Female, Position::Middle, 3);

        assert!(matches!(event.confirm(too_strong), Err(CoreError::Validation(_))));
        assert!(matches!(event.confirm(unnamed), Err(CoreError::Validation(_))));
        assert!(event.entries.is_empty());
    }

    #[test]
    fn test_cancel_promotes_earliest_waiting() {
        let mut event = EventRoster::new("tue", Some(1));
        event.confirm(player("a")).unwrap();
        event.confirm(player("b")).unwrap();
        event.confirm(player("c")).unwrap();

        assert_eq!(event.cancel("a").unwrap(), Some("b".to_string()));
        let confirmed: Vec<String> = event.confirmed_players().into_iter().map(|p| p.id).collect();
        assert_eq!(confirmed, vec!["b"]);
        assert_eq!(event.waiting_list()[0].id, "c");

        // Cancelling a waiting entry frees no seat.
        assert_eq!(event.cancel("c").unwrap(), None);
        assert!(event.cancel("zzz").is_err());
    }

    #[test]
    fn test_reconfirm_after_cancel_goes_to_back() {
        let mut event = EventRoster::new("tue", Some(1));
        event.confirm(player("a")).unwrap();
        event.confirm(player("b")).unwrap();
        event.cancel("a").unwrap();
        assert_eq!(event.confirm(player("a")).unwrap(), AttendanceStatus::Waiting);
        assert_eq!(event.entries.last().unwrap().player.id, "a");
    }

    #[test]
    fn test_source_returns_only_confirmed() {
        let doc = json!({
            "events": [{
                "event_id": "fri",
                "entries": [
                    {"id": "a", "name": "A", "gender": "M", "position": "setter", "level": 4},
                    {"id": "b", "name": "B", "gender": "F", "position": "libero", "level": 3, "status": "waiting"},
                    {"id": "c", "name": "C", "gender": "F", "position": "middle", "level": 2, "status": "cancelled"}
                ]
            }]
        });
        let roster = InMemoryRoster::from_json(&doc.to_string()).unwrap();

        let players = roster.confirmed_players("fri").unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].id, "a");
        assert!(matches!(roster.confirmed_players("sat"), Err(CoreError::NotFound(_))));
    }

    #[test]
    fn test_from_json_rejects_invalid_level() {
        let doc = json!({
            "events": [{
                "event_id": "fri",
                "entries": [{"id": "a", "name": "A", "gender": "M", "position": "setter", "level": 9}]
            }]
        });
        assert!(matches!(
            InMemoryRoster::from_json(&doc.to_string()),
            Err(CoreError::Validation(_))
        ));
    }
}
