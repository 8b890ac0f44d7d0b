//! Validation module for player records
//!
//! Roster entries arrive from external collaborators (CSV import, JSON API,
//! persistence). Everything is checked here before it reaches the allocator.

use crate::models::player::{Player, MAX_LEVEL, MIN_LEVEL};
use std::collections::HashSet;
use std::fmt;

const MAX_NAME_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Missing or blank identifier
    InvalidId(String),

    /// Name validation errors
    InvalidName(String),

    /// Skill level outside 1..=5
    InvalidLevel { player: String, level: u8 },

    /// Same identifier appears twice in one roster
    DuplicateId(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidId(msg) => write!(f, "Invalid id: {}", msg),
            ValidationError::InvalidName(msg) => write!(f, "Invalid name: {}", msg),
            ValidationError::InvalidLevel { player, level } => write!(
                f,
                "Invalid level for {}: {}. Must be between {} and {}",
                player, level, MIN_LEVEL, MAX_LEVEL
            ),
            ValidationError::DuplicateId(id) => write!(f, "Duplicate player id: {}", id),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Player validation utility
pub struct PlayerValidator;

impl PlayerValidator {
    pub fn validate_id(id: &str) -> Result<(), ValidationError> {
        if id.trim().is_empty() {
            return Err(ValidationError::InvalidId("Id cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Validate display name (1-50 characters)
    pub fn validate_name(name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::InvalidName("Name cannot be empty".to_string()));
        }

        if name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::InvalidName(format!(
                "Name cannot exceed {} characters",
                MAX_NAME_LEN
            )));
        }

        Ok(())
    }

    pub fn validate_level(player: &str, level: u8) -> Result<(), ValidationError> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            return Err(ValidationError::InvalidLevel { player: player.to_string(), level });
        }
        Ok(())
    }

    pub fn validate_player(player: &Player) -> Result<(), ValidationError> {
        Self::validate_id(&player.id)?;
        Self::validate_name(&player.name)?;
        Self::validate_level(&player.id, player.level)?;
        Ok(())
    }

    /// Validate every player and reject duplicate ids.
    pub fn validate_roster(players: &[Player]) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(players.len());
        for player in players {
            Self::validate_player(player)?;
            if !seen.insert(player.id.as_str()) {
                return Err(ValidationError::DuplicateId(player.id.clone()));
            }
        }
        Ok(())
    }
}
