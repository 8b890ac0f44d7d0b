use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest accepted skill level.
pub const MIN_LEVEL: u8 = 1;
/// Highest accepted skill level.
pub const MAX_LEVEL: u8 = 5;

/// Confirmed player as handed to the allocator.
///
/// # Boundary Contract
/// - Supplied by a roster snapshot (see `crate::roster`), already filtered to
///   confirmed attendance.
/// - Never mutated during allocation; teams and bench hold clones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub position: Position,
    /// Organizer-rated proficiency, 1..=5
    pub level: u8,
}

impl Player {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        gender: Gender,
        position: Position,
        level: u8,
    ) -> Self {
        Self { id: id.into(), name: name.into(), gender, position, level }
    }

    pub fn is_setter(&self) -> bool {
        self.position.is_setter()
    }

    pub fn is_libero(&self) -> bool {
        self.position.is_libero()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    #[serde(rename = "M", alias = "m")]
    Male,
    #[serde(rename = "F", alias = "f")]
    Female,
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" | "MALE" => Ok(Gender::Male),
            "F" | "FEMALE" => Ok(Gender::Female),
            other => Err(format!("Unknown gender: {}", other)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Court position. The set is closed; anything else is `Other`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    Setter,
    Libero,
    OutsideHitter,
    Middle,
    Opposite,
    Other,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::Setter,
        Position::Libero,
        Position::OutsideHitter,
        Position::Middle,
        Position::Opposite,
        Position::Other,
    ];

    pub fn is_setter(&self) -> bool {
        matches!(self, Position::Setter)
    }

    pub fn is_libero(&self) -> bool {
        matches!(self, Position::Libero)
    }

    /// Canonical wire code (e.g., "outside-hitter").
    pub fn code(&self) -> &'static str {
        match self {
            Position::Setter => "setter",
            Position::Libero => "libero",
            Position::OutsideHitter => "outside-hitter",
            Position::Middle => "middle",
            Position::Opposite => "opposite",
            Position::Other => "other",
        }
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "setter" => Ok(Position::Setter),
            "libero" => Ok(Position::Libero),
            "outside-hitter" | "outside" => Ok(Position::OutsideHitter),
            "middle" | "middle-blocker" => Ok(Position::Middle),
            "opposite" => Ok(Position::Opposite),
            "other" => Ok(Position::Other),
            _ => Err(format!("Unknown position: {}", s.trim())),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
