use crate::player::ValidationError;
use thiserror::Error;

/// Precondition failures of a team allocation run.
///
/// Both are data-state conditions (never transient) and are raised before any
/// team state is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("Not enough setters: need at least {required}, found {found}")]
    InsufficientSetters { found: usize, required: usize },

    #[error("Not enough confirmed players: need at least {required}, found {found}")]
    InsufficientPlayers { found: usize, required: usize },
}

impl AllocationError {
    /// Stable machine-readable code used by the JSON API.
    pub fn code(&self) -> &'static str {
        match self {
            AllocationError::InsufficientSetters { .. } => "INSUFFICIENT_SETTERS",
            AllocationError::InsufficientPlayers { .. } => "INSUFFICIENT_PLAYERS",
        }
    }

    /// Observed count that triggered the failure.
    pub fn found(&self) -> usize {
        match self {
            AllocationError::InsufficientSetters { found, .. }
            | AllocationError::InsufficientPlayers { found, .. } => *found,
        }
    }

    /// How many more players (or setters) are needed.
    pub fn missing(&self) -> usize {
        match self {
            AllocationError::InsufficientSetters { found, required }
            | AllocationError::InsufficientPlayers { found, required } => {
                required.saturating_sub(*found)
            }
        }
    }
}

/// Errors from the collaborator seams around the allocator (roster, config, API).
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid player: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
