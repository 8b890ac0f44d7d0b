//! # vb_core - Balanced team allocation for volleyball sessions
//!
//! Takes the confirmed roster of a session and splits it into two teams that
//! are fair in total skill, structurally valid (one setter each, at most one
//! libero) and evenly sized, benching whoever does not fit.
//!
//! ## Features
//! - Deterministic: same roster order, same teams
//! - Pure allocation, no I/O, safe to call concurrently for different events
//! - Attendance-aware roster snapshots with waiting list
//! - JSON API with structured precondition errors

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod player;
pub mod roster;

pub use api::{generate_teams_json, roster_statistics_json, ApiError, ApiResponse};
pub use config::AllocatorConfig;
pub use engine::{allocate, roster_statistics, RosterStatistics, TeamAllocator};
pub use error::{AllocationError, CoreError, Result};
pub use models::{
    AllocationResult, AllocationSummary, Gender, Player, Position, PositionCounts, TeamReport,
};
pub use player::{PlayerValidator, ValidationError};
pub use roster::{AttendanceStatus, EventRoster, InMemoryRoster, RosterEntry, RosterSource};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
