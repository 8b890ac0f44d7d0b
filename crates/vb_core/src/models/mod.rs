pub mod allocation;
pub mod player;
pub mod team;

pub use allocation::{AllocationResult, AllocationSummary, TeamReport};
pub use player::{Gender, Player, Position, MAX_LEVEL, MIN_LEVEL};
pub use team::{PositionCounts, Team, TEAM_CAPACITY, TEAM_COUNT};
