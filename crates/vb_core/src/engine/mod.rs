pub mod allocator;
pub mod statistics;

#[cfg(test)]
mod allocator_props;

pub use allocator::{allocate, TeamAllocator, MIN_SETTERS};
pub use statistics::{roster_statistics, GenderCounts, RosterStatistics};
