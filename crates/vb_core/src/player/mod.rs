//! Player record checks applied before a roster reaches the allocator.

pub mod validation;

pub use validation::{PlayerValidator, ValidationError};
