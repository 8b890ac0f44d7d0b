//! Allocator configuration.
//!
//! Loaded from a JSON file, either explicitly or through the
//! `VB_ALLOCATOR_CONFIG_PATH` environment variable. Missing fields fall back to
//! the standard six-a-side court.

use crate::error::{CoreError, Result};
use crate::models::TEAM_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};

pub const CONFIG_PATH_ENV: &str = "VB_ALLOCATOR_CONFIG_PATH";

const MIN_TEAM_CAPACITY: usize = 2;
const MAX_TEAM_CAPACITY: usize = 12;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocatorConfig {
    /// Players per team (default: 6)
    #[serde(default = "default_team_capacity")]
    pub team_capacity: usize,
}

fn default_team_capacity() -> usize {
    TEAM_CAPACITY
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self { team_capacity: TEAM_CAPACITY }
    }
}

impl AllocatorConfig {
    /// Load from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AllocatorConfig = serde_json::from_str(json)
            .map_err(|e| CoreError::Config(format!("Failed to parse allocator config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Config named by `VB_ALLOCATOR_CONFIG_PATH`, or defaults when unset.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        Self::load(path).map_err(|e| {
            CoreError::Config(format!("Failed to load config from {CONFIG_PATH_ENV}='{path}': {e}"))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_TEAM_CAPACITY..=MAX_TEAM_CAPACITY).contains(&self.team_capacity) {
            return Err(CoreError::Config(format!(
                "team_capacity must be {}-{}, got {}",
                MIN_TEAM_CAPACITY, MAX_TEAM_CAPACITY, self.team_capacity
            )));
        }
        Ok(())
    }
}
