// src/config.rs

//! Manages host-supplied configuration: loading, defaults, and validation.
//!
//! The core enforces whatever size bounds the host supplies; the numeric
//! values themselves are host policy, not core logic.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;

/// Size bounds applied by command input validators.
///
/// `max_size_small` bounds short identifying attributes (e.g. `name`), while
/// `max_size_query` bounds payload-sized attributes (e.g. `message`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    #[serde(default = "default_max_size_small")]
    pub max_size_small: usize,
    #[serde(default = "default_max_size_query")]
    pub max_size_query: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_size_small: default_max_size_small(),
            max_size_query: default_max_size_query(),
        }
    }
}

fn default_max_size_small() -> usize {
    255
}

fn default_max_size_query() -> usize {
    1024 * 1024
}

/// The top-level configuration for the command-execution core.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub limits: Limits,
}

impl Config {
    /// Creates a new `Config` instance by reading and parsing a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML from '{path}'"))?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the resolved configuration to ensure logical consistency.
    fn validate(&self) -> Result<()> {
        if self.limits.max_size_small == 0 {
            return Err(anyhow!("limits.max_size_small cannot be 0"));
        }
        if self.limits.max_size_query == 0 {
            return Err(anyhow!("limits.max_size_query cannot be 0"));
        }
        if self.limits.max_size_query < self.limits.max_size_small {
            return Err(anyhow!(
                "limits.max_size_query cannot be smaller than limits.max_size_small"
            ));
        }
        Ok(())
    }
}
