//! Simulator configuration
//!
//! Loaded from an optional TOML file; every key has a default.
//!
//! ```toml
//! strategy = "best-fit"
//! arena_size = 127
//! prompt = "> "
//! ```

use crate::allocator::Placement;
use crate::arena::ARENA_SIZE;
use crate::codec::{MAX_BLOCK_SIZE, MIN_BLOCK_SIZE};
use crate::error::{HeapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PROMPT: &str = "> ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Placement strategy
    pub strategy: Placement,

    /// Arena length in bytes (2..=127)
    pub arena_size: usize,

    /// Printed before each command is read
    pub prompt: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            strategy: Placement::default(),
            arena_size: ARENA_SIZE,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE).contains(&self.arena_size) {
            return Err(HeapError::InvalidArenaSize(self.arena_size));
        }
        Ok(())
    }

    pub fn with_strategy(mut self, strategy: Placement) -> Self {
        self.strategy = strategy;
        self
    }
}
