//! Engine configuration.
//!
//! Match constants live here rather than in the rules so a host can tune
//! them per deployment:
//! - starting hit points
//! - deck size cap and opening hand size
//! - per-session broadcast buffer
//!
//! ```
//! use clash_engine::core::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "starting_hp": 40 }"#).unwrap();
//! assert_eq!(config.starting_hp, 40);
//! assert_eq!(config.max_deck_size, 30);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default hit points for a player without saved state.
pub const DEFAULT_STARTING_HP: i64 = 100;

/// Default maximum deck size.
pub const DEFAULT_MAX_DECK_SIZE: usize = 30;

/// Default opening hand size.
pub const DEFAULT_INITIAL_HAND_SIZE: usize = 5;

/// Default per-session broadcast channel capacity.
pub const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Invalid configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("starting_hp must be positive, got {0}")]
    StartingHp(i64),

    #[error("max_deck_size must be at least 1")]
    DeckSize,

    #[error("broadcast_capacity must be at least 1")]
    BroadcastCapacity,

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub starting_hp: i64,
    pub max_deck_size: usize,
    pub initial_hand_size: usize,
    pub broadcast_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_hp: DEFAULT_STARTING_HP,
            max_deck_size: DEFAULT_MAX_DECK_SIZE,
            initial_hand_size: DEFAULT_INITIAL_HAND_SIZE,
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_starting_hp(mut self, hp: i64) -> Self {
        self.starting_hp = hp;
        self
    }

    #[must_use]
    pub fn with_max_deck_size(mut self, size: usize) -> Self {
        self.max_deck_size = size;
        self
    }

    #[must_use]
    pub fn with_initial_hand_size(mut self, size: usize) -> Self {
        self.initial_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_hp <= 0 {
            return Err(ConfigError::StartingHp(self.starting_hp));
        }
        if self.max_deck_size == 0 {
            return Err(ConfigError::DeckSize);
        }
        if self.broadcast_capacity == 0 {
            return Err(ConfigError::BroadcastCapacity);
        }
        Ok(())
    }
}
