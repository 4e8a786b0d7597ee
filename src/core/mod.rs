//! Core engine types: players, state, actions, RNG, configuration.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{PlayerId, PlayerState};
pub use rng::GameRng;
pub use config::{ConfigError, EngineConfig};
pub use action::{Action, ActionKind};
pub use state::{GameState, GameStatus, Phase};
