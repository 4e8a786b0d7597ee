//! Rules: the action processor and combat.
//!
//! `GameEngine` validates an action against the current status, turn and
//! phase, then applies it. Combat resolution lives in `combat`; the engine
//! never interprets transport or persistence concerns.

pub mod combat;
pub mod engine;
pub mod error;
pub mod outcome;

pub use combat::{defeated_character_count, DEFEATED_CHARACTERS_TO_WIN};
pub use engine::GameEngine;
pub use error::{EngineError, ErrorKind, UnsupportedFeature};
pub use outcome::{AttackOutcome, Outcome};
