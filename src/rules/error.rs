//! Validation errors returned by the action processor.
//!
//! Every variant is a caller error: the action was rejected and the state is
//! exactly as it was before. `Unsupported` marks rules that exist in the game
//! design but have no implementation yet.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{CardId, CardKind};
use crate::core::{Phase, PlayerId};

/// Rules acknowledged by the game design but not implemented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnsupportedFeature {
    /// Deploying a battlefield card and applying its effect.
    BattlefieldEffect,
    /// Counting defeated characters for the secondary win condition.
    DefeatedCharacterTracking,
}

impl std::fmt::Display for UnsupportedFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            UnsupportedFeature::BattlefieldEffect => "battlefield card effects",
            UnsupportedFeature::DefeatedCharacterTracking => "defeated character tracking",
        };
        write!(f, "{}", label)
    }
}

fn phase_label(phase: &Option<Phase>) -> String {
    phase.map_or_else(|| "none".to_string(), |p| p.to_string())
}

/// Why an action was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("game is not active")]
    GameNotActive,

    #[error("not your turn: waiting on {expected}, got {actual}")]
    NotYourTurn { expected: PlayerId, actual: PlayerId },

    #[error("{action} is not allowed in phase {}", phase_label(.found))]
    WrongPhase {
        action: &'static str,
        found: Option<Phase>,
    },

    #[error("{0} is not in hand")]
    CardNotInHand(CardId),

    #[error("{card} is a {actual}, not a {declared}")]
    InvalidCardType {
        card: CardId,
        declared: CardKind,
        actual: CardKind,
    },

    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("player {0} is not active")]
    PlayerInactive(PlayerId),

    #[error("{0} is not deployed")]
    CardNotFound(CardId),

    #[error("{0} is not supported yet")]
    Unsupported(UnsupportedFeature),
}

/// Fieldless error classification for clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    GameNotActive,
    NotYourTurn,
    WrongPhase,
    CardNotInHand,
    InvalidCardType,
    PlayerNotFound,
    PlayerInactive,
    CardNotFound,
    Unsupported,
}

impl EngineError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::GameNotActive => ErrorKind::GameNotActive,
            EngineError::NotYourTurn { .. } => ErrorKind::NotYourTurn,
            EngineError::WrongPhase { .. } => ErrorKind::WrongPhase,
            EngineError::CardNotInHand(_) => ErrorKind::CardNotInHand,
            EngineError::InvalidCardType { .. } => ErrorKind::InvalidCardType,
            EngineError::PlayerNotFound(_) => ErrorKind::PlayerNotFound,
            EngineError::PlayerInactive(_) => ErrorKind::PlayerInactive,
            EngineError::CardNotFound(_) => ErrorKind::CardNotFound,
            EngineError::Unsupported(_) => ErrorKind::Unsupported,
        }
    }
}
