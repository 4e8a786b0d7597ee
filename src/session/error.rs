//! Errors surfaced by the session layer.
//!
//! `Rejected` is a rule violation reported back to the acting participant.
//! Every other variant is infrastructure or hosting misuse.

use thiserror::Error;

use super::event::SessionId;
use super::gateway::StoreError;
use crate::core::PlayerId;
use crate::rules::EngineError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("action rejected: {0}")]
    Rejected(#[from] EngineError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The action was applied and saved but the broadcast failed.
    #[error("state committed but broadcast failed: {0}")]
    Broadcast(#[source] StoreError),

    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    #[error("session {0} has no players")]
    NoPlayers(SessionId),

    #[error("session {0} already started")]
    AlreadyStarted(SessionId),

    #[error("player {0} owns no cards")]
    EmptyCollection(PlayerId),

    #[error("player {player} is not part of session {session}")]
    NotAParticipant { session: SessionId, player: PlayerId },
}

impl SessionError {
    /// True for rule violations the client caused.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, SessionError::Rejected(_))
    }
}
