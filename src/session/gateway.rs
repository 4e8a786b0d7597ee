//! Boundaries the session layer consumes but does not implement.
//!
//! - `StateStore`: load/save a session's state (persistence gateway)
//! - `Broadcaster`: fan events out to a session's participants
//! - `LobbySource`: the lobby a match starts from
//! - `CardCatalog`: the cards each user owns
//!
//! All four are infrastructure. Their failures surface as `StoreError` and
//! are never mixed up with rule violations.

use async_trait::async_trait;
use thiserror::Error;

use super::event::{SessionEvent, SessionId};
use super::init::Lobby;
use crate::cards::Card;
use crate::core::{GameState, PlayerId};

/// Infrastructure failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid session id {0:?}")]
    InvalidSessionId(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Persistence gateway.
///
/// Implementations must round-trip every field of `GameState`, including the
/// live defense of deployed characters.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load a session's state. `None` if nothing was saved.
    async fn load(&self, session_id: &SessionId) -> Result<Option<GameState>, StoreError>;

    /// Save a session's state, replacing any previous one.
    async fn save(&self, session_id: &SessionId, state: &GameState) -> Result<(), StoreError>;

    /// Delete a session's state.
    async fn delete(&self, session_id: &SessionId) -> Result<(), StoreError>;
}

/// Broadcast gateway.
///
/// Two publishes for the same session must reach receivers in call order.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn publish(&self, event: SessionEvent) -> Result<(), StoreError>;

    /// Release per-session resources.
    async fn close(&self, _session_id: &SessionId) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Source of lobbies waiting to become matches.
#[async_trait]
pub trait LobbySource: Send + Sync {
    async fn load_lobby(&self, session_id: &SessionId) -> Result<Option<Lobby>, StoreError>;
}

/// Card catalog adapter: the cards a user has unlocked.
#[async_trait]
pub trait CardCatalog: Send + Sync {
    async fn owned_cards(&self, user: &PlayerId) -> Result<Vec<Card>, StoreError>;
}
