//! In-memory gateway implementations for tests and local runs.

use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::broadcast;
use tracing::trace;

use super::event::{SessionEvent, SessionId};
use super::gateway::{Broadcaster, CardCatalog, LobbySource, StateStore, StoreError};
use super::init::Lobby;
use crate::cards::{Card, CardRegistry};
use crate::core::config::DEFAULT_BROADCAST_CAPACITY;
use crate::core::{GameState, PlayerId};

/// In-memory implementation of `StateStore`.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    states: RwLock<FxHashMap<SessionId, GameState>>,
}

impl MemoryStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved sessions.
    pub fn len(&self) -> Result<usize, StoreError> {
        let states = self.states.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(states.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn load(&self, session_id: &SessionId) -> Result<Option<GameState>, StoreError> {
        let states = self.states.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(states.get(session_id).cloned())
    }

    async fn save(&self, session_id: &SessionId, state: &GameState) -> Result<(), StoreError> {
        let mut states = self.states.write().map_err(|_| StoreError::LockPoisoned)?;
        states.insert(session_id.clone(), state.clone());
        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> Result<(), StoreError> {
        let mut states = self.states.write().map_err(|_| StoreError::LockPoisoned)?;
        states.remove(session_id);
        Ok(())
    }
}

/// In-memory implementation of `LobbySource`.
#[derive(Debug, Default)]
pub struct MemoryLobbyStore {
    lobbies: RwLock<FxHashMap<SessionId, Lobby>>,
}

impl MemoryLobbyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a lobby.
    pub fn insert(&self, lobby: Lobby) -> Result<(), StoreError> {
        let mut lobbies = self.lobbies.write().map_err(|_| StoreError::LockPoisoned)?;
        lobbies.insert(lobby.session_id.clone(), lobby);
        Ok(())
    }
}

#[async_trait]
impl LobbySource for MemoryLobbyStore {
    async fn load_lobby(&self, session_id: &SessionId) -> Result<Option<Lobby>, StoreError> {
        let lobbies = self.lobbies.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(lobbies.get(session_id).cloned())
    }
}

/// The registry's per-user collections as a `CardCatalog`.
#[async_trait]
impl CardCatalog for CardRegistry {
    async fn owned_cards(&self, user: &PlayerId) -> Result<Vec<Card>, StoreError> {
        Ok(self.collection(user))
    }
}

/// `Broadcaster` backed by one `tokio::sync::broadcast` channel per session.
///
/// Publishing to a session nobody subscribed to is not an error; the event
/// is dropped. A receiver that falls more than `capacity` events behind gets
/// `RecvError::Lagged` and should re-request a snapshot.
#[derive(Debug)]
pub struct ChannelBroadcaster {
    channels: Mutex<FxHashMap<SessionId, broadcast::Sender<SessionEvent>>>,
    capacity: usize,
}

impl ChannelBroadcaster {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BROADCAST_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Mutex::new(FxHashMap::default()),
            capacity: capacity.max(1),
        }
    }

    /// Subscribe to a session's events, creating its channel if needed.
    pub fn subscribe(&self, session_id: &SessionId) -> Result<broadcast::Receiver<SessionEvent>, StoreError> {
        let mut channels = self.channels.lock().map_err(|_| StoreError::LockPoisoned)?;
        let capacity = self.capacity;
        let sender = channels
            .entry(session_id.clone())
            .or_insert_with(|| broadcast::channel(capacity).0);
        Ok(sender.subscribe())
    }

    /// Number of live receivers for a session.
    pub fn receiver_count(&self, session_id: &SessionId) -> Result<usize, StoreError> {
        let channels = self.channels.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(channels.get(session_id).map_or(0, broadcast::Sender::receiver_count))
    }
}

impl Default for ChannelBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Broadcaster for ChannelBroadcaster {
    async fn publish(&self, event: SessionEvent) -> Result<(), StoreError> {
        let channels = self.channels.lock().map_err(|_| StoreError::LockPoisoned)?;
        match channels.get(&event.session_id) {
            Some(sender) => {
                let session_id = event.session_id.clone();
                if sender.send(event).is_err() {
                    trace!(session = %session_id, "no subscribers for session");
                }
            }
            None => trace!(session = %event.session_id, "no channel for session"),
        }
        Ok(())
    }

    async fn close(&self, session_id: &SessionId) -> Result<(), StoreError> {
        let mut channels = self.channels.lock().map_err(|_| StoreError::LockPoisoned)?;
        channels.remove(session_id);
        Ok(())
    }
}
