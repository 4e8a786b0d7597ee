//! Hosting many matches at once.
//!
//! `SessionRegistry` owns one `GameEngine` per open session and wires it to
//! the gateways. Actions for the same session are applied one at a time;
//! different sessions never wait on each other.
//!
//! ## Submit pipeline
//!
//! 1. Apply the action to a working copy of the engine. A rejection stops
//!    here: nothing is saved or broadcast.
//! 2. Save the working copy. A store failure discards it.
//! 3. Commit the working copy, then broadcast the new snapshot followed by
//!    the outcome.
//!
//! Participants therefore never see a state that was not saved, and the
//! event sequence of a session matches its processing order.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use super::error::SessionError;
use super::event::{EventPayload, SessionEvent, SessionId};
use super::gateway::{Broadcaster, CardCatalog, LobbySource, StateStore, StoreError};
use super::init::{initialize, LobbyStatus};
use super::loadout::prepare_loadout;
use crate::core::{Action, EngineConfig, GameRng, GameState, GameStatus, PlayerId};
use crate::rules::{GameEngine, Outcome};

/// The boundaries a registry talks to.
#[derive(Clone)]
pub struct Gateways {
    pub store: Arc<dyn StateStore>,
    pub broadcaster: Arc<dyn Broadcaster>,
    pub lobbies: Arc<dyn LobbySource>,
    pub catalog: Arc<dyn CardCatalog>,
}

impl Gateways {
    #[must_use]
    pub fn new(
        store: Arc<dyn StateStore>,
        broadcaster: Arc<dyn Broadcaster>,
        lobbies: Arc<dyn LobbySource>,
        catalog: Arc<dyn CardCatalog>,
    ) -> Self {
        Self {
            store,
            broadcaster,
            lobbies,
            catalog,
        }
    }
}

struct SessionEntry {
    engine: GameEngine,
    /// Sequence number of the last published event.
    sequence: u64,
}

/// Open sessions keyed by id.
pub struct SessionRegistry {
    config: EngineConfig,
    gateways: Gateways,
    sessions: RwLock<FxHashMap<SessionId, Arc<Mutex<SessionEntry>>>>,
    rng: Mutex<GameRng>,
}

impl SessionRegistry {
    /// Create a registry that shuffles decks from OS entropy.
    #[must_use]
    pub fn new(config: EngineConfig, gateways: Gateways) -> Self {
        Self::with_rng(config, gateways, GameRng::from_entropy())
    }

    /// Create a registry with a fixed randomness source, for replays and tests.
    #[must_use]
    pub fn with_rng(config: EngineConfig, gateways: Gateways, rng: GameRng) -> Self {
        Self {
            config,
            gateways,
            sessions: RwLock::new(FxHashMap::default()),
            rng: Mutex::new(rng),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub async fn is_open(&self, session_id: &SessionId) -> bool {
        self.sessions.read().await.contains_key(session_id)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Bring a session into memory.
    ///
    /// An already open session is returned as is. Otherwise the saved state
    /// is restored, and failing that the session is initialized from its
    /// lobby.
    pub async fn open(&self, session_id: &SessionId) -> Result<GameState, SessionError> {
        let existing = self.sessions.read().await.get(session_id).cloned();
        if let Some(entry) = existing {
            let snapshot = entry.lock().await.engine.snapshot();
            return Ok(snapshot);
        }

        let state = match self.gateways.store.load(session_id).await? {
            Some(state) => {
                debug!(session = %session_id, "restored saved state");
                state
            }
            None => {
                let lobby = self
                    .gateways
                    .lobbies
                    .load_lobby(session_id)
                    .await?
                    .ok_or_else(|| SessionError::SessionNotFound(session_id.clone()))?;
                initialize(&lobby, &self.config)?
            }
        };

        let entry = {
            let mut sessions = self.sessions.write().await;
            Arc::clone(sessions.entry(session_id.clone()).or_insert_with(|| {
                Arc::new(Mutex::new(SessionEntry {
                    engine: GameEngine::new(state),
                    sequence: 0,
                }))
            }))
        };

        info!(session = %session_id, "session opened");
        let snapshot = entry.lock().await.engine.snapshot();
        Ok(snapshot)
    }

    /// Start a waiting session.
    ///
    /// Every lobby player without saved zones gets a shuffled deck built from
    /// their collection and an opening hand. The started state is saved and
    /// broadcast as a snapshot.
    pub async fn start(&self, session_id: &SessionId) -> Result<GameState, SessionError> {
        self.open(session_id).await?;
        let entry = self.entry(session_id).await?;
        let mut entry = entry.lock().await;

        if entry.engine.state().status != GameStatus::Waiting {
            return Err(SessionError::AlreadyStarted(session_id.clone()));
        }

        let mut lobby = self
            .gateways
            .lobbies
            .load_lobby(session_id)
            .await?
            .ok_or_else(|| SessionError::SessionNotFound(session_id.clone()))?;

        let rng = self.rng.lock().await.fork();
        for player in lobby.players.iter_mut().filter(|p| p.saved.is_none()) {
            let owned = self.gateways.catalog.owned_cards(&player.user_id).await?;
            player.saved = Some(prepare_loadout(&player.user_id, owned, &rng, &self.config)?);
        }

        lobby.status = LobbyStatus::Active;
        let state = initialize(&lobby, &self.config)?;
        self.gateways.store.save(session_id, &state).await?;

        entry.engine = GameEngine::new(state);
        let snapshot = entry.engine.snapshot();
        info!(
            session = %session_id,
            players = snapshot.player_count(),
            first = ?snapshot.current_turn_player_id,
            "session started"
        );

        self.publish(&mut entry, session_id, EventPayload::Snapshot {
            state: snapshot.clone(),
        })
        .await
        .map_err(SessionError::Broadcast)?;
        Ok(snapshot)
    }

    /// Announce that a participant connected, returning the current state.
    ///
    /// Transports subscribe to the broadcaster themselves; this only checks
    /// membership and tells the others.
    pub async fn join(&self, session_id: &SessionId, player_id: &PlayerId) -> Result<GameState, SessionError> {
        let entry = self.entry(session_id).await?;
        let mut entry = entry.lock().await;
        Self::check_participant(&entry, session_id, player_id)?;

        let snapshot = entry.engine.snapshot();
        self.publish(&mut entry, session_id, EventPayload::PlayerJoined {
            player_id: player_id.clone(),
        })
        .await
        .map_err(SessionError::Broadcast)?;
        Ok(snapshot)
    }

    /// Announce that a participant disconnected. Their seat stays in the match.
    pub async fn leave(&self, session_id: &SessionId, player_id: &PlayerId) -> Result<(), SessionError> {
        let entry = self.entry(session_id).await?;
        let mut entry = entry.lock().await;
        Self::check_participant(&entry, session_id, player_id)?;

        self.publish(&mut entry, session_id, EventPayload::PlayerLeft {
            player_id: player_id.clone(),
        })
        .await
        .map_err(SessionError::Broadcast)
    }

    /// Apply one action to an open session.
    pub async fn submit(&self, session_id: &SessionId, action: &Action) -> Result<Outcome, SessionError> {
        let entry = self.entry(session_id).await?;
        let mut entry = entry.lock().await;

        let mut working = entry.engine.clone();
        let outcome = working.process_action(action)?;

        self.gateways.store.save(session_id, working.state()).await?;
        entry.engine = working;

        if let Some(winner) = outcome.winner() {
            info!(session = %session_id, %winner, "session finished");
        }

        let snapshot = entry.engine.snapshot();
        self.publish(&mut entry, session_id, EventPayload::Snapshot { state: snapshot })
            .await
            .map_err(SessionError::Broadcast)?;
        self.publish(&mut entry, session_id, EventPayload::Outcome {
            outcome: outcome.clone(),
        })
        .await
        .map_err(SessionError::Broadcast)?;

        Ok(outcome)
    }

    /// Current state of an open session.
    pub async fn snapshot(&self, session_id: &SessionId) -> Result<GameState, SessionError> {
        let entry = self.entry(session_id).await?;
        let snapshot = entry.lock().await.engine.snapshot();
        Ok(snapshot)
    }

    /// Drop a session from memory. Saved state is kept.
    ///
    /// Returns whether the session was open.
    pub async fn close(&self, session_id: &SessionId) -> Result<bool, SessionError> {
        let removed = self.sessions.write().await.remove(session_id);
        if removed.is_some() {
            self.gateways.broadcaster.close(session_id).await?;
            info!(session = %session_id, "session closed");
        }
        Ok(removed.is_some())
    }

    async fn entry(&self, session_id: &SessionId) -> Result<Arc<Mutex<SessionEntry>>, SessionError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::SessionNotFound(session_id.clone()))
    }

    fn check_participant(entry: &SessionEntry, session_id: &SessionId, player_id: &PlayerId) -> Result<(), SessionError> {
        if entry.engine.state().player(player_id).is_none() {
            return Err(SessionError::NotAParticipant {
                session: session_id.clone(),
                player: player_id.clone(),
            });
        }
        Ok(())
    }

    async fn publish(&self, entry: &mut SessionEntry, session_id: &SessionId, payload: EventPayload) -> Result<(), StoreError> {
        entry.sequence += 1;
        self.gateways
            .broadcaster
            .publish(SessionEvent {
                session_id: session_id.clone(),
                sequence: entry.sequence,
                payload,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardRegistry;
    use crate::session::init::{Lobby, LobbyPlayer};
    use crate::session::memory::{ChannelBroadcaster, MemoryLobbyStore, MemoryStateStore};

    fn registry(lobbies: MemoryLobbyStore) -> SessionRegistry {
        let gateways = Gateways::new(
            Arc::new(MemoryStateStore::new()),
            Arc::new(ChannelBroadcaster::new()),
            Arc::new(lobbies),
            Arc::new(CardRegistry::new()),
        );
        SessionRegistry::with_rng(EngineConfig::default(), gateways, GameRng::new(1))
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let registry = registry(MemoryLobbyStore::new());
        let id = SessionId::new("ghost");

        assert!(matches!(registry.open(&id).await, Err(SessionError::SessionNotFound(_))));
        assert!(matches!(registry.snapshot(&id).await, Err(SessionError::SessionNotFound(_))));
        assert!(matches!(
            registry.submit(&id, &Action::draw("alice")).await,
            Err(SessionError::SessionNotFound(_))
        ));
        assert!(!registry.close(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_open_is_idempotent() {
        let lobbies = MemoryLobbyStore::new();
        lobbies
            .insert(Lobby::new("s-1").with_player(LobbyPlayer::new("alice", "Alice", 0)))
            .unwrap();
        let registry = registry(lobbies);
        let id = SessionId::new("s-1");

        let first = registry.open(&id).await.unwrap();
        let second = registry.open(&id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.status, GameStatus::Waiting);
        assert_eq!(registry.session_count().await, 1);
        assert!(registry.close(&id).await.unwrap());
        assert!(!registry.is_open(&id).await);
    }

    #[tokio::test]
    async fn test_join_requires_membership() {
        let lobbies = MemoryLobbyStore::new();
        lobbies
            .insert(Lobby::new("s-1").with_player(LobbyPlayer::new("alice", "Alice", 0)))
            .unwrap();
        let registry = registry(lobbies);
        let id = SessionId::new("s-1");
        registry.open(&id).await.unwrap();

        assert!(registry.join(&id, &PlayerId::new("alice")).await.is_ok());
        assert!(matches!(
            registry.join(&id, &PlayerId::new("mallory")).await,
            Err(SessionError::NotAParticipant { .. })
        ));
    }

    #[tokio::test]
    async fn test_start_without_cards_fails() {
        let lobbies = MemoryLobbyStore::new();
        lobbies
            .insert(Lobby::new("s-1").with_player(LobbyPlayer::new("alice", "Alice", 0)))
            .unwrap();
        let registry = registry(lobbies);
        let id = SessionId::new("s-1");

        assert!(matches!(
            registry.start(&id).await,
            Err(SessionError::EmptyCollection(_))
        ));
        assert_eq!(registry.snapshot(&id).await.unwrap().status, GameStatus::Waiting);
    }
}
