//! # clash-engine
//!
//! A server-authoritative engine for turn-based, multiplayer card battles.
//!
//! ## Design Principles
//!
//! 1. **Server-Authoritative**: Clients submit actions; only the engine
//!    changes state. Every action is validated before anything mutates, so a
//!    rejected action leaves the match untouched.
//!
//! 2. **N-Player**: Turn order, attacks and victory work for any number of
//!    participants.
//!
//! 3. **Infrastructure at the Edges**: Persistence, broadcast, lobbies and
//!    card ownership sit behind async gateway traits. The rules never await.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Cheap state clones via `im-rs`, used for
//!   snapshots and for the apply-save-commit pipeline.
//!
//! - **Deterministic Shuffles**: Decks are shuffled from a seedable
//!   ChaCha8 stream, so a seed reproduces a whole match start.
//!
//! ## Modules
//!
//! - `core`: Players, match state, actions, RNG, configuration
//! - `cards`: Card definitions, deployed characters, catalog
//! - `deck`: Deck building and opening hands
//! - `rules`: Action processing, combat, victory
//! - `session`: Lobby initialization, gateways, multi-session hosting

pub mod core;
pub mod cards;
pub mod deck;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, ConfigError, EngineConfig, GameRng, GameState, GameStatus, Phase, PlayerId,
    PlayerState,
};

pub use crate::cards::{
    BattlefieldCard, Card, CardId, CardKind, CardRegistry, CharacterCard, DeployedCharacter, ItemCard,
};

pub use crate::deck::{build_deck, draw_initial_hand, OpeningHand};

pub use crate::rules::{AttackOutcome, EngineError, ErrorKind, GameEngine, Outcome, UnsupportedFeature};

pub use crate::session::{
    Broadcaster, CardCatalog, ChannelBroadcaster, EventPayload, FileStateStore, Gateways, Lobby,
    LobbyPlayer, LobbySource, LobbyStatus, MemoryLobbyStore, MemoryStateStore, SessionError,
    SessionEvent, SessionId, SessionRegistry, StateStore, StoreError,
};
