//! Session hosting: many concurrent matches behind async gateways.
//!
//! - `init`: lobby to initial `GameState`
//! - `loadout`: owned collection to deck and opening hand
//! - `gateway`: persistence, broadcast, lobby and catalog boundaries
//! - `memory` / `file`: bundled gateway implementations
//! - `registry`: per-session serialization and the submit pipeline

mod error;
mod event;
mod file;
mod gateway;
mod init;
mod loadout;
mod memory;
mod registry;

pub use error::SessionError;
pub use event::{EventPayload, SessionEvent, SessionId};
pub use file::FileStateStore;
pub use gateway::{Broadcaster, CardCatalog, LobbySource, StateStore, StoreError};
pub use init::{initialize, Lobby, LobbyPlayer, LobbyStatus, SavedPlayerState};
pub use loadout::prepare_loadout;
pub use memory::{ChannelBroadcaster, MemoryLobbyStore, MemoryStateStore};
pub use registry::{Gateways, SessionRegistry};
