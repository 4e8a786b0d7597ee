//! File-backed `StateStore`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::event::SessionId;
use super::gateway::{StateStore, StoreError};
use crate::core::GameState;

/// Stores each session's state as `session_{id}.bin` in bincode format.
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// mid-save leaves the previous state readable.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    base_dir: PathBuf,
}

impl FileStateStore {
    /// Create a store rooted at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn state_path(&self, session_id: &SessionId) -> Result<PathBuf, StoreError> {
        let id = session_id.as_str();
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidSessionId(id.to_string()));
        }
        Ok(self.base_dir.join(format!("session_{id}.bin")))
    }

    /// Ids of every session with saved state, sorted.
    pub async fn list_sessions(&self) -> Result<Vec<SessionId>, StoreError> {
        let mut sessions = Vec::new();
        let mut entries = fs::read_dir(&self.base_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let id = path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|s| s.strip_prefix("session_"))
                .and_then(|s| s.strip_suffix(".bin"));
            if let Some(id) = id {
                sessions.push(SessionId::new(id));
            }
        }

        sessions.sort();
        Ok(sessions)
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn load(&self, session_id: &SessionId) -> Result<Option<GameState>, StoreError> {
        let path = self.state_path(session_id)?;

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let state: GameState =
            bincode::deserialize(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;

        debug!("Loaded session[{}] from {}", session_id, path.display());
        Ok(Some(state))
    }

    async fn save(&self, session_id: &SessionId, state: &GameState) -> Result<(), StoreError> {
        let path = self.state_path(session_id)?;
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(state).map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes).await?;
        fs::rename(&temp_path, &path).await?;

        debug!("Saved session[{}] to {}", session_id, path.display());
        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> Result<(), StoreError> {
        let path = self.state_path(session_id)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted session[{}]", session_id);
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
