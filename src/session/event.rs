//! Session identifiers and broadcast events.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId};
use crate::rules::Outcome;

/// Identifier of one match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// What a broadcast carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventPayload {
    /// Full state after an applied action or a match start.
    Snapshot { state: GameState },
    /// Incremental record of an applied action.
    Outcome { outcome: Outcome },
    PlayerJoined { player_id: PlayerId },
    PlayerLeft { player_id: PlayerId },
}

/// One broadcast to every participant of a session.
///
/// `sequence` increases by one per event within a session, in processing
/// order, so receivers can detect gaps and duplicates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub session_id: SessionId,
    pub sequence: u64,
    #[serde(flatten)]
    pub payload: EventPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id() {
        let id = SessionId::from("s-1");
        assert_eq!(id.as_str(), "s-1");
        assert_eq!(id.to_string(), "s-1");
    }

    #[test]
    fn test_event_wire_format() {
        let event = SessionEvent {
            session_id: SessionId::new("s-1"),
            sequence: 3,
            payload: EventPayload::PlayerJoined {
                player_id: PlayerId::new("alice"),
            },
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["session_id"], "s-1");
        assert_eq!(json["sequence"], 3);
        assert_eq!(json["event"], "player_joined");
        assert_eq!(json["player_id"], "alice");

        let decoded: SessionEvent = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, event);
    }
}
