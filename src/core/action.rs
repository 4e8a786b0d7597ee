//! Action representation: who acts, and which of the four moves.
//!
//! The transport layer fills `player_id` from the authenticated identity.
//! `ActionKind` carries only the fields each move needs, so the processor's
//! dispatch is an exhaustive match.
//!
//! ## Wire form
//!
//! ```
//! use clash_engine::core::{Action, ActionKind};
//!
//! let action: Action = serde_json::from_str(
//!     r#"{"player_id":"alice","type":"attack","target_id":"bob","attacker_card_id":null}"#,
//! ).unwrap();
//!
//! assert!(matches!(action.kind, ActionKind::Attack { .. }));
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::state::Phase;
use crate::cards::{CardId, CardKind};

/// A move submitted by a participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub player_id: PlayerId,

    #[serde(flatten)]
    pub kind: ActionKind,
}

/// The four moves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    /// Draw the top card of the deck.
    Draw,

    /// Move a card from hand to the battlefield.
    Deploy { card_id: CardId, card_type: CardKind },

    /// Attack another player, optionally with a single named character.
    Attack {
        target_id: PlayerId,
        #[serde(default)]
        attacker_card_id: Option<CardId>,
    },

    /// Pass the turn to the next player.
    EndTurn,
}

impl ActionKind {
    /// Short name used in logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Draw => "draw",
            ActionKind::Deploy { .. } => "deploy",
            ActionKind::Attack { .. } => "attack",
            ActionKind::EndTurn => "end_turn",
        }
    }

    /// The phase this move is legal in. `None` means any active phase.
    #[must_use]
    pub fn required_phase(&self) -> Option<Phase> {
        match self {
            ActionKind::Draw => Some(Phase::Draw),
            ActionKind::Deploy { .. } => Some(Phase::Deploy),
            ActionKind::Attack { .. } => Some(Phase::Battle),
            ActionKind::EndTurn => None,
        }
    }
}

impl Action {
    #[must_use]
    pub fn new(player_id: impl Into<PlayerId>, kind: ActionKind) -> Self {
        Self {
            player_id: player_id.into(),
            kind,
        }
    }

    #[must_use]
    pub fn draw(player_id: impl Into<PlayerId>) -> Self {
        Self::new(player_id, ActionKind::Draw)
    }

    #[must_use]
    pub fn deploy(player_id: impl Into<PlayerId>, card_id: impl Into<CardId>, card_type: CardKind) -> Self {
        Self::new(
            player_id,
            ActionKind::Deploy {
                card_id: card_id.into(),
                card_type,
            },
        )
    }

    /// Untargeted attack with every deployed character.
    #[must_use]
    pub fn attack(player_id: impl Into<PlayerId>, target_id: impl Into<PlayerId>) -> Self {
        Self::new(
            player_id,
            ActionKind::Attack {
                target_id: target_id.into(),
                attacker_card_id: None,
            },
        )
    }

    /// Attack with one named character.
    #[must_use]
    pub fn attack_with(
        player_id: impl Into<PlayerId>,
        target_id: impl Into<PlayerId>,
        attacker_card_id: impl Into<CardId>,
    ) -> Self {
        Self::new(
            player_id,
            ActionKind::Attack {
                target_id: target_id.into(),
                attacker_card_id: Some(attacker_card_id.into()),
            },
        )
    }

    #[must_use]
    pub fn end_turn(player_id: impl Into<PlayerId>) -> Self {
        Self::new(player_id, ActionKind::EndTurn)
    }
}
