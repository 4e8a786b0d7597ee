//! Outcome records: what an applied action changed.
//!
//! Outcomes are the incremental half of a broadcast; the snapshot carries
//! the full state.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::core::{Phase, PlayerId};

/// Result of one attack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub attacker_id: PlayerId,
    pub target_id: PlayerId,

    /// Damage that reached the target's hit points.
    pub damage: i64,

    /// Target hit points after the attack.
    pub target_hp: i64,

    /// A deployed character was defeated.
    pub killed: bool,

    pub defeated_card_id: Option<CardId>,

    /// Card drawn by the attacker under the momentum rule.
    pub momentum_card: Option<Card>,

    /// Set when this attack ended the match.
    pub winner_id: Option<PlayerId>,
}

/// Incremental record of an applied action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// `card` is `None` when the deck was empty.
    Drew {
        player_id: PlayerId,
        card: Option<Card>,
        phase: Phase,
    },
    Deployed {
        player_id: PlayerId,
        card: Card,
        phase: Phase,
    },
    Attacked(AttackOutcome),
    TurnEnded {
        next_player_id: PlayerId,
        phase: Phase,
        turn_number: u32,
    },
}

impl Outcome {
    /// The winner, if this outcome finished the match.
    #[must_use]
    pub fn winner(&self) -> Option<&PlayerId> {
        match self {
            Outcome::Attacked(attack) => attack.winner_id.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_tag() {
        let outcome = Outcome::TurnEnded {
            next_player_id: PlayerId::new("b"),
            phase: Phase::Draw,
            turn_number: 2,
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "turn_ended");
        assert_eq!(json["next_player_id"], "b");
        assert_eq!(json["turn_number"], 2);
    }

    #[test]
    fn test_winner() {
        let attack = AttackOutcome {
            attacker_id: PlayerId::new("a"),
            target_id: PlayerId::new("b"),
            damage: 50,
            target_hp: 0,
            killed: false,
            defeated_card_id: None,
            momentum_card: None,
            winner_id: Some(PlayerId::new("a")),
        };

        assert_eq!(Outcome::Attacked(attack).winner(), Some(&PlayerId::new("a")));

        let drew = Outcome::Drew {
            player_id: PlayerId::new("a"),
            card: None,
            phase: Phase::Deploy,
        };
        assert_eq!(drew.winner(), None);
    }
}
