//! Deployed card instances - runtime combat state.
//!
//! `DeployedCharacter` wraps a catalog `CharacterCard` with a live defense
//! value. Combat reduces the live value; the definition keeps its printed
//! defense so persistence can round-trip both.

use serde::{Deserialize, Serialize};

use super::definition::{CardId, CharacterCard};

/// A character on a player's battlefield.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedCharacter {
    /// The catalog definition (never mutated).
    pub card: CharacterCard,

    /// Current defense. Starts at the printed defense.
    pub live_defense: i64,
}

impl DeployedCharacter {
    /// Deploy a character at full defense.
    #[must_use]
    pub fn new(card: CharacterCard) -> Self {
        let live_defense = card.defense;
        Self { card, live_defense }
    }

    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.card.id
    }

    #[must_use]
    pub fn power(&self) -> i64 {
        self.card.power
    }

    #[must_use]
    pub fn speed(&self) -> i64 {
        self.card.speed
    }

    /// Absorb a hit and return the resulting defense.
    ///
    /// The result may be negative; its magnitude is the overflow that
    /// carries through to the owning player. Saturates instead of
    /// overflowing on extreme stats.
    pub fn absorb(&mut self, power: i64) -> i64 {
        self.live_defense = self.live_defense.saturating_sub(power);
        self.live_defense
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.live_defense <= 0
    }
}
