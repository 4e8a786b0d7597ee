//! Player identification and per-player match state.
//!
//! ## PlayerId
//!
//! User identifier supplied by the transport layer from an authenticated
//! identity.
//!
//! ## PlayerState
//!
//! Hit points and card zones for one participant. Zones are persistent
//! vectors so snapshots share structure with the live state.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, DeployedCharacter, ItemCard};

/// Player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One participant's state within a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub user_id: PlayerId,
    pub username: String,

    /// Hit points. Never below 0.
    pub hp: i64,

    /// Cards in hand, in draw order.
    pub hand: Vector<Card>,

    /// Remaining deck. Front is the next draw.
    pub deck: Vector<Card>,

    pub deployed_characters: Vector<DeployedCharacter>,
    pub deployed_items: Vector<ItemCard>,

    /// Hidden saved card. Reserved; no action reads or writes it yet.
    pub plan_card: Option<Card>,

    /// Join position, fixed for the life of the match.
    pub position: u32,

    /// Inactive players cannot attack or be attacked.
    pub is_active: bool,
}

impl PlayerState {
    /// Create a player with empty zones.
    #[must_use]
    pub fn new(user_id: PlayerId, username: impl Into<String>, position: u32, hp: i64) -> Self {
        Self {
            user_id,
            username: username.into(),
            hp,
            hand: Vector::new(),
            deck: Vector::new(),
            deployed_characters: Vector::new(),
            deployed_items: Vector::new(),
            plan_card: None,
            position,
            is_active: true,
        }
    }

    /// Move the front card of the deck into the hand.
    ///
    /// Returns the drawn card, or `None` if the deck is empty.
    pub fn draw(&mut self) -> Option<Card> {
        let card = self.deck.pop_front()?;
        self.hand.push_back(card.clone());
        Some(card)
    }

    /// Index of a card in hand.
    #[must_use]
    pub fn hand_position(&self, card_id: &CardId) -> Option<usize> {
        self.hand.iter().position(|c| c.id() == card_id)
    }

    /// Find a deployed character by card ID.
    #[must_use]
    pub fn deployed_character(&self, card_id: &CardId) -> Option<&DeployedCharacter> {
        self.deployed_characters.iter().find(|c| c.id() == card_id)
    }

    /// Sum of power over deployed characters.
    #[must_use]
    pub fn total_power(&self) -> i64 {
        self.deployed_characters
            .iter()
            .map(DeployedCharacter::power)
            .fold(0, i64::saturating_add)
    }

    /// Sum of speed over deployed characters.
    #[must_use]
    pub fn total_speed(&self) -> i64 {
        self.deployed_characters
            .iter()
            .map(DeployedCharacter::speed)
            .fold(0, i64::saturating_add)
    }

    /// Apply damage, flooring hit points at 0. Returns the new hit points.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        self.hp = self.hp.saturating_sub(amount).max(0);
        self.hp
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CharacterCard;

    fn knight(id: &str) -> Card {
        CharacterCard::new(id, "Knight", 50, 30, 4).into()
    }

    #[test]
    fn test_player_id_basics() {
        let id = PlayerId::new("alice");
        assert_eq!(id.as_str(), "alice");
        assert_eq!(format!("{}", id), "alice");
        assert_eq!(PlayerId::from("alice"), id);
    }

    #[test]
    fn test_new_player_defaults() {
        let player = PlayerState::new(PlayerId::new("alice"), "Alice", 0, 100);

        assert_eq!(player.hp, 100);
        assert!(player.hand.is_empty());
        assert!(player.deck.is_empty());
        assert!(player.plan_card.is_none());
        assert!(player.is_active);
    }

    #[test]
    fn test_draw_from_front() {
        let mut player = PlayerState::new(PlayerId::new("alice"), "Alice", 0, 100);
        player.deck = Vector::from(vec![knight("c1"), knight("c2")]);

        let drawn = player.draw();
        assert_eq!(drawn.as_ref().map(Card::id), Some(&CardId::new("c1")));
        assert_eq!(player.hand.len(), 1);
        assert_eq!(player.deck.len(), 1);

        player.draw();
        assert!(player.draw().is_none());
        assert_eq!(player.hand.len(), 2);
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut player = PlayerState::new(PlayerId::new("alice"), "Alice", 0, 30);

        assert_eq!(player.take_damage(10), 20);
        assert!(!player.is_defeated());
        assert_eq!(player.take_damage(50), 0);
        assert!(player.is_defeated());
    }

    #[test]
    fn test_totals() {
        let mut player = PlayerState::new(PlayerId::new("alice"), "Alice", 0, 100);
        player
            .deployed_characters
            .push_back(DeployedCharacter::new(CharacterCard::new("c1", "Knight", 50, 30, 4)));
        player
            .deployed_characters
            .push_back(DeployedCharacter::new(CharacterCard::new("c2", "Archer", 20, 10, 9)));

        assert_eq!(player.total_power(), 70);
        assert_eq!(player.total_speed(), 13);
        assert!(player.deployed_character(&CardId::new("c2")).is_some());
        assert!(player.deployed_character(&CardId::new("c3")).is_none());
    }

    #[test]
    fn test_extreme_stats_saturate() {
        let mut player = PlayerState::new(PlayerId::new("alice"), "Alice", 0, 10);
        player
            .deployed_characters
            .push_back(DeployedCharacter::new(CharacterCard::new("c1", "Titan", i64::MAX, 1, i64::MAX)));
        player
            .deployed_characters
            .push_back(DeployedCharacter::new(CharacterCard::new("c2", "Giant", i64::MAX, 1, 5)));

        assert_eq!(player.total_power(), i64::MAX);
        assert_eq!(player.total_speed(), i64::MAX);

        player.hp = i64::MIN + 1;
        assert_eq!(player.take_damage(i64::MAX), 0);
    }
}
