//! Card registry for definition lookup and ownership.
//!
//! The `CardRegistry` stores card definitions keyed by `CardId` and the list
//! of cards each user has unlocked. The session layer serves it as the
//! in-process card catalog.

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId, CardKind};
use crate::core::PlayerId;

/// Registry of card definitions and per-user collections.
///
/// ## Example
///
/// ```
/// use clash_engine::cards::{CardRegistry, CharacterCard, CardId};
/// use clash_engine::core::PlayerId;
///
/// let mut registry = CardRegistry::new();
/// registry.register(CharacterCard::new("c1", "Knight", 50, 30, 4).into());
///
/// let alice = PlayerId::new("alice");
/// assert!(registry.grant(&alice, &CardId::new("c1")));
/// assert_eq!(registry.collection(&alice).len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Card>,
    owned: FxHashMap<PlayerId, Vec<CardId>>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: Card) {
        if self.cards.contains_key(card.id()) {
            panic!("Card with ID {} already registered", card.id());
        }
        self.cards.insert(card.id().clone(), card);
    }

    /// Unlock a registered card for a user.
    ///
    /// Returns false if the card is not registered. Granting the same card
    /// twice is a no-op.
    pub fn grant(&mut self, user: &PlayerId, card_id: &CardId) -> bool {
        if !self.cards.contains_key(card_id) {
            return false;
        }
        let owned = self.owned.entry(user.clone()).or_default();
        if !owned.contains(card_id) {
            owned.push(card_id.clone());
        }
        true
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Find cards by kind.
    pub fn find_by_kind(&self, kind: CardKind) -> impl Iterator<Item = &Card> {
        self.cards.values().filter(move |c| c.kind() == kind)
    }

    /// Resolve a user's unlocked cards, in unlock order.
    #[must_use]
    pub fn collection(&self, user: &PlayerId) -> Vec<Card> {
        self.owned
            .get(user)
            .map(|ids| ids.iter().filter_map(|id| self.cards.get(id).cloned()).collect())
            .unwrap_or_default()
    }
}
