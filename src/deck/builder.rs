//! Deck construction from an owned-card collection.

use im::Vector;

use crate::cards::Card;
use crate::core::GameRng;

/// An opening hand and the deck left after dealing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpeningHand {
    pub hand: Vector<Card>,
    pub remaining_deck: Vector<Card>,
}

/// Shuffle the owned cards and keep at most `max_size` of them.
///
/// Shuffling the whole collection before truncating gives every subset and
/// every order the same probability. An empty collection yields an empty
/// deck; refusing to start such a match is the host's job.
///
/// ```
/// use clash_engine::cards::{Card, CharacterCard};
/// use clash_engine::core::GameRng;
/// use clash_engine::deck::build_deck;
///
/// let owned: Vec<Card> = (0..40)
///     .map(|i| CharacterCard::new(format!("c{i}"), "Grunt", 10, 10, 1).into())
///     .collect();
///
/// let deck = build_deck(owned, &mut GameRng::new(7), 30);
/// assert_eq!(deck.len(), 30);
/// ```
#[must_use]
pub fn build_deck(owned: Vec<Card>, rng: &mut GameRng, max_size: usize) -> Vector<Card> {
    let mut cards = owned;
    rng.shuffle(&mut cards);
    cards.truncate(max_size);
    Vector::from(cards)
}

/// Deal the first `hand_size` cards of the deck into a hand.
#[must_use]
pub fn draw_initial_hand(mut deck: Vector<Card>, hand_size: usize) -> OpeningHand {
    let split = hand_size.min(deck.len());
    let remaining_deck = deck.split_off(split);
    OpeningHand {
        hand: deck,
        remaining_deck,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CharacterCard, ItemCard};

    fn collection(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| {
                if i % 3 == 0 {
                    ItemCard::new(format!("i{i}"), "Potion", "heal:5").into()
                } else {
                    CharacterCard::new(format!("c{i}"), "Grunt", 10, 10, 1).into()
                }
            })
            .collect()
    }

    #[test]
    fn test_deck_capped() {
        let deck = build_deck(collection(45), &mut GameRng::new(1), 30);
        assert_eq!(deck.len(), 30);
    }

    #[test]
    fn test_small_collection_kept_whole() {
        let deck = build_deck(collection(7), &mut GameRng::new(1), 30);

        let mut ids: Vec<CardId> = deck.iter().map(|c| c.id().clone()).collect();
        let mut expected: Vec<CardId> = collection(7).iter().map(|c| c.id().clone()).collect();
        ids.sort();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_empty_collection() {
        let deck = build_deck(Vec::new(), &mut GameRng::new(1), 30);
        assert!(deck.is_empty());

        let opening = draw_initial_hand(deck, 5);
        assert!(opening.hand.is_empty());
        assert!(opening.remaining_deck.is_empty());
    }

    #[test]
    fn test_same_seed_same_deck() {
        let a = build_deck(collection(20), &mut GameRng::new(99), 30);
        let b = build_deck(collection(20), &mut GameRng::new(99), 30);
        assert_eq!(a, b);
    }

    #[test]
    fn test_initial_hand_split() {
        let deck = Vector::from(collection(8));
        let opening = draw_initial_hand(deck.clone(), 5);

        assert_eq!(opening.hand.len(), 5);
        assert_eq!(opening.remaining_deck.len(), 3);
        assert_eq!(opening.hand.front(), deck.front());
        assert_eq!(opening.remaining_deck.front(), deck.get(5));
    }

    #[test]
    fn test_initial_hand_short_deck() {
        let opening = draw_initial_hand(Vector::from(collection(3)), 5);

        assert_eq!(opening.hand.len(), 3);
        assert!(opening.remaining_deck.is_empty());
    }
}
