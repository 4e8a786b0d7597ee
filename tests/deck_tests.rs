//! Deck building properties.

use std::collections::HashSet;

use proptest::prelude::*;

use clash_engine::cards::{Card, CardId, CharacterCard, ItemCard};
use clash_engine::core::config::{DEFAULT_INITIAL_HAND_SIZE, DEFAULT_MAX_DECK_SIZE};
use clash_engine::core::GameRng;
use clash_engine::deck::{build_deck, draw_initial_hand};

fn owned(n: usize) -> Vec<Card> {
    (0..n)
        .map(|i| {
            if i % 4 == 0 {
                ItemCard::new(format!("i{i}"), "Relic", "none").into()
            } else {
                CharacterCard::new(format!("c{i}"), "Grunt", 10, 10, 1).into()
            }
        })
        .collect()
}

#[test]
fn test_same_seed_same_deck() {
    let a = build_deck(owned(50), &mut GameRng::new(11), DEFAULT_MAX_DECK_SIZE);
    let b = build_deck(owned(50), &mut GameRng::new(11), DEFAULT_MAX_DECK_SIZE);
    let c = build_deck(owned(50), &mut GameRng::new(12), DEFAULT_MAX_DECK_SIZE);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_every_card_can_make_the_cut() {
    // With 40 owned and 30 kept, each card should show up in most decks.
    let mut rng = GameRng::new(3);
    let mut seen: HashSet<CardId> = HashSet::new();
    for _ in 0..50 {
        for card in build_deck(owned(40), &mut rng, DEFAULT_MAX_DECK_SIZE) {
            seen.insert(card.id().clone());
        }
    }
    assert_eq!(seen.len(), 40);
}

proptest! {
    #[test]
    fn prop_deck_is_distinct_subset(n in 0usize..80, seed in any::<u64>()) {
        let input = owned(n);
        let input_ids: HashSet<CardId> = input.iter().map(|c| c.id().clone()).collect();

        let deck = build_deck(input, &mut GameRng::new(seed), DEFAULT_MAX_DECK_SIZE);
        prop_assert_eq!(deck.len(), n.min(DEFAULT_MAX_DECK_SIZE));

        let deck_ids: HashSet<CardId> = deck.iter().map(|c| c.id().clone()).collect();
        prop_assert_eq!(deck_ids.len(), deck.len());
        prop_assert!(deck_ids.is_subset(&input_ids));
    }

    #[test]
    fn prop_opening_hand_partitions_deck(n in 0usize..40, seed in any::<u64>()) {
        let deck = build_deck(owned(n), &mut GameRng::new(seed), DEFAULT_MAX_DECK_SIZE);
        let size = deck.len();

        let opening = draw_initial_hand(deck.clone(), DEFAULT_INITIAL_HAND_SIZE);
        prop_assert!(opening.hand.len() <= DEFAULT_INITIAL_HAND_SIZE);
        prop_assert_eq!(opening.hand.len() + opening.remaining_deck.len(), size);

        let mut rejoined = opening.hand.clone();
        rejoined.append(opening.remaining_deck);
        prop_assert_eq!(rejoined, deck);
    }
}
