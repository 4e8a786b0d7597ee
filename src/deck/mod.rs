//! Deck builder: owned collection to shuffled deck and opening hand.

pub mod builder;

pub use builder::{build_deck, draw_initial_hand, OpeningHand};
