//! Match-start loadouts: owned collection to deck and opening hand.

use im::Vector;
use tracing::debug;

use super::error::SessionError;
use super::init::SavedPlayerState;
use crate::cards::Card;
use crate::core::{EngineConfig, GameRng, PlayerId};
use crate::deck::{build_deck, draw_initial_hand};

/// Build a player's starting zones from the cards they own.
///
/// Each player shuffles from their own stream of `rng`, so the order players
/// are prepared in does not change anyone's deck. A player with no cards
/// cannot start a match.
pub fn prepare_loadout(
    user: &PlayerId,
    owned: Vec<Card>,
    rng: &GameRng,
    config: &EngineConfig,
) -> Result<SavedPlayerState, SessionError> {
    if owned.is_empty() {
        return Err(SessionError::EmptyCollection(user.clone()));
    }

    let mut player_rng = rng.for_context(user.as_str());
    let deck = build_deck(owned, &mut player_rng, config.max_deck_size);
    let opening = draw_initial_hand(deck, config.initial_hand_size);

    debug!(
        player = %user,
        hand = opening.hand.len(),
        deck = opening.remaining_deck.len(),
        "loadout prepared"
    );

    Ok(SavedPlayerState {
        hp: config.starting_hp,
        hand: opening.hand,
        deck: opening.remaining_deck,
        deployed_characters: Vector::new(),
        deployed_items: Vector::new(),
        plan_card: None,
    })
}
