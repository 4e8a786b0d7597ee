//! Attack resolution.
//!
//! Two modes:
//! - **Untargeted**: every deployed character of the attacker strikes the
//!   target player directly for the sum of their power.
//! - **Targeted**: one named character strikes. If the target has deployed
//!   characters, the first one absorbs the hit; a defeated character leaves
//!   the battlefield, any overflow reaches the target player, and the
//!   attacker draws a card (momentum). Otherwise the hit lands on the player.
//!
//! All checks run before any mutation, so a rejected attack leaves the state
//! untouched.

use tracing::trace;

use super::error::{EngineError, UnsupportedFeature};
use super::outcome::AttackOutcome;
use crate::cards::CardId;
use crate::core::{GameState, PlayerId, PlayerState};

/// Defeated characters that would end the match once tracking exists.
pub const DEFEATED_CHARACTERS_TO_WIN: u32 = 3;

/// Characters of `player` defeated so far this match.
///
/// Not tracked yet; always `Unsupported`.
pub fn defeated_character_count(_player: &PlayerState) -> Result<u32, EngineError> {
    Err(EngineError::Unsupported(UnsupportedFeature::DefeatedCharacterTracking))
}

/// Validate and resolve an attack, including the win check.
pub fn resolve_attack(
    state: &mut GameState,
    attacker_id: &PlayerId,
    target_id: &PlayerId,
    attacker_card_id: Option<&CardId>,
) -> Result<AttackOutcome, EngineError> {
    let target = state
        .player(target_id)
        .ok_or_else(|| EngineError::PlayerNotFound(target_id.clone()))?;
    let attacker = state
        .player(attacker_id)
        .ok_or_else(|| EngineError::PlayerNotFound(attacker_id.clone()))?;

    if !attacker.is_active {
        return Err(EngineError::PlayerInactive(attacker_id.clone()));
    }
    if !target.is_active {
        return Err(EngineError::PlayerInactive(target_id.clone()));
    }

    let striker_power = match attacker_card_id {
        Some(card_id) => Some(
            attacker
                .deployed_character(card_id)
                .ok_or_else(|| EngineError::CardNotFound(card_id.clone()))?
                .power(),
        ),
        None => None,
    };
    let total_power = attacker.total_power();

    let mut outcome = AttackOutcome {
        attacker_id: attacker_id.clone(),
        target_id: target_id.clone(),
        damage: 0,
        target_hp: 0,
        killed: false,
        defeated_card_id: None,
        momentum_card: None,
        winner_id: None,
    };

    let target = state
        .player_mut(target_id)
        .ok_or_else(|| EngineError::PlayerNotFound(target_id.clone()))?;

    match striker_power {
        None => {
            outcome.damage = total_power;
            target.take_damage(total_power);
        }
        Some(power) => {
            // The defender is always the target's first deployed character.
            let remaining = target.deployed_characters.get_mut(0).map(|d| d.absorb(power));
            match remaining {
                None => {
                    outcome.damage = power;
                    target.take_damage(power);
                }
                Some(remaining) if remaining <= 0 => {
                    let defeated = target.deployed_characters.pop_front();
                    outcome.defeated_card_id = defeated.map(|d| d.card.id);
                    outcome.killed = true;
                    outcome.damage = remaining.saturating_abs();
                    target.take_damage(outcome.damage);
                }
                Some(_) => {}
            }
        }
    }
    outcome.target_hp = target.hp;

    if outcome.killed {
        if let Some(attacker) = state.player_mut(attacker_id) {
            outcome.momentum_card = attacker.draw();
        }
        trace!(
            attacker = %attacker_id,
            momentum = outcome.momentum_card.is_some(),
            "defender defeated"
        );
    }

    check_winner(state, attacker_id, target_id, &mut outcome);
    Ok(outcome)
}

fn check_winner(state: &mut GameState, attacker_id: &PlayerId, target_id: &PlayerId, outcome: &mut AttackOutcome) {
    let Some(target) = state.player(target_id) else {
        return;
    };

    let finished = if target.is_defeated() {
        true
    } else {
        match defeated_character_count(target) {
            Ok(count) => count >= DEFEATED_CHARACTERS_TO_WIN,
            Err(err) => {
                trace!(target = %target_id, %err, "secondary win condition skipped");
                false
            }
        }
    };

    if finished {
        state.finish(attacker_id.clone());
        outcome.winner_id = Some(attacker_id.clone());
    }
}
