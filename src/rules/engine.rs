//! The action processor.
//!
//! `GameEngine` owns one match's state and applies actions to it one at a
//! time. Checks run in a fixed order:
//!
//! 1. The match is active (`GameNotActive`).
//! 2. The actor holds the turn (`NotYourTurn`).
//! 3. The current phase allows the move (`WrongPhase`), then move-specific
//!    checks.
//!
//! A rejected action leaves the state exactly as it was. Processing is
//! synchronous and in-memory; hosts serialize access per session.

use tracing::{debug, info, warn};

use super::combat;
use super::error::{EngineError, UnsupportedFeature};
use super::outcome::Outcome;
use crate::cards::{Card, CardId, CardKind, DeployedCharacter};
use crate::core::{Action, ActionKind, GameState, Phase, PlayerId};

/// Server-authoritative engine for a single match.
#[derive(Clone, Debug)]
pub struct GameEngine {
    state: GameState,
}

impl GameEngine {
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self { state }
    }

    /// Read-only view of the live state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// An independent copy of the current state.
    ///
    /// Mutating the copy never reaches the engine.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&PlayerId> {
        self.state.current_turn_player_id.as_ref()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Validate and apply one action.
    pub fn process_action(&mut self, action: &Action) -> Result<Outcome, EngineError> {
        let result = self.apply(action);
        match &result {
            Ok(outcome) => debug!(
                player = %action.player_id,
                action = action.kind.name(),
                phase = ?self.state.current_phase,
                ?outcome,
                "action applied"
            ),
            Err(err) => warn!(
                player = %action.player_id,
                action = action.kind.name(),
                %err,
                "action rejected"
            ),
        }
        result
    }

    fn apply(&mut self, action: &Action) -> Result<Outcome, EngineError> {
        self.check_turn(action)?;

        let player = &action.player_id;
        match &action.kind {
            ActionKind::Draw => self.handle_draw(player),
            ActionKind::Deploy { card_id, card_type } => self.handle_deploy(player, card_id, *card_type),
            ActionKind::Attack {
                target_id,
                attacker_card_id,
            } => self.handle_attack(player, target_id, attacker_card_id.as_ref()),
            ActionKind::EndTurn => self.handle_end_turn(),
        }
    }

    fn check_turn(&self, action: &Action) -> Result<(), EngineError> {
        if !self.state.is_active() {
            return Err(EngineError::GameNotActive);
        }

        match &self.state.current_turn_player_id {
            Some(current) if *current == action.player_id => {}
            Some(current) => {
                return Err(EngineError::NotYourTurn {
                    expected: current.clone(),
                    actual: action.player_id.clone(),
                })
            }
            None => return Err(EngineError::GameNotActive),
        }

        if let Some(required) = action.kind.required_phase() {
            if self.state.current_phase != Some(required) {
                return Err(EngineError::WrongPhase {
                    action: action.kind.name(),
                    found: self.state.current_phase,
                });
            }
        }
        Ok(())
    }

    /// Draw the front card. An empty deck is not a loss: the draw is
    /// skipped and the phase still advances.
    fn handle_draw(&mut self, player_id: &PlayerId) -> Result<Outcome, EngineError> {
        let player = self
            .state
            .player_mut(player_id)
            .ok_or_else(|| EngineError::PlayerNotFound(player_id.clone()))?;

        let card = player.draw();
        if card.is_none() {
            debug!(player = %player_id, "deck empty, draw skipped");
        }

        self.state.current_phase = Some(Phase::Deploy);
        Ok(Outcome::Drew {
            player_id: player_id.clone(),
            card,
            phase: Phase::Deploy,
        })
    }

    fn handle_deploy(
        &mut self,
        player_id: &PlayerId,
        card_id: &CardId,
        declared: CardKind,
    ) -> Result<Outcome, EngineError> {
        let player = self
            .state
            .player(player_id)
            .ok_or_else(|| EngineError::PlayerNotFound(player_id.clone()))?;

        let index = player
            .hand_position(card_id)
            .ok_or_else(|| EngineError::CardNotInHand(card_id.clone()))?;

        let actual = player.hand[index].kind();
        if actual != declared {
            return Err(EngineError::InvalidCardType {
                card: card_id.clone(),
                declared,
                actual,
            });
        }
        if actual == CardKind::Battlefield {
            return Err(EngineError::Unsupported(UnsupportedFeature::BattlefieldEffect));
        }

        let player = self
            .state
            .player_mut(player_id)
            .ok_or_else(|| EngineError::PlayerNotFound(player_id.clone()))?;
        let card = player.hand.remove(index);
        match &card {
            Card::Character(character) => player
                .deployed_characters
                .push_back(DeployedCharacter::new(character.clone())),
            Card::Item(item) => player.deployed_items.push_back(item.clone()),
            Card::Battlefield(_) => {}
        }

        self.state.current_phase = Some(Phase::Battle);
        Ok(Outcome::Deployed {
            player_id: player_id.clone(),
            card,
            phase: Phase::Battle,
        })
    }

    /// Attacks keep the phase; a player may attack repeatedly until ending
    /// the turn.
    fn handle_attack(
        &mut self,
        attacker_id: &PlayerId,
        target_id: &PlayerId,
        attacker_card_id: Option<&CardId>,
    ) -> Result<Outcome, EngineError> {
        let outcome = combat::resolve_attack(&mut self.state, attacker_id, target_id, attacker_card_id)?;

        if let Some(winner) = &outcome.winner_id {
            info!(winner = %winner, turn = self.state.turn_number, "match finished");
        }
        Ok(Outcome::Attacked(outcome))
    }

    fn handle_end_turn(&mut self) -> Result<Outcome, EngineError> {
        // An active match always has a non-empty turn order.
        let next = self
            .state
            .next_in_turn_order()
            .cloned()
            .ok_or(EngineError::GameNotActive)?;

        self.state.current_turn_player_id = Some(next.clone());
        self.state.current_phase = Some(Phase::Draw);
        self.state.turn_number += 1;

        info!(next = %next, turn = self.state.turn_number, "turn passed");
        Ok(Outcome::TurnEnded {
            next_player_id: next,
            phase: Phase::Draw,
            turn_number: self.state.turn_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BattlefieldCard, CharacterCard, ItemCard};
    use crate::core::{GameStatus, PlayerState};
    use im::Vector;

    fn engine() -> GameEngine {
        let mut state = GameState::new();
        let mut a = PlayerState::new(PlayerId::new("a"), "A", 0, 100);
        a.hand.push_back(CharacterCard::new("c1", "Knight", 50, 30, 4).into());
        a.hand.push_back(ItemCard::new("i1", "Potion", "heal:10").into());
        a.hand.push_back(BattlefieldCard::new("b1", "Volcano", "burn:5").into());
        a.deck.push_back(CharacterCard::new("c2", "Archer", 20, 10, 7).into());
        state.insert_player(a);
        state.insert_player(PlayerState::new(PlayerId::new("b"), "B", 1, 100));
        state.turn_order = Vector::from(vec![PlayerId::new("a"), PlayerId::new("b")]);
        state.activate();
        GameEngine::new(state)
    }

    #[test]
    fn test_waiting_rejects_everything() {
        let mut engine = GameEngine::new(GameState::new());
        assert_eq!(engine.process_action(&Action::draw("a")), Err(EngineError::GameNotActive));
        assert_eq!(engine.process_action(&Action::end_turn("a")), Err(EngineError::GameNotActive));
    }

    #[test]
    fn test_not_your_turn_checked_before_phase() {
        let mut engine = engine();
        let err = engine.process_action(&Action::attack("b", "a")).unwrap_err();
        assert_eq!(
            err,
            EngineError::NotYourTurn {
                expected: PlayerId::new("a"),
                actual: PlayerId::new("b"),
            }
        );
    }

    #[test]
    fn test_wrong_phase() {
        let mut engine = engine();
        let err = engine
            .process_action(&Action::deploy("a", "c1", CardKind::Character))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::WrongPhase {
                action: "deploy",
                found: Some(Phase::Draw),
            }
        );
    }

    #[test]
    fn test_draw_advances_phase() {
        let mut engine = engine();
        let outcome = engine.process_action(&Action::draw("a")).unwrap();

        assert!(matches!(outcome, Outcome::Drew { card: Some(_), phase: Phase::Deploy, .. }));
        assert_eq!(engine.state().current_phase, Some(Phase::Deploy));
        assert_eq!(engine.state().player(&PlayerId::new("a")).unwrap().hand.len(), 4);
    }

    #[test]
    fn test_deploy_item() {
        let mut engine = engine();
        engine.process_action(&Action::draw("a")).unwrap();
        engine
            .process_action(&Action::deploy("a", "i1", CardKind::Item))
            .unwrap();

        let a = engine.state().player(&PlayerId::new("a")).unwrap();
        assert_eq!(a.deployed_items.len(), 1);
        assert!(a.hand_position(&CardId::new("i1")).is_none());
        assert_eq!(engine.state().current_phase, Some(Phase::Battle));
    }

    #[test]
    fn test_deploy_type_mismatch() {
        let mut engine = engine();
        engine.process_action(&Action::draw("a")).unwrap();
        let before = engine.snapshot();

        let err = engine
            .process_action(&Action::deploy("a", "c1", CardKind::Item))
            .unwrap_err();
        assert_eq!(err.kind(), crate::rules::ErrorKind::InvalidCardType);
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_deploy_battlefield_unsupported() {
        let mut engine = engine();
        engine.process_action(&Action::draw("a")).unwrap();
        let before = engine.snapshot();

        let err = engine
            .process_action(&Action::deploy("a", "b1", CardKind::Battlefield))
            .unwrap_err();
        assert_eq!(err, EngineError::Unsupported(UnsupportedFeature::BattlefieldEffect));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_end_turn_from_any_phase() {
        let mut engine = engine();
        let outcome = engine.process_action(&Action::end_turn("a")).unwrap();

        assert_eq!(
            outcome,
            Outcome::TurnEnded {
                next_player_id: PlayerId::new("b"),
                phase: Phase::Draw,
                turn_number: 2,
            }
        );
        assert_eq!(engine.current_player(), Some(&PlayerId::new("b")));
    }

    #[test]
    fn test_finished_rejects_actions() {
        let mut engine = engine();
        engine.process_action(&Action::draw("a")).unwrap();
        engine
            .process_action(&Action::deploy("a", "c1", CardKind::Character))
            .unwrap();
        engine.process_action(&Action::attack("a", "b")).unwrap();
        engine.process_action(&Action::attack("a", "b")).unwrap();

        assert!(engine.is_finished());
        assert_eq!(engine.state().status, GameStatus::Finished);
        assert_eq!(engine.process_action(&Action::end_turn("a")), Err(EngineError::GameNotActive));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let engine = engine();
        let mut copy = engine.snapshot();
        copy.turn_number = 99;
        copy.players.clear();

        assert_eq!(engine.state().turn_number, 1);
        assert_eq!(engine.state().player_count(), 2);
    }
}
