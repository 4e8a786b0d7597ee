//! Match state: the authoritative record of one session.
//!
//! ## Lifecycle
//!
//! - `Waiting`: lobby not started. No phase, no current player.
//! - `Active`: a player holds the turn and a phase is set.
//! - `Finished`: a winner is recorded. No phase; no further actions.
//!
//! `GameState` is only mutated by the action processor. Zones and the player
//! map are `im` persistent structures, so `clone()` is O(1) and a clone is an
//! independent value that cannot alias the live state.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerState};
use crate::cards::BattlefieldCard;

/// Top-level match lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Waiting,
    Active,
    Finished,
}

/// Sub-state of the active player's turn.
///
/// `End` is part of the phase vocabulary but no action transitions into it;
/// `end_turn` moves straight to the next player's `Draw`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Draw,
    Deploy,
    Battle,
    End,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Phase::Draw => "draw",
            Phase::Deploy => "deploy",
            Phase::Battle => "battle",
            Phase::End => "end",
        };
        write!(f, "{}", label)
    }
}

/// Full state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,

    /// Fixed once the match starts.
    pub turn_order: Vector<PlayerId>,

    /// `None` only while waiting.
    pub current_turn_player_id: Option<PlayerId>,

    /// `None` iff status is not active.
    pub current_phase: Option<Phase>,

    /// Shared modifier card. Read by nothing yet.
    pub battlefield_card: Option<BattlefieldCard>,

    pub players: OrdMap<PlayerId, PlayerState>,

    /// Starts at 1; +1 per end-turn.
    pub turn_number: u32,

    /// Set once, when the match finishes.
    pub winner_id: Option<PlayerId>,
}

impl GameState {
    /// Create an empty waiting match.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: GameStatus::Waiting,
            turn_order: Vector::new(),
            current_turn_player_id: None,
            current_phase: None,
            battlefield_card: None,
            players: OrdMap::new(),
            turn_number: 1,
            winner_id: None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&PlayerState> {
        self.players.get(id)
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(id)
    }

    /// Add a player. Turn order is not touched.
    pub fn insert_player(&mut self, player: PlayerState) {
        self.players.insert(player.user_id.clone(), player);
    }

    /// Hand the first turn to the head of the turn order.
    ///
    /// Leaves the match waiting if the turn order is empty.
    pub fn activate(&mut self) {
        if let Some(first) = self.turn_order.front().cloned() {
            self.status = GameStatus::Active;
            self.current_turn_player_id = Some(first);
            self.current_phase = Some(Phase::Draw);
        }
    }

    /// The player after the current one, wrapping around the turn order.
    ///
    /// A current player missing from the order yields the first entry.
    #[must_use]
    pub fn next_in_turn_order(&self) -> Option<&PlayerId> {
        if self.turn_order.is_empty() {
            return None;
        }
        let next = self
            .current_turn_player_id
            .as_ref()
            .and_then(|current| self.turn_order.index_of(current))
            .map_or(0, |i| (i + 1) % self.turn_order.len());
        self.turn_order.get(next)
    }

    /// Record the winner and close the match.
    pub fn finish(&mut self, winner: PlayerId) {
        self.status = GameStatus::Finished;
        self.current_phase = None;
        self.winner_id = Some(winner);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
