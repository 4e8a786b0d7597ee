//! Session initialization: lobby to `GameState`.
//!
//! Players keep any zones saved from an earlier start; everyone else gets
//! the defaults (starting hit points, empty zones, active).
//!
//! ## Turn order
//!
//! Players are ordered by join position, then stably by descending total
//! speed of their deployed characters. Nobody has deployed anything when a
//! match starts, so in practice every player ties and the join order
//! stands; the speed rule only bites for lobbies restored with deployed
//! characters.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::SessionError;
use super::event::SessionId;
use crate::cards::{BattlefieldCard, Card, DeployedCharacter, ItemCard};
use crate::core::{EngineConfig, GameState, PlayerId, PlayerState};

/// Lobby lifecycle as the surrounding system reports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LobbyStatus {
    Waiting,
    Active,
    Finished,
}

/// Zones chosen or saved for a player before the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlayerState {
    pub hp: i64,
    pub hand: Vector<Card>,
    pub deck: Vector<Card>,
    pub deployed_characters: Vector<DeployedCharacter>,
    pub deployed_items: Vector<ItemCard>,
    pub plan_card: Option<Card>,
}

/// A participant in a lobby.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyPlayer {
    pub user_id: PlayerId,
    pub username: String,
    pub position: u32,
    pub is_active: bool,
    pub saved: Option<SavedPlayerState>,
}

impl LobbyPlayer {
    #[must_use]
    pub fn new(user_id: impl Into<PlayerId>, username: impl Into<String>, position: u32) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            position,
            is_active: true,
            saved: None,
        }
    }

    #[must_use]
    pub fn with_saved(mut self, saved: SavedPlayerState) -> Self {
        self.saved = Some(saved);
        self
    }
}

/// A lobby as loaded from the surrounding system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lobby {
    pub session_id: SessionId,
    pub status: LobbyStatus,
    pub players: Vec<LobbyPlayer>,
    pub battlefield_card: Option<BattlefieldCard>,
}

impl Lobby {
    #[must_use]
    pub fn new(session_id: impl Into<SessionId>) -> Self {
        Self {
            session_id: session_id.into(),
            status: LobbyStatus::Waiting,
            players: Vec::new(),
            battlefield_card: None,
        }
    }

    #[must_use]
    pub fn with_player(mut self, player: LobbyPlayer) -> Self {
        self.players.push(player);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: LobbyStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_battlefield(mut self, card: BattlefieldCard) -> Self {
        self.battlefield_card = Some(card);
        self
    }
}

fn player_state(player: &LobbyPlayer, config: &EngineConfig) -> PlayerState {
    let mut state = PlayerState::new(
        player.user_id.clone(),
        player.username.clone(),
        player.position,
        config.starting_hp,
    );
    state.is_active = player.is_active;

    if let Some(saved) = &player.saved {
        state.hp = saved.hp.max(0);
        state.hand = saved.hand.clone();
        state.deck = saved.deck.clone();
        state.deployed_characters = saved.deployed_characters.clone();
        state.deployed_items = saved.deployed_items.clone();
        state.plan_card = saved.plan_card.clone();
    }
    state
}

/// Build the match state for a lobby.
///
/// An active lobby yields an active match with the first player of the turn
/// order in the draw phase. Any other lobby yields a waiting match.
pub fn initialize(lobby: &Lobby, config: &EngineConfig) -> Result<GameState, SessionError> {
    let mut state = GameState::new();
    state.battlefield_card = lobby.battlefield_card.clone();

    let mut players: Vec<PlayerState> = lobby.players.iter().map(|p| player_state(p, config)).collect();
    players.sort_by_key(|p| p.position);
    players.sort_by_key(|p| std::cmp::Reverse(p.total_speed()));

    state.turn_order = players.iter().map(|p| p.user_id.clone()).collect();
    for player in players {
        state.insert_player(player);
    }

    debug!(
        session = %lobby.session_id,
        order = ?state.turn_order,
        "turn order computed"
    );

    if lobby.status == LobbyStatus::Active {
        if state.turn_order.is_empty() {
            return Err(SessionError::NoPlayers(lobby.session_id.clone()));
        }
        state.activate();
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CharacterCard;
    use crate::core::{GameStatus, Phase};

    fn lobby() -> Lobby {
        Lobby::new("s-1")
            .with_player(LobbyPlayer::new("bob", "Bob", 1))
            .with_player(LobbyPlayer::new("alice", "Alice", 0))
    }

    #[test]
    fn test_waiting_lobby() {
        let state = initialize(&lobby(), &EngineConfig::default()).unwrap();

        assert_eq!(state.status, GameStatus::Waiting);
        assert!(state.current_turn_player_id.is_none());
        assert!(state.current_phase.is_none());
        assert_eq!(state.player_count(), 2);
    }

    #[test]
    fn test_defaults_applied() {
        let state = initialize(&lobby(), &EngineConfig::default().with_starting_hp(80)).unwrap();
        let alice = state.player(&PlayerId::new("alice")).unwrap();

        assert_eq!(alice.hp, 80);
        assert!(alice.hand.is_empty());
        assert!(alice.deck.is_empty());
        assert!(alice.deployed_characters.is_empty());
        assert!(alice.is_active);
    }

    #[test]
    fn test_active_lobby_ties_keep_join_order() {
        let lobby = lobby().with_status(LobbyStatus::Active);
        let state = initialize(&lobby, &EngineConfig::default()).unwrap();

        assert_eq!(state.status, GameStatus::Active);
        assert_eq!(
            state.turn_order,
            Vector::from(vec![PlayerId::new("alice"), PlayerId::new("bob")])
        );
        assert_eq!(state.current_turn_player_id, Some(PlayerId::new("alice")));
        assert_eq!(state.current_phase, Some(Phase::Draw));
        assert_eq!(state.turn_number, 1);
    }

    #[test]
    fn test_saved_speed_reorders() {
        let mut deployed = Vector::new();
        deployed.push_back(DeployedCharacter::new(CharacterCard::new("c1", "Scout", 10, 10, 9)));
        let saved = SavedPlayerState {
            hp: 60,
            hand: Vector::new(),
            deck: Vector::new(),
            deployed_characters: deployed,
            deployed_items: Vector::new(),
            plan_card: None,
        };

        let lobby = Lobby::new("s-1")
            .with_status(LobbyStatus::Active)
            .with_player(LobbyPlayer::new("alice", "Alice", 0))
            .with_player(LobbyPlayer::new("bob", "Bob", 1).with_saved(saved));
        let state = initialize(&lobby, &EngineConfig::default()).unwrap();

        assert_eq!(state.current_turn_player_id, Some(PlayerId::new("bob")));
        assert_eq!(state.player(&PlayerId::new("bob")).unwrap().hp, 60);
    }

    #[test]
    fn test_active_lobby_without_players() {
        let lobby = Lobby::new("empty").with_status(LobbyStatus::Active);
        assert!(matches!(
            initialize(&lobby, &EngineConfig::default()),
            Err(SessionError::NoPlayers(_))
        ));
    }

    #[test]
    fn test_battlefield_and_inactive_carry_over() {
        let mut away = LobbyPlayer::new("carol", "Carol", 2);
        away.is_active = false;
        let lobby = lobby()
            .with_player(away)
            .with_battlefield(BattlefieldCard::new("b1", "Volcano", "burn:5"));

        let state = initialize(&lobby, &EngineConfig::default()).unwrap();
        assert_eq!(state.battlefield_card.as_ref().map(|b| b.name.as_str()), Some("Volcano"));
        assert!(!state.player(&PlayerId::new("carol")).unwrap().is_active);
    }
}
