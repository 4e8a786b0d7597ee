//! Headless match simulator.
//!
//! Hosts one session in memory, seats scripted players and plays until
//! somebody wins or the turn cap is hit. Useful for eyeballing the engine's
//! logs end to end.
//!
//! Environment:
//! - `CLASH_SEED`: RNG seed (default 42)
//! - `CLASH_PLAYERS`: number of players, 2 or more (default 2)
//! - `CLASH_MAX_TURNS`: turn cap (default 200)
//! - `CLASH_CONFIG`: path to an `EngineConfig` JSON file
//! - `CLASH_STATE_DIR`: save states to this directory instead of memory
//! - `RUST_LOG`: log filter (default `info`)

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use clash_engine::{
    Action, Card, CardId, CardRegistry, ChannelBroadcaster, CharacterCard, EngineConfig, EventPayload,
    FileStateStore, GameRng, GameState, Gateways, ItemCard, Lobby, LobbyPlayer, LobbyStatus,
    MemoryLobbyStore, MemoryStateStore, Phase, PlayerId, SessionId, SessionRegistry, StateStore,
};

const SESSION: &str = "sim";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let seed = env_or("CLASH_SEED", 42u64)?;
    let player_count = env_or("CLASH_PLAYERS", 2usize)?;
    let max_turns = env_or("CLASH_MAX_TURNS", 200u32)?;
    if player_count < 2 {
        bail!("CLASH_PLAYERS must be at least 2");
    }

    let config = match std::env::var("CLASH_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            EngineConfig::from_json(&json)?
        }
        Err(_) => EngineConfig::default(),
    };
    config.validate()?;

    let store: Arc<dyn StateStore> = match std::env::var("CLASH_STATE_DIR") {
        Ok(dir) => Arc::new(FileStateStore::new(dir)?),
        Err(_) => Arc::new(MemoryStateStore::new()),
    };

    let players: Vec<PlayerId> = (0..player_count).map(|i| PlayerId::new(format!("p{i}"))).collect();
    let catalog = build_catalog(&players, &mut GameRng::new(seed ^ 0x5eed));

    let lobbies = MemoryLobbyStore::new();
    let lobby = players.iter().enumerate().fold(
        Lobby::new(SESSION).with_status(LobbyStatus::Waiting),
        |lobby, (i, id)| lobby.with_player(LobbyPlayer::new(id.clone(), format!("Player {i}"), i as u32)),
    );
    lobbies.insert(lobby)?;

    let broadcaster = Arc::new(ChannelBroadcaster::with_capacity(config.broadcast_capacity));
    let gateways = Gateways::new(store, broadcaster.clone(), Arc::new(lobbies), Arc::new(catalog));
    let registry = SessionRegistry::with_rng(config, gateways, GameRng::new(seed));

    let session_id = SessionId::new(SESSION);
    let mut events = broadcaster.subscribe(&session_id)?;
    let listener = tokio::spawn(async move {
        let mut received = 0u64;
        let mut last_sequence = 0u64;
        loop {
            match events.recv().await {
                Ok(event) => {
                    if event.sequence != last_sequence + 1 {
                        warn!(expected = last_sequence + 1, got = event.sequence, "sequence gap");
                    }
                    last_sequence = event.sequence;
                    received += 1;
                    if let EventPayload::Outcome { outcome } = &event.payload {
                        tracing::debug!(sequence = event.sequence, ?outcome, "event");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "listener lagged");
                    last_sequence += skipped;
                }
                Err(RecvError::Closed) => break,
            }
        }
        received
    });

    registry.open(&session_id).await?;
    let mut state = registry.start(&session_id).await?;
    for player in &players {
        registry.join(&session_id, player).await?;
    }

    while !state.is_finished() && state.turn_number <= max_turns {
        let Some(current) = state.current_turn_player_id.clone() else {
            break;
        };
        for action in plan_turn(&state, &current) {
            match registry.submit(&session_id, &action).await {
                Ok(_) => {}
                Err(err) if err.is_rejection() => warn!(%err, "scripted action rejected"),
                Err(err) => return Err(err.into()),
            }
            state = registry.snapshot(&session_id).await?;
            if state.is_finished() {
                break;
            }
        }
    }

    registry.close(&session_id).await?;
    let received = listener.await?;

    match &state.winner_id {
        Some(winner) => info!(%winner, turns = state.turn_number, events = received, "simulation finished"),
        None => info!(turns = state.turn_number, events = received, "turn cap reached without a winner"),
    }
    Ok(())
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value.parse().with_context(|| format!("parsing {key}")),
        Err(_) => Ok(default),
    }
}

/// A small card pool, every card granted to every player.
fn build_catalog(players: &[PlayerId], rng: &mut GameRng) -> CardRegistry {
    let mut catalog = CardRegistry::new();
    let mut ids: Vec<CardId> = Vec::new();

    for i in 0..24 {
        let power = 10 + rng.gen_index(30) as i64;
        let defense = 10 + rng.gen_index(40) as i64;
        let speed = 1 + rng.gen_index(9) as i64;
        let card = CharacterCard::new(format!("char-{i:02}"), format!("Fighter {i}"), power, defense, speed);
        ids.push(card.id.clone());
        catalog.register(card.into());
    }
    for i in 0..8 {
        let card = ItemCard::new(format!("item-{i:02}"), format!("Trinket {i}"), "none");
        ids.push(card.id.clone());
        catalog.register(card.into());
    }

    for player in players {
        for id in &ids {
            catalog.grant(player, id);
        }
    }
    catalog
}

/// Draw, deploy the first playable card, strike the first living opponent,
/// end the turn. Actions are planned against the state at turn start.
fn plan_turn(state: &GameState, me: &PlayerId) -> Vec<Action> {
    let mut actions = Vec::new();
    let Some(player) = state.player(me) else {
        return vec![Action::end_turn(me.clone())];
    };

    let drawing = state.current_phase == Some(Phase::Draw);
    if drawing {
        actions.push(Action::draw(me.clone()));
    }

    // The drawn card is the front of the deck.
    let upcoming = if drawing { player.deck.front() } else { None };
    let playable = player
        .hand
        .iter()
        .chain(upcoming)
        .find(|card| !matches!(card, Card::Battlefield(_)));
    let deployed = playable.is_some();
    if let Some(card) = playable {
        actions.push(Action::deploy(me.clone(), card.id().clone(), card.kind()));
    }

    let target = state
        .turn_order
        .iter()
        .filter(|id| *id != me)
        .find(|id| state.player(id).is_some_and(|p| p.is_active && p.hp > 0));

    if deployed {
        if let Some(target) = target {
            match player.deployed_characters.front() {
                Some(striker) => actions.push(Action::attack_with(me.clone(), target.clone(), striker.id().clone())),
                None => actions.push(Action::attack(me.clone(), target.clone())),
            }
        }
    }

    actions.push(Action::end_turn(me.clone()));
    actions
}
