//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing_subscriber::EnvFilter;

use werewolf_engine::agents::{Decision, DecisionProvider, DecisionRequest, ProviderError};
use werewolf_engine::core::{GameConfig, Phase, SeatId};
use werewolf_engine::phases::Game;
use werewolf_engine::record::{GameEvent, MemorySink};
use werewolf_engine::roles::Role;

/// Provider driven by a script keyed on (day, phase, seat).
///
/// Unscripted requests pass. Seats marked with `hang` never answer.
#[derive(Default)]
pub struct ScriptedProvider {
    script: Mutex<HashMap<(u32, Phase, SeatId), Decision>>,
    hanging: Mutex<HashSet<SeatId>>,
    requests: Mutex<Vec<DecisionRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Script one seat's decision.
    pub fn on(&self, day: u32, phase: Phase, seat: SeatId, decision: Decision) {
        self.script
            .lock()
            .unwrap()
            .insert((day, phase, seat), decision);
    }

    /// Script the same decision for several seats.
    pub fn on_all(&self, day: u32, phase: Phase, seats: &[SeatId], decision: Decision) {
        for &seat in seats {
            self.on(day, phase, seat, decision.clone());
        }
    }

    /// Make a seat never answer.
    pub fn hang(&self, seat: SeatId) {
        self.hanging.lock().unwrap().insert(seat);
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<DecisionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DecisionProvider for ScriptedProvider {
    async fn request_decision(&self, request: DecisionRequest) -> Result<Decision, ProviderError> {
        let key = (request.context.day, request.context.phase, request.seat);
        let hangs = self.hanging.lock().unwrap().contains(&request.seat);
        self.requests.lock().unwrap().push(request);

        if hangs {
            std::future::pending::<()>().await;
        }
        Ok(self
            .script
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(Decision::pass))
    }
}

/// Route engine logs to the test writer. Filter with `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// The standard ten-seat table: 3 wolves, 1 seer, 1 protector, 5 villagers.
pub fn ten_seat_config(seed: u64) -> GameConfig {
    GameConfig::new(10)
        .with_role(Role::Wolf, 3)
        .with_role(Role::Seer, 1)
        .with_role(Role::Protector, 1)
        .with_role(Role::Villager, 5)
        .with_seed(seed)
}

pub fn scripted_game(config: GameConfig) -> (Game<ScriptedProvider, MemorySink>, Arc<ScriptedProvider>) {
    let provider = ScriptedProvider::new();
    let game = Game::new(config, Arc::clone(&provider), MemorySink::new()).unwrap();
    (game, provider)
}

/// Seats holding `role`, in seat order.
pub fn seats_with<P: DecisionProvider + ?Sized + 'static>(
    game: &Game<P, MemorySink>,
    role: Role,
) -> Vec<SeatId> {
    game.state().seats_with_role(role)
}

/// Step until the game reaches `day` and `phase` (or ends).
pub async fn play_until<P: DecisionProvider + ?Sized + 'static>(
    game: &mut Game<P, MemorySink>,
    day: u32,
    phase: Phase,
) {
    while !game.is_over() && (game.state().day(), game.state().phase()) != (day, phase) {
        game.step().await.unwrap();
    }
}

/// Count events matching a predicate.
pub fn count_events<P: ?Sized>(game: &Game<P, MemorySink>, pred: impl Fn(&GameEvent) -> bool) -> usize
where
    P: DecisionProvider + 'static,
{
    game.sink().events().filter(|e| pred(e)).count()
}
