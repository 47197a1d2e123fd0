//! Game state: the aggregate root.
//!
//! `GameState` holds the seats (ground truth for roles and alive status),
//! the day counter and phase, the action history, both statement logs,
//! the public elimination list, the night actions collected so far and the
//! RNG used for tie-breaks.
//!
//! Logs and history use `im` persistent vectors so the state clones in
//! O(1) when handed to observers.
//!
//! Nothing here decides what a given seat may see. Per-seat views are
//! built in `agents::context`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::phase::Phase;
use super::rng::GameRng;
use super::seat::{EliminationCause, Seat, SeatId};
use crate::error::InvariantBreach;
use crate::resolver::NightPlan;
use crate::roles::{Faction, Role};
use crate::rules::GameResult;

/// Something a seat said during a discussion phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub day: u32,
    pub seat: SeatId,
    pub text: String,
}

/// A publicly known elimination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicElimination {
    pub seat: SeatId,
    pub day: u32,
    pub cause: EliminationCause,
    /// Set when the table announces roles on elimination.
    pub revealed_role: Option<Role>,
}

/// Full game state, including private information.
#[derive(Clone, Debug)]
pub struct GameState {
    seats: Vec<Seat>,

    /// Current day (starts at 1).
    day: u32,

    phase: Phase,

    /// Every resolved action, in sequence order.
    history: Vector<ActionRecord>,

    /// Day discussion log.
    public_log: Vector<Statement>,

    /// Aggressor channel log.
    aggressor_log: Vector<Statement>,

    eliminations: Vector<PublicElimination>,

    /// Night actions collected but not yet applied.
    pub(crate) night: NightPlan,

    /// Deterministic RNG for tie-breaks.
    pub(crate) rng: GameRng,

    result: Option<GameResult>,

    next_sequence: u32,
}

impl GameState {
    /// Create a state in `Setup` on day 1.
    ///
    /// Seats must be indexed by position: `seats[i].id() == SeatId(i)`.
    #[must_use]
    pub fn new(seats: Vec<Seat>, rng: GameRng) -> Self {
        debug_assert!(seats.iter().enumerate().all(|(i, s)| s.id().index() == i));
        Self {
            seats,
            day: 1,
            phase: Phase::Setup,
            history: Vector::new(),
            public_log: Vector::new(),
            aggressor_log: Vector::new(),
            eliminations: Vector::new(),
            night: NightPlan::default(),
            rng,
            result: None,
            next_sequence: 0,
        }
    }

    // === Progression ===

    #[must_use]
    pub fn day(&self) -> u32 {
        self.day
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Final result once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn advance_day(&mut self) {
        self.day += 1;
    }

    pub(crate) fn finish(&mut self, result: GameResult) {
        self.phase = Phase::GameOver;
        self.result = Some(result);
    }

    // === Seats ===

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    #[must_use]
    pub fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.seats.get(id.index())
    }

    pub(crate) fn seat_mut(&mut self, id: SeatId) -> Option<&mut Seat> {
        self.seats.get_mut(id.index())
    }

    #[must_use]
    pub fn is_alive(&self, id: SeatId) -> bool {
        self.seat(id).is_some_and(Seat::is_alive)
    }

    /// Alive seats in seat order.
    pub fn alive(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().filter(|s| s.is_alive())
    }

    #[must_use]
    pub fn alive_ids(&self) -> Vec<SeatId> {
        self.alive().map(Seat::id).collect()
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// Alive seats of one faction.
    #[must_use]
    pub fn alive_in(&self, faction: Faction) -> Vec<SeatId> {
        self.alive()
            .filter(|s| s.faction() == faction)
            .map(Seat::id)
            .collect()
    }

    /// All seats (alive or not) holding a role.
    #[must_use]
    pub fn seats_with_role(&self, role: Role) -> Vec<SeatId> {
        self.seats
            .iter()
            .filter(|s| s.role() == role)
            .map(Seat::id)
            .collect()
    }

    /// Alive seats holding a role.
    #[must_use]
    pub fn alive_with_role(&self, role: Role) -> Vec<SeatId> {
        self.alive()
            .filter(|s| s.role() == role)
            .map(Seat::id)
            .collect()
    }

    /// The elimination transition. The only way a seat leaves the game.
    pub(crate) fn eliminate(
        &mut self,
        id: SeatId,
        cause: EliminationCause,
        announce_role: bool,
    ) -> Result<PublicElimination, InvariantBreach> {
        let day = self.day;
        let seat = self
            .seat_mut(id)
            .ok_or_else(|| InvariantBreach::new(format!("eliminating unknown {id}")))?;
        if !seat.eliminate(day, cause) {
            return Err(InvariantBreach::new(format!(
                "{id} eliminated twice (second cause: {cause:?})"
            )));
        }
        let record = PublicElimination {
            seat: id,
            day,
            cause,
            revealed_role: announce_role.then(|| seat.role()),
        };
        self.eliminations.push_back(record);
        Ok(record)
    }

    #[must_use]
    pub fn eliminations(&self) -> &Vector<PublicElimination> {
        &self.eliminations
    }

    // === Logs ===

    #[must_use]
    pub fn public_log(&self) -> &Vector<Statement> {
        &self.public_log
    }

    #[must_use]
    pub fn aggressor_log(&self) -> &Vector<Statement> {
        &self.aggressor_log
    }

    pub(crate) fn push_public(&mut self, statement: Statement) {
        self.public_log.push_back(statement);
    }

    pub(crate) fn push_aggressor(&mut self, statement: Statement) {
        self.aggressor_log.push_back(statement);
    }

    // === Action History ===

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Record a resolved action, stamping its sequence number.
    pub(crate) fn record_action(&mut self, mut record: ActionRecord) {
        record.sequence = self.next_sequence;
        self.next_sequence += 1;
        self.history.push_back(record);
    }

    /// Night actions collected so far this night.
    #[must_use]
    pub fn night_plan(&self) -> &NightPlan {
        &self.night
    }
}
