//! Win condition evaluation.
//!
//! The town wins when no aggressor is alive. The aggressors win when no
//! town seat is alive. Anything else keeps the game going. Evaluation is
//! a pure function of the seats, so calling it twice gives the same answer.

use serde::{Deserialize, Serialize};

use crate::core::Seat;
use crate::error::InvariantBreach;
use crate::roles::Faction;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// One faction eliminated the other.
    Winner(Faction),
    /// The day limit ran out first. Nobody wins.
    DayLimitReached,
}

impl GameResult {
    /// Check if a faction won.
    #[must_use]
    pub fn is_winner(&self, faction: Faction) -> bool {
        matches!(self, GameResult::Winner(f) if *f == faction)
    }

    /// The winning faction, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Faction> {
        match self {
            GameResult::Winner(f) => Some(*f),
            GameResult::DayLimitReached => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(Faction::Town) => write!(f, "town wins"),
            GameResult::Winner(Faction::Aggressor) => write!(f, "aggressors win"),
            GameResult::DayLimitReached => write!(f, "day limit reached"),
        }
    }
}

/// Whether the game should continue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinState {
    Ongoing,
    Decided(Faction),
}

/// Evaluate the table.
pub fn evaluate(seats: &[Seat]) -> Result<WinState, InvariantBreach> {
    let (mut aggressors, mut town) = (0usize, 0usize);
    for seat in seats.iter().filter(|s| s.is_alive()) {
        match seat.faction() {
            Faction::Aggressor => aggressors += 1,
            Faction::Town => town += 1,
        }
    }

    match (aggressors, town) {
        (0, 0) => Err(InvariantBreach::new("both factions are extinct")),
        (0, _) => Ok(WinState::Decided(Faction::Town)),
        (_, 0) => Ok(WinState::Decided(Faction::Aggressor)),
        _ => Ok(WinState::Ongoing),
    }
}
