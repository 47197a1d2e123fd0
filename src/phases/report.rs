//! Final game report.
//!
//! Built once the game reaches `GameOver`: the result, the full action
//! history, the final roster and summary counts. Serializable with serde;
//! `to_bytes`/`from_bytes` give a compact bincode form for archiving.

use serde::{Deserialize, Serialize};

use crate::core::{ActionKind, ActionOutcome, ActionRecord, EliminationCause, GameState, Verdict};
use crate::error::ActionError;
use crate::record::FinalSeat;
use crate::rules::GameResult;

/// Summary counts over the action history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub actions: u32,
    pub passes: u32,
    pub rejected: u32,
    pub timeouts: u32,
    pub night_kills: u32,
    pub shielded_kills: u32,
    pub reveals: u32,
    pub statements: u32,
}

impl GameStats {
    fn from_state(state: &GameState) -> Self {
        let mut stats = GameStats {
            statements: (state.public_log().len() + state.aggressor_log().len()) as u32,
            night_kills: state
                .eliminations()
                .iter()
                .filter(|e| e.cause == EliminationCause::NightKill)
                .count() as u32,
            ..Self::default()
        };

        let mut shielded_days = Vec::new();
        for record in state.history() {
            stats.actions += 1;
            match &record.verdict {
                Verdict::Valid => {}
                Verdict::Passed => stats.passes += 1,
                Verdict::Rejected(reason) => {
                    stats.rejected += 1;
                    if *reason == ActionError::ProviderTimeout {
                        stats.timeouts += 1;
                    }
                }
            }
            if record.kind == ActionKind::Reveal && record.outcome == ActionOutcome::Applied {
                stats.reveals += 1;
            }
            // Every aggressor who voted for a shielded target shares one blocked kill.
            if record.outcome == ActionOutcome::Shielded && !shielded_days.contains(&record.day) {
                shielded_days.push(record.day);
            }
        }
        stats.shielded_kills = shielded_days.len() as u32;
        stats
    }
}

/// Everything known about a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub result: GameResult,
    /// Day the game ended on.
    pub days: u32,
    /// Seed the table was dealt with.
    pub seed: u64,
    pub history: Vec<ActionRecord>,
    pub final_roster: Vec<FinalSeat>,
    pub stats: GameStats,
}

impl GameReport {
    pub(crate) fn new(state: &GameState, result: GameResult, seed: u64) -> Self {
        Self {
            result,
            days: state.day(),
            seed,
            history: state.history().iter().cloned().collect(),
            final_roster: final_roster(state),
            stats: GameStats::from_state(state),
        }
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode from `to_bytes` output.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

/// Every seat with its true role.
pub(crate) fn final_roster(state: &GameState) -> Vec<FinalSeat> {
    state
        .seats()
        .iter()
        .map(|s| FinalSeat {
            seat: s.id(),
            name: s.name().to_string(),
            role: s.role(),
            alive: s.is_alive(),
        })
        .collect()
}
