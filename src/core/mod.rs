//! Core engine types: seats, phases, state, actions, RNG, configuration.
//!
//! Everything the other components read or mutate lives here. Mutation of
//! `GameState` is crate-private; callers observe it through accessors.

pub mod action;
pub mod config;
pub mod phase;
pub mod rng;
pub mod seat;
pub mod state;

pub use action::{ActionKind, ActionOutcome, ActionRecord, Verdict};
pub use config::{DiscussionLimits, GameConfig};
pub use phase::Phase;
pub use rng::GameRng;
pub use seat::{AbilityMemory, EliminationCause, KnowledgeRecord, Seat, SeatId, SeatStatus};
pub use state::{GameState, PublicElimination, Statement};
