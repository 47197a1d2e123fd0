//! # werewolf-engine
//!
//! A concealed-role elimination game ("werewolf") in which every seat is
//! controlled by an independent decision-making agent.
//!
//! ## Design Principles
//!
//! 1. **Information Asymmetry**: Agents only ever receive a `PhaseContext`
//!    built for their seat. Roles, teammates and private memory never leak.
//!
//! 2. **Untrusted Agents**: Every answer is validated. Timeouts, provider
//!    errors and illegal targets degrade to a pass, never to a failed game.
//!
//! 3. **Deterministic Resolution**: Decisions are collected concurrently but
//!    resolved in seat order, with a seeded RNG for dealing and tie-breaks.
//!
//! 4. **Guaranteed Termination**: A win condition or the day limit always
//!    ends the game in an auditable state.
//!
//! ## Modules
//!
//! - `roles`: The closed role set and per-table role counts
//! - `core`: Seats, phases, state, actions, RNG, configuration
//! - `roster`: Count validation and seeded role assignment
//! - `agents`: Decision provider port, per-seat contexts, built-in agents
//! - `resolver`: Decision collection, validation and night resolution
//! - `tally`: Day and night vote aggregation
//! - `rules`: Win condition evaluation
//! - `record`: Audience-scoped events and sinks
//! - `phases`: The `Game` state machine and final report
//! - `error`: Error taxonomy

pub mod agents;
pub mod core;
pub mod error;
pub mod phases;
pub mod record;
pub mod resolver;
pub mod roles;
pub mod roster;
pub mod rules;
pub mod tally;

// Re-export commonly used types
pub use crate::core::{
    ActionKind, ActionOutcome, ActionRecord, DiscussionLimits, EliminationCause, GameConfig,
    GameRng, GameState, KnowledgeRecord, Phase, Seat, SeatId, Statement,
};

pub use crate::roles::{AbilityKind, Faction, Role, RoleCounts};

pub use crate::agents::{
    Decision, DecisionProvider, DecisionRequest, PassingProvider, PhaseContext, ProviderError,
    RandomProvider,
};

pub use crate::error::{ActionError, ConfigurationError, GameError, InvariantReport};

pub use crate::phases::{Game, GameReport, GameStats};

pub use crate::record::{Audience, Envelope, GameEvent, MemorySink, NullSink, RecordSink, TracingSink};

pub use crate::rules::GameResult;

pub use crate::tally::{DayVoteRule, TallyOutcome, TieBreak};
