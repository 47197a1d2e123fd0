//! Agent boundary: the decision provider port, per-seat context building
//! and simple built-in providers.
//!
//! ## Key Types
//!
//! - `DecisionProvider`: async trait implemented by whatever controls seats
//! - `DecisionRequest` / `Decision`: one question and one answer
//! - `PhaseContext`: what a seat is allowed to know
//! - `PassingProvider`, `RandomProvider`: built-in agents

pub mod context;
pub mod provider;
pub mod random;

pub use context::build_context;
pub use provider::{
    Decision, DecisionProvider, DecisionRequest, PhaseContext, ProviderError, SeatSummary,
};
pub use random::{PassingProvider, RandomProvider};
