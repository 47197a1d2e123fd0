//! Decision provider port.
//!
//! The engine never decides for a seat. Every phase it hands a
//! `DecisionRequest` to a `DecisionProvider` and waits (up to the request's
//! timeout) for a `Decision`. Providers may be model clients, scripted
//! test doubles or the simple built-ins in `agents::random`.
//!
//! Whatever comes back is untrusted: the resolver validates every target
//! and treats anything illegal as a pass.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{KnowledgeRecord, Phase, PublicElimination, SeatId, Statement};
use crate::roles::Role;

/// Errors a provider may report. The engine downgrades all of them to a pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("request failed: {0}")]
    Failed(String),
}

/// Public information about one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSummary {
    pub seat: SeatId,
    pub name: String,
    pub alive: bool,
}

/// Everything one seat is entitled to know at a given moment.
///
/// Built fresh for each request by `agents::build_context`. Fields behind
/// `Option` are `None` for seats not entitled to them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseContext {
    pub day: u32,
    pub phase: Phase,
    pub seat: SeatId,
    pub name: String,
    pub role: Role,
    /// One-line role description.
    pub role_description: String,
    /// Every seat with its public status.
    pub roster: Vec<SeatSummary>,
    /// Eliminations announced so far.
    pub eliminations: Vec<PublicElimination>,
    /// Day discussion so far.
    pub public_log: Vec<Statement>,
    /// Aggressor channel. Aggressors only.
    pub aggressor_log: Option<Vec<Statement>>,
    /// The other aggressors. Aggressors only.
    pub teammates: Option<Vec<SeatId>>,
    /// Roles this seat has uncovered. Seers only.
    pub knowledge: Option<KnowledgeRecord>,
    /// Last seat this seat protected. Protectors only.
    pub last_protected: Option<SeatId>,
}

impl PhaseContext {
    /// Alive seats, in seat order.
    pub fn alive(&self) -> impl Iterator<Item = &SeatSummary> {
        self.roster.iter().filter(|s| s.alive)
    }
}

/// One request for one seat in one phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRequest {
    pub seat: SeatId,
    pub context: PhaseContext,
    /// Seats the engine will accept as a target. Empty in discussion phases.
    pub eligible_targets: Vec<SeatId>,
    /// How long the engine will wait.
    pub timeout: Duration,
}

/// A provider's answer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub target: Option<SeatId>,
    pub statement: Option<String>,
    /// Explicit "no action". Overrides `target` and `statement`.
    pub passed: bool,
}

impl Decision {
    /// Explicit pass.
    #[must_use]
    pub fn pass() -> Self {
        Self {
            passed: true,
            ..Self::default()
        }
    }

    /// Target a seat.
    #[must_use]
    pub fn target(seat: SeatId) -> Self {
        Self {
            target: Some(seat),
            ..Self::default()
        }
    }

    /// Say something in a discussion phase.
    #[must_use]
    pub fn say(text: impl Into<String>) -> Self {
        Self {
            statement: Some(text.into()),
            ..Self::default()
        }
    }

    /// The chosen target, unless the seat passed.
    #[must_use]
    pub fn chosen_target(&self) -> Option<SeatId> {
        if self.passed {
            None
        } else {
            self.target
        }
    }

    /// The statement, unless the seat passed or said nothing meaningful.
    ///
    /// Blank text and a literal `PASS` (optionally bracketed) count as silence.
    #[must_use]
    pub fn spoken(&self) -> Option<&str> {
        if self.passed {
            return None;
        }
        let text = self.statement.as_deref()?.trim();
        let bare = text.trim_start_matches('[').trim_end_matches(']');
        if text.is_empty() || bare.eq_ignore_ascii_case("pass") {
            None
        } else {
            Some(text)
        }
    }
}

/// Source of decisions for every seat.
///
/// Implementations must be shareable across tasks: the engine fans requests
/// out concurrently and holds the provider in an `Arc`.
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    /// Decide for `request.seat`.
    async fn request_decision(&self, request: DecisionRequest) -> Result<Decision, ProviderError>;
}
