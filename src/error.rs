//! Error taxonomy.
//!
//! Anything caused by agent behavior degrades to a pass and is reported as
//! an `ActionError` on the audit channel. Anything caused by a bad table
//! configuration or an engine fault is fatal and surfaces as a `GameError`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ActionRecord, Phase, SeatId};

/// Invalid table configuration. Raised before the game starts.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigurationError {
    #[error("a table needs at least {min} seats, got {got}")]
    TooFewSeats { min: usize, got: usize },

    #[error("at most 255 seats are supported, got {0}")]
    TooManySeats(usize),

    #[error("role counts add up to {assigned} but the table has {seats} seats")]
    CountMismatch { assigned: u64, seats: usize },

    #[error("at least one aggressor seat is required")]
    NoAggressors,

    #[error("at least one town seat is required")]
    NoTown,

    #[error("{aggressors} aggressors in {seats} seats: aggressors must be fewer than half the table")]
    AggressorMajority { aggressors: u64, seats: usize },

    #[error("{names} seat names given for {seats} seats")]
    NameCountMismatch { names: usize, seats: usize },

    #[error("duplicate seat name {0:?}")]
    DuplicateName(String),

    #[error("the action timeout must be greater than zero")]
    ZeroTimeout,

    #[error("the day limit must be at least 1")]
    ZeroDayLimit,
}

/// A decision that could not be accepted. Always recovered as a pass.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionError {
    #[error("decision provider did not answer in time")]
    ProviderTimeout,

    #[error("decision provider failed: {0}")]
    ProviderFailed(String),

    #[error("{0} does not exist")]
    UnknownSeat(SeatId),

    #[error("{0} is not alive")]
    TargetNotAlive(SeatId),

    #[error("{0} belongs to the acting seat's own faction")]
    FriendlyFire(SeatId),

    #[error("a seat may not target itself")]
    SelfTarget,

    #[error("{0} was protected on the previous night")]
    RepeatedProtection(SeatId),

    #[error("{0} is not among the offered targets")]
    NotEligibleTarget(SeatId),
}

impl ActionError {
    /// Whether the decision never arrived, as opposed to arriving malformed.
    #[must_use]
    pub fn is_provider_fault(&self) -> bool {
        matches!(self, ActionError::ProviderTimeout | ActionError::ProviderFailed(_))
    }
}

/// An impossible state detected by a component.
///
/// Components return this bare; the state machine attaches the action
/// history and returns `GameError::InvariantViolation`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct InvariantBreach {
    pub reason: String,
}

impl InvariantBreach {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Everything known about the game when an invariant broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvariantReport {
    pub reason: String,
    pub day: u32,
    pub phase: Phase,
    /// Every resolved action up to the failure.
    pub history: Vec<ActionRecord>,
}

/// Fatal engine errors.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("engine invariant violated on day {} during {}: {}", .0.day, .0.phase, .0.reason)]
    InvariantViolation(Box<InvariantReport>),

    #[error("the game is already over")]
    GameFinished,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_messages() {
        let err = ConfigurationError::AggressorMajority { aggressors: 4, seats: 8 };
        assert_eq!(
            err.to_string(),
            "4 aggressors in 8 seats: aggressors must be fewer than half the table"
        );

        let err: GameError = ConfigurationError::NoAggressors.into();
        assert!(matches!(err, GameError::Configuration(ConfigurationError::NoAggressors)));
        assert_eq!(
            err.to_string(),
            "invalid configuration: at least one aggressor seat is required"
        );
    }

    #[test]
    fn test_action_error_provider_fault() {
        assert!(ActionError::ProviderTimeout.is_provider_fault());
        assert!(ActionError::ProviderFailed("boom".into()).is_provider_fault());
        assert!(!ActionError::SelfTarget.is_provider_fault());
        assert_eq!(
            ActionError::TargetNotAlive(SeatId::new(3)).to_string(),
            "Seat 3 is not alive"
        );
    }

    #[test]
    fn test_invariant_violation_message() {
        let report = InvariantReport {
            reason: "both factions are extinct".to_string(),
            day: 3,
            phase: Phase::NightResolution,
            history: Vec::new(),
        };
        let err = GameError::InvariantViolation(Box::new(report));
        assert_eq!(
            err.to_string(),
            "engine invariant violated on day 3 during dawn: both factions are extinct"
        );
    }
}
