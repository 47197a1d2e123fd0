//! Action representation: actor + kind + optional target.
//!
//! An action is created fresh for each seat in each phase, judged by the
//! resolver, resolved, and then kept only as an `ActionRecord` in the
//! game history. For example:
//! - "Seat 2 votes Seat 5" = `Vote` with target 5
//! - "Seat 0 passes" = any kind with no target and a `Passed` verdict
//! - "Seat 7 protects Seat 7" = `Protect` with target 7

use serde::{Deserialize, Serialize};

use super::phase::Phase;
use super::seat::SeatId;
use crate::error::ActionError;
use crate::roles::AbilityKind;

/// What the actor is trying to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Day elimination vote.
    Vote,
    /// Aggressor night-kill vote.
    Eliminate,
    /// Seer reveal.
    Reveal,
    /// Protector shield.
    Protect,
}

impl ActionKind {
    /// The night action granted by an ability, if any.
    #[must_use]
    pub const fn for_ability(ability: AbilityKind) -> Option<ActionKind> {
        match ability {
            AbilityKind::Eliminate => Some(ActionKind::Eliminate),
            AbilityKind::Reveal => Some(ActionKind::Reveal),
            AbilityKind::Protect => Some(ActionKind::Protect),
            AbilityKind::None => None,
        }
    }
}

/// The resolver's judgement of a submitted decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Names a legal target.
    Valid,
    /// The seat chose no action.
    Passed,
    /// The decision was missing or illegal and counts as a pass.
    Rejected(ActionError),
}

/// What happened to a judged action once its phase resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// Collected but not yet resolved.
    Pending,
    /// Took effect.
    Applied,
    /// An elimination attempt stopped by a protection.
    Shielded,
    /// A vote for a seat the tally did not select.
    NotChosen,
    /// A pass or rejected action; nothing to apply.
    Void,
}

/// A judged action with metadata for history tracking.
///
/// Used for:
/// - The audit trail handed to the record sink at game end
/// - Invariant failure reports
/// - Post-game statistics
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat that acted.
    pub actor: SeatId,

    pub kind: ActionKind,

    /// Declared target. `None` for a pass or a rejected decision.
    pub target: Option<SeatId>,

    /// Day when the action was submitted.
    pub day: u32,

    /// Phase when the action was submitted.
    pub phase: Phase,

    pub verdict: Verdict,

    pub outcome: ActionOutcome,

    /// Position in the game-wide action sequence.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a pending record.
    #[must_use]
    pub fn new(
        actor: SeatId,
        kind: ActionKind,
        target: Option<SeatId>,
        verdict: Verdict,
        day: u32,
        phase: Phase,
    ) -> Self {
        let outcome = if matches!(verdict, Verdict::Valid) {
            ActionOutcome::Pending
        } else {
            ActionOutcome::Void
        };
        Self {
            actor,
            kind,
            target: if matches!(verdict, Verdict::Valid) { target } else { None },
            day,
            phase,
            verdict,
            outcome,
            sequence: 0,
        }
    }

    /// The target, if this action is valid.
    #[must_use]
    pub fn valid_target(&self) -> Option<SeatId> {
        match self.verdict {
            Verdict::Valid => self.target,
            _ => None,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self.verdict, Verdict::Valid)
    }

    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self.verdict, Verdict::Rejected(_))
    }
}
