//! Target validation.
//!
//! Every decision is judged against the live state before anything is
//! applied. Checks run in a fixed order so the reported reason is stable:
//!
//! 1. the target exists
//! 2. the target is alive
//! 3. the role's `UsageConstraint` (friendly fire, self target, repeat protection)
//! 4. the target was among the offered seats
//!
//! A failing check never aborts the phase; the decision becomes a pass.

use tracing::warn;

use crate::agents::Decision;
use crate::core::{ActionKind, ActionRecord, GameState, SeatId, Verdict};
use crate::error::ActionError;
use crate::roles::{Role, UsageConstraint};

/// Seats offered to `actor` for `kind` in the current state.
#[must_use]
pub fn eligible_targets(state: &GameState, actor: SeatId, kind: ActionKind) -> Vec<SeatId> {
    let Some(me) = state.seat(actor) else {
        return Vec::new();
    };
    match kind {
        ActionKind::Vote => state
            .alive()
            .filter(|s| s.id() != actor)
            .map(|s| s.id())
            .collect(),
        ActionKind::Eliminate => state
            .alive()
            .filter(|s| s.faction() != me.faction())
            .map(|s| s.id())
            .collect(),
        ActionKind::Reveal => {
            let known = me.knowledge();
            state
                .alive()
                .filter(|s| s.id() != actor)
                .filter(|s| !known.is_some_and(|k| k.contains(s.id())))
                .map(|s| s.id())
                .collect()
        }
        ActionKind::Protect => state
            .alive()
            .filter(|s| Some(s.id()) != me.last_protected())
            .map(|s| s.id())
            .collect(),
    }
}

/// The targeting rule for `kind` when used by a seat holding `role`.
///
/// Day votes are open to every role and never self-targeted. Night actions
/// follow the role's registry entry.
#[must_use]
pub fn usage_constraint(kind: ActionKind, role: Role) -> UsageConstraint {
    match kind {
        ActionKind::Vote => UsageConstraint::NotSelf,
        ActionKind::Eliminate | ActionKind::Reveal | ActionKind::Protect => role.constraint(),
    }
}

/// Check one declared target.
pub fn validate_target(
    state: &GameState,
    actor: SeatId,
    kind: ActionKind,
    target: SeatId,
    eligible: &[SeatId],
) -> Result<(), ActionError> {
    let target_seat = state.seat(target).ok_or(ActionError::UnknownSeat(target))?;
    if !target_seat.is_alive() {
        return Err(ActionError::TargetNotAlive(target));
    }

    let me = state.seat(actor).ok_or(ActionError::UnknownSeat(actor))?;
    match usage_constraint(kind, me.role()) {
        UsageConstraint::Unconstrained => {}
        UsageConstraint::NoFriendlyFire => {
            if target_seat.faction() == me.faction() {
                return Err(ActionError::FriendlyFire(target));
            }
        }
        UsageConstraint::NotSelf => {
            if target == actor {
                return Err(ActionError::SelfTarget);
            }
        }
        UsageConstraint::NoConsecutiveTarget => {
            if me.last_protected() == Some(target) {
                return Err(ActionError::RepeatedProtection(target));
            }
        }
    }

    if !eligible.contains(&target) {
        return Err(ActionError::NotEligibleTarget(target));
    }
    Ok(())
}

/// Turn a collected answer into a judged record for the current day and phase.
pub fn judge(
    state: &GameState,
    actor: SeatId,
    kind: ActionKind,
    answer: Result<Decision, ActionError>,
    eligible: &[SeatId],
) -> ActionRecord {
    let (target, verdict) = match answer {
        Err(reason) => (None, Verdict::Rejected(reason)),
        Ok(decision) => match decision.chosen_target() {
            None => (None, Verdict::Passed),
            Some(target) => match validate_target(state, actor, kind, target, eligible) {
                Ok(()) => (Some(target), Verdict::Valid),
                Err(reason) => (Some(target), Verdict::Rejected(reason)),
            },
        },
    };

    if let Verdict::Rejected(reason) = &verdict {
        warn!(
            day = state.day(),
            phase = %state.phase(),
            seat = %actor,
            ?kind,
            ?target,
            %reason,
            "action rejected"
        );
    }

    ActionRecord::new(actor, kind, target, verdict, state.day(), state.phase())
}
