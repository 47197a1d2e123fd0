//! Night resolution.
//!
//! Night actions are collected over three sub-phases into a `NightPlan`
//! and applied together at dawn, in a fixed order:
//!
//! 1. **Protections**: build the shielded set, update each protector's memory
//! 2. **Kill**: the tallied target dies unless shielded
//! 3. **Reveals**: each seer learns its target's role
//!
//! Reveals are applied even if the seer died in step 2; the knowledge is
//! simply never used.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{ActionOutcome, ActionRecord, EliminationCause, GameState, PublicElimination, SeatId};
use crate::error::InvariantBreach;
use crate::roles::Role;

/// Night actions waiting for dawn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightPlan {
    /// Judged aggressor votes.
    pub wolf_votes: Vec<ActionRecord>,
    /// The tallied kill target, if any.
    pub kill: Option<SeatId>,
    /// Judged seer actions.
    pub reveals: Vec<ActionRecord>,
    /// Judged protector actions.
    pub protections: Vec<ActionRecord>,
}

impl NightPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wolf_votes.is_empty() && self.reveals.is_empty() && self.protections.is_empty()
    }
}

/// A seer's private result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub seer: SeatId,
    pub target: SeatId,
    pub role: Role,
}

/// What happened at dawn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NightReport {
    /// The seat killed tonight.
    pub eliminated: Option<PublicElimination>,
    /// The kill target, if a protection stopped it.
    pub shielded: Option<SeatId>,
    pub reveals: Vec<Reveal>,
}

impl NightReport {
    /// Nobody died.
    #[must_use]
    pub fn is_peaceful(&self) -> bool {
        self.eliminated.is_none()
    }
}

/// Apply a night plan and move its records into the history.
pub fn resolve_night(
    state: &mut GameState,
    plan: NightPlan,
    announce_role: bool,
) -> Result<NightReport, InvariantBreach> {
    let NightPlan {
        mut wolf_votes,
        kill,
        mut reveals,
        mut protections,
    } = plan;
    let mut report = NightReport::default();

    // 1. Protections.
    let mut shielded = FxHashSet::default();
    for record in &mut protections {
        let Some(target) = record.valid_target() else {
            continue;
        };
        let protector = state
            .seat_mut(record.actor)
            .ok_or_else(|| InvariantBreach::new(format!("unknown protector {}", record.actor)))?;
        protector.remember_protection(target);
        shielded.insert(target);
        record.outcome = ActionOutcome::Applied;
        debug!(protector = %record.actor, %target, "protection applied");
    }

    // 2. Kill.
    let kill_outcome = match kill {
        Some(target) if shielded.contains(&target) => {
            info!(day = state.day(), %target, "night kill blocked by protection");
            report.shielded = Some(target);
            ActionOutcome::Shielded
        }
        Some(target) => {
            let elimination = state.eliminate(target, EliminationCause::NightKill, announce_role)?;
            info!(day = state.day(), %target, "seat killed during the night");
            report.eliminated = Some(elimination);
            ActionOutcome::Applied
        }
        None => ActionOutcome::NotChosen,
    };
    for record in &mut wolf_votes {
        if let Some(target) = record.valid_target() {
            record.outcome = if Some(target) == kill {
                kill_outcome
            } else {
                ActionOutcome::NotChosen
            };
        }
    }

    // 3. Reveals.
    for record in &mut reveals {
        let Some(target) = record.valid_target() else {
            continue;
        };
        let role = state
            .seat(target)
            .map(|s| s.role())
            .ok_or_else(|| InvariantBreach::new(format!("reveal of unknown {target}")))?;
        let seer = state
            .seat_mut(record.actor)
            .ok_or_else(|| InvariantBreach::new(format!("unknown seer {}", record.actor)))?;
        seer.learn(target, role);
        record.outcome = ActionOutcome::Applied;
        report.reveals.push(Reveal {
            seer: record.actor,
            target,
            role,
        });
        debug!(seer = %record.actor, %target, "reveal applied");
    }

    for record in wolf_votes.into_iter().chain(reveals).chain(protections) {
        state.record_action(record);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActionKind, GameRng, Phase, Seat, Verdict};

    fn s(i: u8) -> SeatId {
        SeatId::new(i)
    }

    /// 0 Wolf, 1 Seer, 2 Protector, 3 Villager, 4 Villager.
    fn table() -> GameState {
        let roles = [Role::Wolf, Role::Seer, Role::Protector, Role::Villager, Role::Villager];
        let seats = roles
            .iter()
            .enumerate()
            .map(|(i, &role)| Seat::new(s(i as u8), format!("P{i}"), role))
            .collect();
        GameState::new(seats, GameRng::new(1))
    }

    fn valid(actor: u8, kind: ActionKind, target: u8, phase: Phase) -> ActionRecord {
        ActionRecord::new(s(actor), kind, Some(s(target)), Verdict::Valid, 1, phase)
    }

    #[test]
    fn test_unprotected_kill() {
        let mut state = table();
        let plan = NightPlan {
            wolf_votes: vec![valid(0, ActionKind::Eliminate, 3, Phase::NightWolfVote)],
            kill: Some(s(3)),
            ..NightPlan::default()
        };

        let report = resolve_night(&mut state, plan, true).unwrap();

        assert_eq!(report.eliminated.map(|e| e.seat), Some(s(3)));
        assert!(!state.is_alive(s(3)));
        assert_eq!(state.history()[0].outcome, ActionOutcome::Applied);
    }

    #[test]
    fn test_protection_shields_kill() {
        let mut state = table();
        let plan = NightPlan {
            wolf_votes: vec![valid(0, ActionKind::Eliminate, 3, Phase::NightWolfVote)],
            kill: Some(s(3)),
            reveals: Vec::new(),
            protections: vec![valid(2, ActionKind::Protect, 3, Phase::NightProtector)],
        };

        let report = resolve_night(&mut state, plan, true).unwrap();

        assert!(report.is_peaceful());
        assert_eq!(report.shielded, Some(s(3)));
        assert!(state.is_alive(s(3)));
        assert_eq!(state.seat(s(2)).unwrap().last_protected(), Some(s(3)));

        let outcomes: Vec<_> = state.history().iter().map(|r| r.outcome).collect();
        assert_eq!(outcomes, vec![ActionOutcome::Shielded, ActionOutcome::Applied]);
    }

    #[test]
    fn test_reveal_survives_seer_death() {
        let mut state = table();
        let plan = NightPlan {
            wolf_votes: vec![valid(0, ActionKind::Eliminate, 1, Phase::NightWolfVote)],
            kill: Some(s(1)),
            reveals: vec![valid(1, ActionKind::Reveal, 0, Phase::NightSeer)],
            protections: Vec::new(),
        };

        let report = resolve_night(&mut state, plan, false).unwrap();

        assert_eq!(report.reveals, vec![Reveal { seer: s(1), target: s(0), role: Role::Wolf }]);
        assert_eq!(report.eliminated.and_then(|e| e.revealed_role), None);
        assert!(!state.is_alive(s(1)));
        let seer = state.seat(s(1)).unwrap();
        assert_eq!(seer.knowledge().unwrap().get(s(0)), Some(Role::Wolf));
    }

    #[test]
    fn test_empty_plan() {
        let mut state = table();
        let report = resolve_night(&mut state, NightPlan::default(), true).unwrap();

        assert!(report.is_peaceful());
        assert_eq!(state.alive_count(), 5);
        assert!(state.history().is_empty());
    }
}
