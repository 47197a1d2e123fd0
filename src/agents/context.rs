//! Per-seat views of the game state.
//!
//! This is the only place information crosses from `GameState` to an
//! agent. A seat sees:
//!
//! - its own seat, name and role
//! - which seats are alive and what eliminations were announced
//! - the day discussion
//! - the aggressor channel and its teammates, if it is an aggressor
//! - its own knowledge record, if it is a seer
//! - its last protected seat, if it is a protector
//!
//! It never sees another seat's role (unless announced on elimination or
//! revealed to it) or another seat's private memory.

use crate::core::{GameState, SeatId};
use crate::error::InvariantBreach;
use crate::roles::Faction;
use crate::roster;

use super::provider::{PhaseContext, SeatSummary};

/// Build the view for `seat` at the current day and phase.
pub fn build_context(state: &GameState, seat: SeatId) -> Result<PhaseContext, InvariantBreach> {
    let me = state
        .seat(seat)
        .ok_or_else(|| InvariantBreach::new(format!("context requested for unknown {seat}")))?;
    let aggressor = me.faction() == Faction::Aggressor;

    Ok(PhaseContext {
        day: state.day(),
        phase: state.phase(),
        seat,
        name: me.name().to_string(),
        role: me.role(),
        role_description: me.role().definition().description.to_string(),
        roster: state
            .seats()
            .iter()
            .map(|s| SeatSummary {
                seat: s.id(),
                name: s.name().to_string(),
                alive: s.is_alive(),
            })
            .collect(),
        eliminations: state.eliminations().iter().copied().collect(),
        public_log: state.public_log().iter().cloned().collect(),
        aggressor_log: aggressor.then(|| state.aggressor_log().iter().cloned().collect()),
        teammates: aggressor.then(|| roster::teammates(state.seats(), seat)),
        knowledge: me.knowledge().cloned(),
        last_protected: me.last_protected(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, Seat, Statement};
    use crate::roles::Role;

    fn table() -> GameState {
        let roles = [Role::Wolf, Role::Wolf, Role::Seer, Role::Protector, Role::Villager, Role::Villager];
        let seats = roles
            .iter()
            .enumerate()
            .map(|(i, &role)| Seat::new(SeatId::new(i as u8), format!("P{i}"), role))
            .collect();
        let mut state = GameState::new(seats, GameRng::new(5));
        state.push_public(Statement {
            day: 1,
            seat: SeatId::new(4),
            text: "good morning".into(),
        });
        state.push_aggressor(Statement {
            day: 1,
            seat: SeatId::new(0),
            text: "take the seer".into(),
        });
        state
    }

    #[test]
    fn test_aggressor_view() {
        let state = table();
        let ctx = build_context(&state, SeatId::new(0)).unwrap();

        assert_eq!(ctx.role, Role::Wolf);
        assert_eq!(ctx.teammates, Some(vec![SeatId::new(1)]));
        assert_eq!(ctx.aggressor_log.as_ref().map(Vec::len), Some(1));
        assert_eq!(ctx.public_log.len(), 1);
        assert!(ctx.knowledge.is_none());
    }

    #[test]
    fn test_villager_sees_no_private_channels() {
        let state = table();
        let ctx = build_context(&state, SeatId::new(4)).unwrap();

        assert!(ctx.aggressor_log.is_none());
        assert!(ctx.teammates.is_none());
        assert!(ctx.knowledge.is_none());
        assert_eq!(ctx.last_protected, None);
        assert_eq!(ctx.roster.len(), 6);
        assert_eq!(ctx.alive().count(), 6);
    }

    #[test]
    fn test_seer_sees_only_own_knowledge() {
        let mut state = table();
        state
            .seat_mut(SeatId::new(2))
            .unwrap()
            .learn(SeatId::new(0), Role::Wolf);

        let seer = build_context(&state, SeatId::new(2)).unwrap();
        assert_eq!(
            seer.knowledge.as_ref().and_then(|k| k.get(SeatId::new(0))),
            Some(Role::Wolf)
        );

        let protector = build_context(&state, SeatId::new(3)).unwrap();
        assert!(protector.knowledge.is_none());
    }

    #[test]
    fn test_unknown_seat() {
        let state = table();
        assert!(build_context(&state, SeatId::new(30)).is_err());
    }
}
