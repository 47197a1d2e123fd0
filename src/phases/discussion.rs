//! Free-talk phases.
//!
//! Discussion runs in rounds. Each round asks every speaker that is still
//! under its statement cap at once; statements are appended in seat order
//! so later rounds can react to earlier ones. The phase ends when:
//!
//! - a whole round passes
//! - the round cap is reached
//! - the phase statement cap is reached
//! - no speaker has statements left

use std::sync::Arc;
use std::time::Duration;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::agents::{build_context, DecisionProvider, DecisionRequest};
use crate::core::{DiscussionLimits, GameState, SeatId, Statement};
use crate::error::InvariantBreach;
use crate::resolver::collect_decisions;
use crate::roles::Faction;

/// Which log a discussion writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// Day discussion. Every alive seat speaks; everyone hears.
    Public,
    /// Night discussion among alive aggressors.
    Aggressors,
}

impl Channel {
    fn speakers(self, state: &GameState) -> Vec<SeatId> {
        match self {
            Channel::Public => state.alive_ids(),
            Channel::Aggressors => state.alive_in(Faction::Aggressor),
        }
    }
}

/// Run one discussion phase. Returns the new statements in the order they
/// were appended to the channel's log.
pub async fn discuss<P>(
    state: &mut GameState,
    provider: &Arc<P>,
    channel: Channel,
    limits: DiscussionLimits,
    timeout: Duration,
) -> Result<Vec<Statement>, InvariantBreach>
where
    P: DecisionProvider + ?Sized + 'static,
{
    let mut statements = Vec::new();
    let mut spoken: FxHashMap<SeatId, u32> = FxHashMap::default();
    let phase_cap = limits.max_statements_per_phase as usize;

    for round in 0..limits.max_rounds {
        if statements.len() >= phase_cap {
            break;
        }
        let speakers: Vec<SeatId> = channel
            .speakers(state)
            .into_iter()
            .filter(|seat| spoken.get(seat).copied().unwrap_or(0) < limits.max_statements_per_seat)
            .collect();
        if speakers.is_empty() {
            break;
        }

        let mut requests = Vec::with_capacity(speakers.len());
        for &seat in &speakers {
            requests.push(DecisionRequest {
                seat,
                context: build_context(state, seat)?,
                eligible_targets: Vec::new(),
                timeout,
            });
        }

        let mut said_something = false;
        for answer in collect_decisions(provider, requests).await {
            if statements.len() >= phase_cap {
                break;
            }
            let Ok(decision) = answer.result else {
                continue;
            };
            let Some(text) = decision.spoken() else {
                continue;
            };

            let statement = Statement {
                day: state.day(),
                seat: answer.seat,
                text: text.to_string(),
            };
            match channel {
                Channel::Public => state.push_public(statement.clone()),
                Channel::Aggressors => state.push_aggressor(statement.clone()),
            }
            *spoken.entry(answer.seat).or_insert(0) += 1;
            statements.push(statement);
            said_something = true;
        }

        debug!(day = state.day(), ?channel, round, total = statements.len(), "discussion round finished");
        if !said_something {
            break;
        }
    }

    Ok(statements)
}
