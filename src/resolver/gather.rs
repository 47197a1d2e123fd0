//! Request, collect and judge one ability for a set of actors.

use std::sync::Arc;
use std::time::Duration;

use crate::agents::{build_context, DecisionProvider, DecisionRequest};
use crate::core::{ActionKind, ActionRecord, GameState, SeatId};
use crate::error::InvariantBreach;

use super::collect::collect_decisions;
use super::validate::{eligible_targets, judge};

/// Ask every actor for a target of `kind` and judge the answers.
///
/// Actors with no eligible target are not asked and produce no record.
/// Records come back in seat order.
pub async fn gather_actions<P>(
    state: &GameState,
    provider: &Arc<P>,
    kind: ActionKind,
    actors: &[SeatId],
    timeout: Duration,
) -> Result<Vec<ActionRecord>, InvariantBreach>
where
    P: DecisionProvider + ?Sized + 'static,
{
    let mut offers = Vec::with_capacity(actors.len());
    let mut requests = Vec::with_capacity(actors.len());
    for &actor in actors {
        let eligible = eligible_targets(state, actor, kind);
        if eligible.is_empty() {
            continue;
        }
        requests.push(DecisionRequest {
            seat: actor,
            context: build_context(state, actor)?,
            eligible_targets: eligible.clone(),
            timeout,
        });
        offers.push((actor, eligible));
    }

    let collected = collect_decisions(provider, requests).await;

    // Both lists are in seat order.
    offers.sort_by_key(|(seat, _)| *seat);
    Ok(collected
        .into_iter()
        .zip(offers)
        .map(|(answer, (_, eligible))| judge(state, answer.seat, kind, answer.result, &eligible))
        .collect())
}
