//! Concurrent decision collection.
//!
//! Every request of a sub-phase is spawned on a `JoinSet` and wrapped in
//! `tokio::time::timeout`. Collection is a barrier: nothing returns until
//! every task has answered, failed or timed out. Results come back sorted
//! by seat so that resolution never depends on completion order.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::agents::{Decision, DecisionProvider, DecisionRequest};
use crate::core::SeatId;
use crate::error::ActionError;

/// One seat's answer, or why there is none.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collected {
    pub seat: SeatId,
    pub result: Result<Decision, ActionError>,
}

/// Fan the requests out to the provider and wait for all of them.
pub async fn collect_decisions<P>(provider: &Arc<P>, requests: Vec<DecisionRequest>) -> Vec<Collected>
where
    P: DecisionProvider + ?Sized + 'static,
{
    let mut pending: BTreeSet<SeatId> = requests.iter().map(|r| r.seat).collect();
    let mut join_set = JoinSet::new();

    for request in requests {
        let provider = Arc::clone(provider);
        join_set.spawn(async move {
            let seat = request.seat;
            let limit = request.timeout;
            let result = match tokio::time::timeout(limit, provider.request_decision(request)).await {
                Ok(Ok(decision)) => Ok(decision),
                Ok(Err(e)) => Err(ActionError::ProviderFailed(e.to_string())),
                Err(_) => Err(ActionError::ProviderTimeout),
            };
            Collected { seat, result }
        });
    }

    let mut collected = Vec::with_capacity(pending.len());
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(entry) => {
                match &entry.result {
                    Ok(decision) => debug!(seat = %entry.seat, ?decision, "decision received"),
                    Err(e) => warn!(seat = %entry.seat, error = %e, "no usable decision"),
                }
                pending.remove(&entry.seat);
                collected.push(entry);
            }
            Err(e) => {
                warn!("decision task join error: {}", e);
            }
        }
    }

    // Tasks that panicked or were cancelled never reported their seat.
    for seat in pending {
        collected.push(Collected {
            seat,
            result: Err(ActionError::ProviderFailed("decision task aborted".to_string())),
        });
    }

    collected.sort_by_key(|c| c.seat);
    collected
}
