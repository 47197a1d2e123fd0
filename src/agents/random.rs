//! Built-in providers for simulation and tests.
//!
//! - `PassingProvider`: always passes
//! - `RandomProvider`: uniformly random legal target, occasionally abstains
//!
//! `RandomProvider` derives a fresh RNG stream from its seed and the
//! request's day, phase, seat and log length, so the same game replays the
//! same choices no matter in which order concurrent requests are served.

use async_trait::async_trait;

use crate::core::GameRng;

use super::provider::{Decision, DecisionProvider, DecisionRequest, ProviderError};

/// Always passes.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassingProvider;

#[async_trait]
impl DecisionProvider for PassingProvider {
    async fn request_decision(&self, _request: DecisionRequest) -> Result<Decision, ProviderError> {
        Ok(Decision::pass())
    }
}

/// Picks uniformly among the offered targets.
///
/// In discussion phases it accuses a random alive seat with probability
/// `1 - abstain_probability`.
#[derive(Clone, Debug)]
pub struct RandomProvider {
    seed: u64,
    abstain_probability: f64,
}

impl RandomProvider {
    /// Create a provider that never abstains.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            abstain_probability: 0.0,
        }
    }

    /// Set how often the provider passes instead of acting. NaN means never.
    #[must_use]
    pub fn with_abstain_probability(mut self, probability: f64) -> Self {
        self.abstain_probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self
    }

    fn stream(&self, request: &DecisionRequest) -> GameRng {
        let ctx = &request.context;
        let spoken = ctx.public_log.len() + ctx.aggressor_log.as_ref().map_or(0, Vec::len);
        GameRng::new(self.seed).for_context(&format!(
            "{}:{:?}:{}:{}",
            ctx.day, ctx.phase, request.seat, spoken
        ))
    }
}

#[async_trait]
impl DecisionProvider for RandomProvider {
    async fn request_decision(&self, request: DecisionRequest) -> Result<Decision, ProviderError> {
        let mut rng = self.stream(&request);
        if rng.gen_bool(self.abstain_probability) {
            return Ok(Decision::pass());
        }

        if request.context.phase.is_discussion() {
            let others: Vec<_> = request
                .context
                .alive()
                .filter(|s| s.seat != request.seat)
                .collect();
            return Ok(match rng.choose(&others) {
                Some(suspect) => Decision::say(format!("I don't trust {}.", suspect.name)),
                None => Decision::pass(),
            });
        }

        Ok(match rng.choose(&request.eligible_targets) {
            Some(&target) => Decision::target(target),
            None => Decision::pass(),
        })
    }
}
