//! Vote aggregation.
//!
//! A `Tally` is built from one ballot per voter (a target or an abstain)
//! and turned into a `TallyOutcome` under one of two thresholds:
//!
//! - **Day**: the configured `DayVoteRule`. Under the default strict
//!   majority the threshold is measured against the alive seat count, not
//!   the number of ballots cast, so abstaining works against elimination.
//! - **Night**: plurality among the aggressors' non-abstaining votes.
//!
//! When the leaders tie, `TieBreak` decides. Random tie-breaks draw from
//! the game RNG so replays with the same seed pick the same seat.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameRng, SeatId};
use crate::error::InvariantBreach;

/// Threshold for the day elimination vote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayVoteRule {
    /// More than half of all alive seats must vote for the same target.
    #[default]
    StrictMajority,
    /// The most-voted target is eliminated (ties go to `TieBreak`).
    Plurality,
}

/// What to do when several targets share the top count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Nobody is eliminated.
    #[default]
    NoElimination,
    /// One of the tied leaders, chosen with the game RNG.
    RandomAmongLeaders,
}

/// Result of a tally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TallyOutcome {
    Elimination(SeatId),
    NoElimination,
}

impl TallyOutcome {
    /// The eliminated seat, if any.
    #[must_use]
    pub fn eliminated(self) -> Option<SeatId> {
        match self {
            TallyOutcome::Elimination(seat) => Some(seat),
            TallyOutcome::NoElimination => None,
        }
    }
}

/// Ballots for one vote.
#[derive(Clone, Debug, Default)]
pub struct Tally {
    /// One ballot per voter. `None` is an abstain.
    ballots: BTreeMap<SeatId, Option<SeatId>>,
    counts: FxHashMap<SeatId, u32>,
}

impl Tally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tally from `(voter, target)` pairs.
    ///
    /// A later ballot from the same voter replaces the earlier one.
    pub fn from_votes<I>(votes: I) -> Self
    where
        I: IntoIterator<Item = (SeatId, Option<SeatId>)>,
    {
        let mut tally = Self::new();
        for (voter, target) in votes {
            tally.cast(voter, target);
        }
        tally
    }

    /// Record or replace a ballot.
    pub fn cast(&mut self, voter: SeatId, target: Option<SeatId>) {
        if let Some(Some(previous)) = self.ballots.insert(voter, target) {
            if let Some(count) = self.counts.get_mut(&previous) {
                *count -= 1;
                if *count == 0 {
                    self.counts.remove(&previous);
                }
            }
        }
        if let Some(target) = target {
            *self.counts.entry(target).or_insert(0) += 1;
        }
    }

    /// Number of ballots, including abstains.
    #[must_use]
    pub fn ballots(&self) -> usize {
        self.ballots.len()
    }

    /// Number of ballots naming a target.
    #[must_use]
    pub fn votes_cast(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Votes received by `target`.
    #[must_use]
    pub fn count(&self, target: SeatId) -> u32 {
        self.counts.get(&target).copied().unwrap_or(0)
    }

    /// What `voter` chose. `None` if they cast no ballot.
    #[must_use]
    pub fn ballot(&self, voter: SeatId) -> Option<Option<SeatId>> {
        self.ballots.get(&voter).copied()
    }

    /// Targets sharing the highest count, in seat order. Empty if nobody voted.
    #[must_use]
    pub fn leaders(&self) -> SmallVec<[SeatId; 4]> {
        let Some(top) = self.counts.values().copied().max() else {
            return SmallVec::new();
        };
        let mut leaders: SmallVec<[SeatId; 4]> = self
            .counts
            .iter()
            .filter(|(_, &count)| count == top)
            .map(|(&seat, _)| seat)
            .collect();
        leaders.sort_unstable();
        leaders
    }

    /// Every voted-for target with its count, highest first then by seat.
    #[must_use]
    pub fn standings(&self) -> Vec<(SeatId, u32)> {
        let mut standings: Vec<_> = self.counts.iter().map(|(&s, &c)| (s, c)).collect();
        standings.sort_unstable_by(|(sa, ca), (sb, cb)| cb.cmp(ca).then(sa.cmp(sb)));
        standings
    }

    /// Outcome of a day vote with `alive` seats at the table.
    ///
    /// ```
    /// use werewolf_engine::core::{GameRng, SeatId};
    /// use werewolf_engine::tally::{DayVoteRule, Tally, TallyOutcome, TieBreak};
    ///
    /// let s = SeatId::new;
    /// // 3 of 5 alive seats vote for Seat 4.
    /// let tally = Tally::from_votes([
    ///     (s(0), Some(s(4))),
    ///     (s(1), Some(s(4))),
    ///     (s(2), Some(s(4))),
    ///     (s(3), None),
    ///     (s(4), Some(s(0))),
    /// ]);
    /// let mut rng = GameRng::new(0);
    /// let outcome = tally
    ///     .day_outcome(5, DayVoteRule::StrictMajority, TieBreak::NoElimination, &mut rng)
    ///     .unwrap();
    /// assert_eq!(outcome, TallyOutcome::Elimination(s(4)));
    /// ```
    pub fn day_outcome(
        &self,
        alive: usize,
        rule: DayVoteRule,
        tie_break: TieBreak,
        rng: &mut GameRng,
    ) -> Result<TallyOutcome, InvariantBreach> {
        if self.ballots.len() > alive {
            return Err(InvariantBreach::new(format!(
                "{} ballots for {alive} alive seats",
                self.ballots.len()
            )));
        }

        match rule {
            DayVoteRule::StrictMajority => {
                // At most one target can clear half the table.
                let winner = self
                    .counts
                    .iter()
                    .find(|(_, &count)| (count as usize) * 2 > alive)
                    .map(|(&seat, _)| seat);
                Ok(winner.map_or(TallyOutcome::NoElimination, TallyOutcome::Elimination))
            }
            DayVoteRule::Plurality => Ok(self.break_ties(tie_break, rng)),
        }
    }

    /// Outcome of the aggressors' night vote: plurality, ties per `tie_break`.
    pub fn night_outcome(&self, tie_break: TieBreak, rng: &mut GameRng) -> TallyOutcome {
        self.break_ties(tie_break, rng)
    }

    fn break_ties(&self, tie_break: TieBreak, rng: &mut GameRng) -> TallyOutcome {
        let leaders = self.leaders();
        match (leaders.as_slice(), tie_break) {
            ([], _) => TallyOutcome::NoElimination,
            ([only], _) => TallyOutcome::Elimination(*only),
            (_, TieBreak::NoElimination) => TallyOutcome::NoElimination,
            (tied, TieBreak::RandomAmongLeaders) => rng
                .choose(tied)
                .copied()
                .map_or(TallyOutcome::NoElimination, TallyOutcome::Elimination),
        }
    }
}
