//! Vote tallying for the day vote and the aggressors' night vote.

pub mod votes;

pub use votes::{DayVoteRule, Tally, TallyOutcome, TieBreak};
