//! Game configuration types.
//!
//! The caller builds a `GameConfig` before setup:
//! - Table size and role counts
//! - Optional seat names and seed
//! - Per-decision timeout and day limit
//! - Discussion limits
//! - Vote policies
//!
//! Role-count validation lives in the roster; `GameConfig::validate`
//! delegates to it and checks the remaining fields.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::roles::{Role, RoleCounts};
use crate::roster;
use crate::tally::{DayVoteRule, TieBreak};

/// Limits on the free-talk phases.
///
/// Discussion runs in rounds: every seat that still has statements left is
/// asked at once, and the phase ends early when a whole round passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionLimits {
    /// Maximum rounds in the day discussion. The wolf discussion gets half (at least one).
    pub max_rounds: u32,

    /// Maximum statements one seat may make in one discussion phase.
    pub max_statements_per_seat: u32,

    /// Maximum statements in one day discussion. The wolf discussion gets half.
    pub max_statements_per_phase: u32,
}

impl Default for DiscussionLimits {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            max_statements_per_seat: 3,
            max_statements_per_phase: 20,
        }
    }
}

impl DiscussionLimits {
    /// No discussion at all.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            max_rounds: 0,
            max_statements_per_seat: 0,
            max_statements_per_phase: 0,
        }
    }

    /// Limits for the aggressor channel.
    #[must_use]
    pub fn for_wolves(self) -> Self {
        Self {
            max_rounds: if self.max_rounds == 0 { 0 } else { (self.max_rounds / 2).max(1) },
            max_statements_per_seat: self.max_statements_per_seat,
            max_statements_per_phase: self.max_statements_per_phase / 2,
        }
    }
}

/// Complete game configuration. Consumed once, at setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats.
    pub seat_count: usize,

    /// Seats per role. Must add up to `seat_count`.
    pub role_counts: RoleCounts,

    /// Display names. Empty means "Player 1", "Player 2", ...
    #[serde(default)]
    pub seat_names: Vec<String>,

    /// Seed for role assignment and tie-breaks. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// How long each decision request may take before it counts as a pass.
    pub action_timeout: Duration,

    /// The game ends without a winner if it would enter this day + 1.
    pub max_days: u32,

    #[serde(default)]
    pub discussion: DiscussionLimits,

    #[serde(default)]
    pub day_vote_rule: DayVoteRule,

    #[serde(default)]
    pub tie_break: TieBreak,

    /// Announce the role of each eliminated seat publicly.
    pub reveal_role_on_elimination: bool,
}

impl Default for GameConfig {
    /// Eight seats: two wolves, one seer, five villagers.
    fn default() -> Self {
        Self::new(8)
            .with_role(Role::Wolf, 2)
            .with_role(Role::Seer, 1)
            .with_role(Role::Villager, 5)
    }
}

impl GameConfig {
    /// Create a configuration with no roles assigned yet.
    pub fn new(seat_count: usize) -> Self {
        Self {
            seat_count,
            role_counts: RoleCounts::new(),
            seat_names: Vec::new(),
            seed: None,
            action_timeout: Duration::from_secs(60),
            max_days: 10,
            discussion: DiscussionLimits::default(),
            day_vote_rule: DayVoteRule::default(),
            tie_break: TieBreak::default(),
            reveal_role_on_elimination: true,
        }
    }

    /// Set the count for one role.
    #[must_use]
    pub fn with_role(mut self, role: Role, count: u32) -> Self {
        self.role_counts.set(role, count);
        self
    }

    /// Replace the whole count table.
    #[must_use]
    pub fn with_role_counts(mut self, counts: RoleCounts) -> Self {
        self.role_counts = counts;
        self
    }

    #[must_use]
    pub fn with_seat_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seat_names = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_days(mut self, days: u32) -> Self {
        self.max_days = days;
        self
    }

    #[must_use]
    pub fn with_discussion(mut self, limits: DiscussionLimits) -> Self {
        self.discussion = limits;
        self
    }

    #[must_use]
    pub fn with_day_vote_rule(mut self, rule: DayVoteRule) -> Self {
        self.day_vote_rule = rule;
        self
    }

    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    #[must_use]
    pub fn with_role_reveal(mut self, reveal: bool) -> Self {
        self.reveal_role_on_elimination = reveal;
        self
    }

    /// Check the whole configuration.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        roster::validate_counts(self.seat_count, &self.role_counts)?;

        if !self.seat_names.is_empty() {
            if self.seat_names.len() != self.seat_count {
                return Err(ConfigurationError::NameCountMismatch {
                    names: self.seat_names.len(),
                    seats: self.seat_count,
                });
            }
            let mut seen = rustc_hash::FxHashSet::default();
            for name in &self.seat_names {
                if !seen.insert(name.as_str()) {
                    return Err(ConfigurationError::DuplicateName(name.clone()));
                }
            }
        }

        if self.action_timeout.is_zero() {
            return Err(ConfigurationError::ZeroTimeout);
        }
        if self.max_days == 0 {
            return Err(ConfigurationError::ZeroDayLimit);
        }
        Ok(())
    }

    /// Display name for a seat index.
    #[must_use]
    pub fn seat_name(&self, index: usize) -> String {
        self.seat_names
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Player {}", index + 1))
    }
}
