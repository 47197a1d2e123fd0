//! Game phases.
//!
//! The day/night cycle is a fixed sequence. `Phase::successor` gives the
//! unconditional next phase; the state machine overrides it only to jump to
//! `GameOver` when a faction has won or the day limit is reached.

use serde::{Deserialize, Serialize};

/// One discrete stage of the day/night cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    /// Roles are dealt. Entered exactly once.
    Setup,
    DayDiscussion,
    DayVote,
    NightWolfDiscussion,
    NightWolfVote,
    NightSeer,
    NightProtector,
    /// Collected night actions take effect.
    NightResolution,
    /// Terminal.
    GameOver,
}

impl Phase {
    /// The phase that follows this one when no win condition interrupts.
    #[must_use]
    pub const fn successor(self) -> Phase {
        match self {
            Phase::Setup => Phase::DayDiscussion,
            Phase::DayDiscussion => Phase::DayVote,
            Phase::DayVote => Phase::NightWolfDiscussion,
            Phase::NightWolfDiscussion => Phase::NightWolfVote,
            Phase::NightWolfVote => Phase::NightSeer,
            Phase::NightSeer => Phase::NightProtector,
            Phase::NightProtector => Phase::NightResolution,
            Phase::NightResolution => Phase::DayDiscussion,
            Phase::GameOver => Phase::GameOver,
        }
    }

    #[must_use]
    pub const fn is_night(self) -> bool {
        matches!(
            self,
            Phase::NightWolfDiscussion
                | Phase::NightWolfVote
                | Phase::NightSeer
                | Phase::NightProtector
                | Phase::NightResolution
        )
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver)
    }

    /// Phases in which agents speak rather than pick a target.
    #[must_use]
    pub const fn is_discussion(self) -> bool {
        matches!(self, Phase::DayDiscussion | Phase::NightWolfDiscussion)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::DayDiscussion => "day discussion",
            Phase::DayVote => "day vote",
            Phase::NightWolfDiscussion => "wolf discussion",
            Phase::NightWolfVote => "wolf vote",
            Phase::NightSeer => "seer",
            Phase::NightProtector => "protector",
            Phase::NightResolution => "dawn",
            Phase::GameOver => "game over",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut phase = Phase::Setup;
        let mut seen = vec![phase];
        for _ in 0..8 {
            phase = phase.successor();
            seen.push(phase);
        }

        assert_eq!(
            seen,
            vec![
                Phase::Setup,
                Phase::DayDiscussion,
                Phase::DayVote,
                Phase::NightWolfDiscussion,
                Phase::NightWolfVote,
                Phase::NightSeer,
                Phase::NightProtector,
                Phase::NightResolution,
                Phase::DayDiscussion,
            ]
        );
    }

    #[test]
    fn test_game_over_is_absorbing() {
        assert_eq!(Phase::GameOver.successor(), Phase::GameOver);
        assert!(Phase::GameOver.is_terminal());
        assert!(!Phase::NightResolution.is_terminal());
    }

    #[test]
    fn test_night_and_discussion_flags() {
        assert!(!Phase::DayVote.is_night());
        assert!(Phase::NightSeer.is_night());
        assert!(Phase::NightResolution.is_night());
        assert!(Phase::DayDiscussion.is_discussion());
        assert!(Phase::NightWolfDiscussion.is_discussion());
        assert!(!Phase::NightWolfVote.is_discussion());
    }
}
