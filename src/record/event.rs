//! Structured game events and their audiences.
//!
//! Every event is wrapped in an `Envelope` that fixes its position in the
//! game-wide stream and who may see it. The audit channel sees everything;
//! `Envelope::visible_to` answers the question for a single seat.

use serde::{Deserialize, Serialize};

use crate::core::{EliminationCause, Phase, SeatId};
use crate::error::ActionError;
use crate::roles::{Faction, Role};
use crate::rules::GameResult;
use crate::tally::TallyOutcome;

/// Who may see an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Audience {
    /// Every seat.
    Public,
    /// One seat only.
    Seat(SeatId),
    /// Aggressor seats only.
    Aggressors,
    /// Nobody at the table; operators and logs only.
    Audit,
}

/// One seat's final state, published at game end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalSeat {
    pub seat: SeatId,
    pub name: String,
    pub role: Role,
    pub alive: bool,
}

/// Something that happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseStarted {
        day: u32,
        phase: Phase,
    },
    RoleAssigned {
        seat: SeatId,
        role: Role,
        /// Other aggressors, for aggressor seats. Empty otherwise.
        teammates: Vec<SeatId>,
    },
    PublicStatement {
        seat: SeatId,
        text: String,
    },
    AggressorChannelStatement {
        seat: SeatId,
        text: String,
    },
    VoteCast {
        seat: SeatId,
        /// `None` for an abstain, a pass or a rejected vote.
        target: Option<SeatId>,
        phase: Phase,
    },
    VoteTallied {
        phase: Phase,
        /// Targets with their counts, highest first.
        standings: Vec<(SeatId, u32)>,
        outcome: TallyOutcome,
    },
    ActionRejected {
        seat: SeatId,
        phase: Phase,
        reason: ActionError,
    },
    RoleRevealed {
        seer: SeatId,
        target: SeatId,
        role: Role,
    },
    SeatEliminated {
        seat: SeatId,
        cause: EliminationCause,
        revealed_role: Option<Role>,
    },
    NightPassedPeacefully {
        day: u32,
    },
    GameEnded {
        result: GameResult,
        final_roster: Vec<FinalSeat>,
    },
}

/// An event with its stream position and audience.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Position in the game-wide stream, starting at 0.
    pub sequence: u64,
    /// Day the event happened on.
    pub day: u32,
    pub audience: Audience,
    pub event: GameEvent,
}

impl Envelope {
    /// Whether a seat of `faction` sitting at `seat` may see this event.
    #[must_use]
    pub fn visible_to(&self, seat: SeatId, faction: Faction) -> bool {
        match self.audience {
            Audience::Public => true,
            Audience::Seat(id) => id == seat,
            Audience::Aggressors => faction == Faction::Aggressor,
            Audience::Audit => false,
        }
    }
}
