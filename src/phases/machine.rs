//! The phase state machine.
//!
//! `Game` owns the state, the provider and the record sink, and drives one
//! phase per `step`. The cycle is:
//!
//! ```text
//! Setup -> DayDiscussion -> DayVote -> NightWolfDiscussion -> NightWolfVote
//!       -> NightSeer -> NightProtector -> NightResolution -> DayDiscussion ...
//! ```
//!
//! ## Transitions
//!
//! - The win condition is checked after `DayVote` and `NightResolution`; a
//!   decided game jumps straight to `GameOver`.
//! - The day counter advances only on the `NightResolution -> DayDiscussion`
//!   edge. If that would pass `max_days`, the game ends without a winner.
//! - A phase with no eligible actor is skipped without side effects.
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use werewolf_engine::agents::RandomProvider;
//! use werewolf_engine::core::GameConfig;
//! use werewolf_engine::phases::Game;
//! use werewolf_engine::record::MemorySink;
//!
//! # async fn demo() -> Result<(), werewolf_engine::GameError> {
//! let config = GameConfig::default().with_seed(42);
//! let mut game = Game::new(config, Arc::new(RandomProvider::new(42)), MemorySink::new())?;
//! let report = game.run().await?;
//! println!("{} after {} days", report.result, report.days);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::agents::DecisionProvider;
use crate::core::{
    ActionKind, ActionOutcome, ActionRecord, EliminationCause, GameConfig, GameRng, GameState,
    Phase, SeatId, Verdict,
};
use crate::error::{GameError, InvariantBreach, InvariantReport};
use crate::record::{Audience, Envelope, GameEvent, RecordSink};
use crate::resolver::{eligible_targets, gather_actions, resolve_night};
use crate::roles::{Faction, Role};
use crate::roster;
use crate::rules::{self, GameResult, WinState};
use crate::tally::Tally;

use super::discussion::{discuss, Channel};
use super::report::{final_roster, GameReport};

/// A running game.
pub struct Game<P: ?Sized, S> {
    config: GameConfig,
    state: GameState,
    provider: Arc<P>,
    sink: S,
    seed: u64,
    /// Next envelope sequence number.
    sequence: u64,
    /// Set once an invariant breaks; the game refuses to continue.
    halted: bool,
}

impl<P, S> Game<P, S>
where
    P: DecisionProvider + ?Sized + 'static,
    S: RecordSink,
{
    /// Validate the configuration and deal roles. The game starts in `Setup`.
    pub fn new(config: GameConfig, provider: Arc<P>, sink: S) -> Result<Self, GameError> {
        config.validate()?;

        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let seats = roster::build_seats(&config, &rng)?;
        let seed = rng.seed();
        let state = GameState::new(seats, rng.for_context("tally"));

        Ok(Self {
            config,
            state,
            provider,
            sink,
            seed,
            sequence: 0,
            halted: false,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed the table was dealt with. Reuse it to replay the game.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Final report, once the game is over.
    #[must_use]
    pub fn report(&self) -> Option<GameReport> {
        self.state
            .result()
            .map(|&result| GameReport::new(&self.state, result, self.seed))
    }

    // === Driving ===

    /// Run until `GameOver` and return the report.
    pub async fn run(&mut self) -> Result<GameReport, GameError> {
        while !self.state.is_over() {
            self.step().await?;
        }
        self.report().ok_or(GameError::GameFinished)
    }

    /// Play the current phase and transition. Returns the phase entered.
    pub async fn step(&mut self) -> Result<Phase, GameError> {
        if self.halted || self.state.is_over() {
            return Err(GameError::GameFinished);
        }

        let phase = self.state.phase();
        let played = match phase {
            Phase::Setup => self.run_setup(),
            Phase::DayDiscussion => self.run_discussion(Channel::Public).await,
            Phase::DayVote => self.run_day_vote().await,
            Phase::NightWolfDiscussion => self.run_discussion(Channel::Aggressors).await,
            Phase::NightWolfVote => self.run_wolf_vote().await,
            Phase::NightSeer => self.run_night_ability(Role::Seer, ActionKind::Reveal).await,
            Phase::NightProtector => self.run_night_ability(Role::Protector, ActionKind::Protect).await,
            Phase::NightResolution => self.run_resolution(),
            Phase::GameOver => return Err(GameError::GameFinished),
        };

        match played.and_then(|()| self.transition(phase)) {
            Ok(()) => Ok(self.state.phase()),
            Err(breach) => Err(self.fail(breach)),
        }
    }

    fn transition(&mut self, from: Phase) -> Result<(), InvariantBreach> {
        if matches!(from, Phase::DayVote | Phase::NightResolution) {
            if let WinState::Decided(faction) = rules::evaluate(self.state.seats())? {
                self.end(GameResult::Winner(faction));
                return Ok(());
            }
        }

        if from == Phase::NightResolution {
            if self.state.day() >= self.config.max_days {
                self.end(GameResult::DayLimitReached);
                return Ok(());
            }
            self.state.advance_day();
        }

        let next = from.successor();
        self.state.set_phase(next);
        debug!(day = self.state.day(), phase = %next, "phase entered");
        Ok(())
    }

    fn end(&mut self, result: GameResult) {
        self.state.finish(result);
        info!(day = self.state.day(), %result, "game over");
        let final_roster = final_roster(&self.state);
        self.emit(Audience::Public, GameEvent::GameEnded { result, final_roster });
    }

    fn fail(&mut self, breach: InvariantBreach) -> GameError {
        self.halted = true;
        error!(
            day = self.state.day(),
            phase = %self.state.phase(),
            reason = %breach,
            "invariant violated"
        );
        GameError::InvariantViolation(Box::new(InvariantReport {
            reason: breach.reason,
            day: self.state.day(),
            phase: self.state.phase(),
            history: self.state.history().iter().cloned().collect(),
        }))
    }

    fn emit(&mut self, audience: Audience, event: GameEvent) {
        let envelope = Envelope {
            sequence: self.sequence,
            day: self.state.day(),
            audience,
            event,
        };
        self.sequence += 1;
        self.sink.record(&envelope);
    }

    fn announce_phase(&mut self, audience: Audience) {
        let (day, phase) = (self.state.day(), self.state.phase());
        info!(day, %phase, "phase started");
        self.emit(audience, GameEvent::PhaseStarted { day, phase });
    }

    /// Public VoteCast for every ballot, audit entries for rejections.
    fn publish_ballots(&mut self, records: &[ActionRecord], audience: Audience) {
        for record in records {
            self.emit(
                audience,
                GameEvent::VoteCast {
                    seat: record.actor,
                    target: record.valid_target(),
                    phase: record.phase,
                },
            );
        }
        self.publish_rejections(records);
    }

    fn publish_rejections(&mut self, records: &[ActionRecord]) {
        for record in records {
            if let Verdict::Rejected(reason) = &record.verdict {
                self.emit(
                    Audience::Audit,
                    GameEvent::ActionRejected {
                        seat: record.actor,
                        phase: record.phase,
                        reason: reason.clone(),
                    },
                );
            }
        }
    }

    // === Phases ===

    fn run_setup(&mut self) -> Result<(), InvariantBreach> {
        info!(
            seats = self.state.seat_count(),
            seed = self.seed,
            aggressors = self.state.alive_in(Faction::Aggressor).len(),
            "game setup"
        );
        let assignments: Vec<(SeatId, Role, Vec<SeatId>)> = self
            .state
            .seats()
            .iter()
            .map(|s| (s.id(), s.role(), roster::teammates(self.state.seats(), s.id())))
            .collect();
        for (seat, role, teammates) in assignments {
            self.emit(Audience::Seat(seat), GameEvent::RoleAssigned { seat, role, teammates });
        }
        Ok(())
    }

    async fn run_discussion(&mut self, channel: Channel) -> Result<(), InvariantBreach> {
        let (audience, limits) = match channel {
            Channel::Public => (Audience::Public, self.config.discussion),
            Channel::Aggressors => (Audience::Aggressors, self.config.discussion.for_wolves()),
        };
        let has_speakers = match channel {
            Channel::Public => self.state.alive_count() > 0,
            Channel::Aggressors => !self.state.alive_in(Faction::Aggressor).is_empty(),
        };
        if !has_speakers {
            return Ok(());
        }
        self.announce_phase(audience);

        let statements = discuss(
            &mut self.state,
            &self.provider,
            channel,
            limits,
            self.config.action_timeout,
        )
        .await?;

        for statement in statements {
            let event = match channel {
                Channel::Public => GameEvent::PublicStatement {
                    seat: statement.seat,
                    text: statement.text,
                },
                Channel::Aggressors => GameEvent::AggressorChannelStatement {
                    seat: statement.seat,
                    text: statement.text,
                },
            };
            self.emit(audience, event);
        }
        Ok(())
    }

    async fn run_day_vote(&mut self) -> Result<(), InvariantBreach> {
        let voters = self.state.alive_ids();
        if voters.is_empty() {
            return Ok(());
        }
        self.announce_phase(Audience::Public);

        let mut records = gather_actions(
            &self.state,
            &self.provider,
            ActionKind::Vote,
            &voters,
            self.config.action_timeout,
        )
        .await?;
        self.publish_ballots(&records, Audience::Public);

        let tally = Tally::from_votes(records.iter().map(|r| (r.actor, r.valid_target())));
        let alive = self.state.alive_count();
        let outcome = tally.day_outcome(
            alive,
            self.config.day_vote_rule,
            self.config.tie_break,
            &mut self.state.rng,
        )?;
        info!(day = self.state.day(), ?outcome, "day vote tallied");
        self.emit(
            Audience::Public,
            GameEvent::VoteTallied {
                phase: Phase::DayVote,
                standings: tally.standings(),
                outcome,
            },
        );

        let eliminated = outcome.eliminated();
        for record in &mut records {
            if let Some(target) = record.valid_target() {
                record.outcome = if Some(target) == eliminated {
                    ActionOutcome::Applied
                } else {
                    ActionOutcome::NotChosen
                };
            }
        }
        for record in records {
            self.state.record_action(record);
        }

        if let Some(seat) = eliminated {
            let elimination = self.state.eliminate(
                seat,
                EliminationCause::Vote,
                self.config.reveal_role_on_elimination,
            )?;
            info!(day = self.state.day(), %seat, "seat voted out");
            self.emit(
                Audience::Public,
                GameEvent::SeatEliminated {
                    seat,
                    cause: EliminationCause::Vote,
                    revealed_role: elimination.revealed_role,
                },
            );
        }
        Ok(())
    }

    async fn run_wolf_vote(&mut self) -> Result<(), InvariantBreach> {
        let wolves = self.state.alive_in(Faction::Aggressor);
        if wolves.is_empty() {
            return Ok(());
        }
        self.announce_phase(Audience::Aggressors);

        let records = gather_actions(
            &self.state,
            &self.provider,
            ActionKind::Eliminate,
            &wolves,
            self.config.action_timeout,
        )
        .await?;
        self.publish_ballots(&records, Audience::Aggressors);

        let tally = Tally::from_votes(records.iter().map(|r| (r.actor, r.valid_target())));
        let outcome = tally.night_outcome(self.config.tie_break, &mut self.state.rng);
        debug!(day = self.state.day(), ?outcome, "wolf vote tallied");
        self.emit(
            Audience::Aggressors,
            GameEvent::VoteTallied {
                phase: Phase::NightWolfVote,
                standings: tally.standings(),
                outcome,
            },
        );

        self.state.night.kill = outcome.eliminated();
        self.state.night.wolf_votes = records;
        Ok(())
    }

    async fn run_night_ability(&mut self, role: Role, kind: ActionKind) -> Result<(), InvariantBreach> {
        let mut actors = self.state.alive_with_role(role);
        actors.retain(|&actor| !eligible_targets(&self.state, actor, kind).is_empty());
        if actors.is_empty() {
            return Ok(());
        }
        self.announce_phase(Audience::Audit);

        let records = gather_actions(
            &self.state,
            &self.provider,
            kind,
            &actors,
            self.config.action_timeout,
        )
        .await?;
        self.publish_rejections(&records);

        match kind {
            ActionKind::Reveal => self.state.night.reveals = records,
            ActionKind::Protect => self.state.night.protections = records,
            ActionKind::Vote | ActionKind::Eliminate => {
                return Err(InvariantBreach::new(format!("{kind:?} is not a solo night ability")));
            }
        }
        Ok(())
    }

    fn run_resolution(&mut self) -> Result<(), InvariantBreach> {
        self.announce_phase(Audience::Public);

        let plan = std::mem::take(&mut self.state.night);
        let report = resolve_night(&mut self.state, plan, self.config.reveal_role_on_elimination)?;

        for reveal in &report.reveals {
            self.emit(
                Audience::Seat(reveal.seer),
                GameEvent::RoleRevealed {
                    seer: reveal.seer,
                    target: reveal.target,
                    role: reveal.role,
                },
            );
        }
        match report.eliminated {
            Some(elimination) => self.emit(
                Audience::Public,
                GameEvent::SeatEliminated {
                    seat: elimination.seat,
                    cause: EliminationCause::NightKill,
                    revealed_role: elimination.revealed_role,
                },
            ),
            None => {
                let day = self.state.day();
                info!(day, "nobody died during the night");
                self.emit(Audience::Public, GameEvent::NightPassedPeacefully { day });
            }
        }
        Ok(())
    }

    /// Jump to a day and phase without playing the phases in between.
    /// Pending night actions are dropped.
    #[cfg(test)]
    fn advance_to(&mut self, day: u32, phase: Phase) {
        while self.state.day() < day {
            self.state.advance_day();
        }
        self.state.night = Default::default();
        self.state.set_phase(phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::PassingProvider;
    use crate::error::ConfigurationError;
    use crate::record::MemorySink;

    fn game(config: GameConfig) -> Game<PassingProvider, MemorySink> {
        Game::new(config, Arc::new(PassingProvider), MemorySink::new()).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = GameConfig::new(8).with_role(Role::Wolf, 4).with_role(Role::Villager, 4);
        let err = Game::new(config, Arc::new(PassingProvider), MemorySink::new()).err();
        assert!(matches!(
            err,
            Some(GameError::Configuration(ConfigurationError::AggressorMajority { .. }))
        ));
    }

    #[tokio::test]
    async fn test_setup_step() {
        let mut game = game(GameConfig::default().with_seed(3));
        assert_eq!(game.state().phase(), Phase::Setup);

        let phase = game.step().await.unwrap();
        assert_eq!(phase, Phase::DayDiscussion);
        assert_eq!(game.state().day(), 1);

        let assigned = game
            .sink()
            .events()
            .filter(|e| matches!(e, GameEvent::RoleAssigned { .. }))
            .count();
        assert_eq!(assigned, 8);

        // Aggressors learn each other.
        for env in game.sink().envelopes() {
            if let GameEvent::RoleAssigned { role, teammates, seat } = &env.event {
                assert_eq!(env.audience, Audience::Seat(*seat));
                let expected = if *role == Role::Wolf { 1 } else { 0 };
                assert_eq!(teammates.len(), expected);
            }
        }
    }

    #[tokio::test]
    async fn test_skipped_phases_emit_nothing() {
        // No seer or protector at this table.
        let mut game = game(GameConfig::default().with_seed(3).with_role(Role::Seer, 0).with_role(Role::Villager, 6));
        game.advance_to(1, Phase::NightSeer);

        assert_eq!(game.step().await.unwrap(), Phase::NightProtector);
        assert_eq!(game.step().await.unwrap(), Phase::NightResolution);
        assert!(game.sink().is_empty());
    }

    #[tokio::test]
    async fn test_day_limit() {
        let mut game = game(GameConfig::default().with_seed(1).with_max_days(1));
        game.advance_to(1, Phase::NightResolution);

        assert_eq!(game.step().await.unwrap(), Phase::GameOver);
        assert_eq!(game.state().result(), Some(&GameResult::DayLimitReached));
        assert!(matches!(game.step().await, Err(GameError::GameFinished)));
    }

    #[tokio::test]
    async fn test_seer_with_nobody_left_to_reveal_is_skipped() {
        let mut game = game(GameConfig::default().with_seed(4));
        let seer = game.state().alive_with_role(Role::Seer)[0];
        let others: Vec<_> = game
            .state()
            .seats()
            .iter()
            .filter(|s| s.id() != seer)
            .map(|s| (s.id(), s.role()))
            .collect();
        for (seat, role) in others {
            game.state.seat_mut(seer).unwrap().learn(seat, role);
        }
        game.advance_to(1, Phase::NightSeer);

        assert_eq!(game.step().await.unwrap(), Phase::NightProtector);
        assert!(game.sink().is_empty());
        assert!(game.state().history().is_empty());
    }

    #[tokio::test]
    async fn test_invariant_breach_halts_the_game() {
        let mut game = game(GameConfig::default().with_seed(6));
        while game.state().day() < 2 {
            game.step().await.unwrap();
        }
        assert_eq!(game.state().phase(), Phase::DayDiscussion);
        let played = game.state().history().len();
        assert!(played > 0);

        // Wipe out both factions behind the state machine's back.
        for seat in game.state().alive_ids() {
            game.state.eliminate(seat, EliminationCause::NightKill, true).unwrap();
        }
        assert_eq!(game.step().await.unwrap(), Phase::DayVote);

        let report = match game.step().await {
            Err(GameError::InvariantViolation(report)) => report,
            other => panic!("expected an invariant violation, got {other:?}"),
        };
        assert_eq!(report.day, 2);
        assert_eq!(report.phase, Phase::DayVote);
        assert_eq!(report.history.len(), played);
        assert_eq!(report.history, game.state().history().iter().cloned().collect::<Vec<_>>());

        assert!(!game.is_over());
        assert!(matches!(game.step().await, Err(GameError::GameFinished)));
        assert!(matches!(game.run().await, Err(GameError::GameFinished)));
    }

    #[tokio::test]
    async fn test_sequence_numbers_are_contiguous() {
        let mut game = game(GameConfig::default().with_seed(9).with_max_days(2));
        game.run().await.unwrap();

        let sequences: Vec<_> = game.sink().envelopes().iter().map(|e| e.sequence).collect();
        let expected: Vec<_> = (0..sequences.len() as u64).collect();
        assert_eq!(sequences, expected);
    }
}
