//! Round engine: the `Idle → Running → Ended` state machine and scoring.
//!
//! The engine is synchronous and owns all round state. Timing lives outside:
//! the caller invokes [`RoundEngine::tick`] once per timer period with the
//! round id it was started for, so ticks from a cancelled round are rejected
//! instead of mutating a reinitialized one.

use std::time::Duration;

use super::{
    curve,
    entity::{Bankroll, Participant, ParticipantSet, Round, RoundPhase},
    error::RoundError,
    generator::{CrashPointGenerator, StakeGenerator},
    value_object::{CashOutTarget, CrashPoint, ParticipantId, RoundId, SpeedFactor, Timestamp, Wager},
};

/// Static configuration of the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSettings {
    /// Tick period at speed factor 1.
    pub base_interval: Duration,
    pub synthetic_participants: usize,
    pub starting_balance: Wager,
    pub primary_name: String,
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            base_interval: Duration::from_millis(100),
            synthetic_participants: 4,
            starting_balance: Wager::from_points(1000),
            primary_name: "me".to_string(),
        }
    }
}

/// Observable output of the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    Started {
        round_id: RoundId,
        participants: Vec<Participant>,
        speed_factor: SpeedFactor,
        tick_interval: Duration,
        started_at: Timestamp,
    },
    Multiplier {
        round_id: RoundId,
        tick: u32,
        elapsed: f64,
        multiplier: f64,
    },
    Ended {
        round_id: RoundId,
        crash_point: CrashPoint,
        participants: Vec<Participant>,
        ranking: Vec<ParticipantId>,
        balance: Wager,
        ended_at: Timestamp,
    },
    Reset,
}

/// Result of a successful tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Running(RoundEvent),
    /// The last sample was emitted; scoring already happened.
    Ended { last: RoundEvent, ended: RoundEvent },
}

impl TickOutcome {
    pub fn is_final(&self) -> bool {
        matches!(self, TickOutcome::Ended { .. })
    }

    pub fn into_events(self) -> Vec<RoundEvent> {
        match self {
            TickOutcome::Running(event) => vec![event],
            TickOutcome::Ended { last, ended } => vec![last, ended],
        }
    }
}

/// Point-in-time view of the engine. The crash point is only revealed once ended.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    pub phase: RoundPhase,
    pub round_id: Option<RoundId>,
    pub tick: u32,
    pub elapsed: f64,
    pub current_multiplier: f64,
    pub crash_point: Option<CrashPoint>,
    pub speed_factor: SpeedFactor,
    pub tick_interval: Duration,
    pub balance: Wager,
    pub participants: Vec<Participant>,
    pub started_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
}

pub struct RoundEngine {
    crash_points: Box<dyn CrashPointGenerator>,
    stakes: Box<dyn StakeGenerator>,
    settings: RoundSettings,
    participants: ParticipantSet,
    bankroll: Bankroll,
    speed_factor: SpeedFactor,
    round: Option<Round>,
    last_round_id: RoundId,
}

impl RoundEngine {
    pub fn new(
        settings: RoundSettings,
        crash_points: Box<dyn CrashPointGenerator>,
        stakes: Box<dyn StakeGenerator>,
    ) -> Self {
        let participants =
            ParticipantSet::roster(settings.primary_name.clone(), settings.synthetic_participants);
        let bankroll = Bankroll::new(settings.starting_balance);
        Self {
            crash_points,
            stakes,
            settings,
            participants,
            bankroll,
            speed_factor: SpeedFactor::default(),
            round: None,
            last_round_id: RoundId::new(0),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.as_ref().map_or(RoundPhase::Idle, |round| round.phase)
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn participants(&self) -> &ParticipantSet {
        &self.participants
    }

    pub fn balance(&self) -> Wager {
        self.bankroll.balance()
    }

    pub fn speed_factor(&self) -> SpeedFactor {
        self.speed_factor
    }

    /// Tick period the next round will use.
    pub fn tick_interval(&self) -> Duration {
        self.speed_factor.tick_interval(self.settings.base_interval)
    }

    /// Start a new round for the primary participant's stake.
    ///
    /// The wager is capped by the primary balance and debited immediately.
    pub fn start(
        &mut self,
        primary_wager: Wager,
        primary_target: CashOutTarget,
        started_at: Timestamp,
    ) -> Result<RoundEvent, RoundError> {
        if self.phase() == RoundPhase::Running {
            return Err(RoundError::StartWhileRunning);
        }

        let wager = self.bankroll.stake(primary_wager);
        let crash_point = self.crash_points.next_crash_point();
        let stakes = &mut self.stakes;
        self.participants.place_stakes(wager, primary_target, || {
            let stake = stakes.next_stake();
            (stake.wager, stake.cash_out_target)
        });

        let round_id = self.last_round_id.next();
        self.last_round_id = round_id;
        let tick_interval = self.tick_interval();
        self.round = Some(Round {
            id: round_id,
            crash_point,
            phase: RoundPhase::Running,
            tick: 0,
            current_multiplier: curve::multiplier_at(0.0, crash_point),
            speed_factor: self.speed_factor,
            tick_interval,
            started_at,
            ended_at: None,
        });

        tracing::info!(
            "Round {} started: wager {}, target {:.2}x, tick interval {:?}",
            round_id,
            wager,
            primary_target.value(),
            tick_interval
        );

        Ok(RoundEvent::Started {
            round_id,
            participants: self.participants.to_vec(),
            speed_factor: self.speed_factor,
            tick_interval,
            started_at,
        })
    }

    /// Advance the round identified by `round_id` by one sample.
    ///
    /// Ending and scoring happen within this call, so no caller can observe
    /// the last sample without the final scores.
    pub fn tick(&mut self, round_id: RoundId, now: Timestamp) -> Result<TickOutcome, RoundError> {
        let round = match self.round.as_mut() {
            Some(round) if round.id == round_id => round,
            _ => return Err(RoundError::StaleTick(round_id)),
        };
        if !round.is_running() {
            return Err(RoundError::NotRunning(round_id));
        }

        round.tick += 1;
        let elapsed = round.elapsed();
        round.current_multiplier = curve::multiplier_at(elapsed, round.crash_point);
        let last = RoundEvent::Multiplier {
            round_id,
            tick: round.tick,
            elapsed,
            multiplier: round.current_multiplier,
        };

        if round.tick < round.crash_point.sample_count() {
            return Ok(TickOutcome::Running(last));
        }

        let ended = self.finish(now);
        Ok(TickOutcome::Ended { last, ended })
    }

    fn finish(&mut self, now: Timestamp) -> RoundEvent {
        let Some(round) = self.round.as_mut() else {
            return RoundEvent::Reset;
        };
        round.phase = RoundPhase::Ended;
        round.ended_at = Some(now);
        let round_id = round.id;
        let crash_point = round.crash_point;

        self.participants.settle_all(crash_point);
        if let Some(score) = self.participants.primary().score {
            self.bankroll.credit_points(score);
        }

        tracing::info!(
            "Round {} crashed at {}; balance {}",
            round_id,
            crash_point,
            self.bankroll.balance()
        );

        RoundEvent::Ended {
            round_id,
            crash_point,
            participants: self.participants.to_vec(),
            ranking: self.participants.ranking().iter().map(|p| p.id).collect(),
            balance: self.bankroll.balance(),
            ended_at: now,
        }
    }

    /// Return to `Idle`, clearing the round and every stake. The balance is kept.
    pub fn reset(&mut self) -> Result<RoundEvent, RoundError> {
        if self.phase() == RoundPhase::Running {
            return Err(RoundError::ResetWhileRunning);
        }
        self.round = None;
        self.participants.clear_stakes();
        tracing::info!("Round state reset");
        Ok(RoundEvent::Reset)
    }

    /// Change the speed used by the next round.
    pub fn set_speed(&mut self, speed_factor: SpeedFactor) -> Result<Duration, RoundError> {
        if self.phase() == RoundPhase::Running {
            return Err(RoundError::SpeedChangeWhileRunning);
        }
        self.speed_factor = speed_factor;
        Ok(self.tick_interval())
    }

    pub fn ranking(&self) -> Vec<Participant> {
        self.participants.ranking().into_iter().cloned().collect()
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let round = self.round.as_ref();
        RoundSnapshot {
            phase: self.phase(),
            round_id: round.map(|r| r.id),
            tick: round.map_or(0, |r| r.tick),
            elapsed: round.map_or(0.0, Round::elapsed),
            current_multiplier: round.map_or(0.0, |r| r.current_multiplier),
            crash_point: round
                .filter(|r| r.phase == RoundPhase::Ended)
                .map(|r| r.crash_point),
            speed_factor: round.map_or(self.speed_factor, |r| r.speed_factor),
            tick_interval: round.map_or_else(|| self.tick_interval(), |r| r.tick_interval),
            balance: self.bankroll.balance(),
            participants: self.participants.to_vec(),
            started_at: round.map(|r| r.started_at),
            ended_at: round.and_then(|r| r.ended_at),
        }
    }
}
