//! Round runtime: the round engine plus the single cancelable tick timer.
//!
//! ## Locking
//!
//! `ticker` is always taken before `engine`. Events are published while the
//! engine lock is held, so observers see them in engine order and a round's
//! `Ended` event is out before any later `start` or `reset` can run.
//!
//! The ticker is only aborted after the engine has been seen not `Running`,
//! so an abort never cuts a round short.

use std::{sync::Arc, time::Duration};

use liftoff_shared::time::Clock;
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

use crate::domain::{
    CashOutTarget, Participant, RoundEngine, RoundError, RoundId, RoundObserver, RoundSnapshot,
    SpeedFactor, Timestamp, Wager,
};

pub struct RoundRuntime {
    engine: Arc<Mutex<RoundEngine>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
    observer: Arc<dyn RoundObserver>,
    clock: Arc<dyn Clock>,
}

impl RoundRuntime {
    pub fn new(engine: RoundEngine, observer: Arc<dyn RoundObserver>, clock: Arc<dyn Clock>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            ticker: Mutex::new(None),
            observer,
            clock,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_jst_millis())
    }

    /// Start a round and spawn its ticker.
    pub async fn start(
        &self,
        wager: Wager,
        cash_out_target: CashOutTarget,
    ) -> Result<RoundSnapshot, RoundError> {
        let mut ticker = self.ticker.lock().await;
        let mut engine = self.engine.lock().await;

        let event = engine.start(wager, cash_out_target, self.now())?;
        if let Some(previous) = ticker.take() {
            previous.abort();
        }
        self.observer.publish(event).await;

        let (round_id, period) = match engine.round() {
            Some(round) => (round.id, round.tick_interval),
            None => return Ok(engine.snapshot()),
        };
        *ticker = Some(tokio::spawn(run_ticker(
            self.engine.clone(),
            self.observer.clone(),
            self.clock.clone(),
            round_id,
            period,
        )));

        Ok(engine.snapshot())
    }

    /// Return to `Idle`. Rejected while a round is running.
    pub async fn reset(&self) -> Result<RoundSnapshot, RoundError> {
        let mut ticker = self.ticker.lock().await;
        let mut engine = self.engine.lock().await;

        let event = engine.reset()?;
        if let Some(previous) = ticker.take() {
            previous.abort();
        }
        self.observer.publish(event).await;

        Ok(engine.snapshot())
    }

    /// Change the speed used by the next round. Rejected while a round is running.
    pub async fn set_speed(&self, speed_factor: SpeedFactor) -> Result<RoundSnapshot, RoundError> {
        let mut engine = self.engine.lock().await;
        let interval = engine.set_speed(speed_factor)?;
        tracing::info!(
            "Speed factor set to {:.2} (tick interval {:?})",
            speed_factor.value(),
            interval
        );
        Ok(engine.snapshot())
    }

    pub async fn snapshot(&self) -> RoundSnapshot {
        self.engine.lock().await.snapshot()
    }

    pub async fn ranking(&self) -> Vec<Participant> {
        self.engine.lock().await.ranking()
    }

    /// Balance available to the primary participant.
    pub async fn balance(&self) -> Wager {
        self.engine.lock().await.balance()
    }

    /// Cancel the ticker, if any. Called on server shutdown.
    pub async fn shutdown(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
            tracing::info!("Round ticker cancelled");
        }
    }
}

async fn run_ticker(
    engine: Arc<Mutex<RoundEngine>>,
    observer: Arc<dyn RoundObserver>,
    clock: Arc<dyn Clock>,
    round_id: RoundId,
    period: Duration,
) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    // 遅れたティックをまとめて発火させない
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let mut engine = engine.lock().await;
        let now = Timestamp::new(clock.now_jst_millis());
        match engine.tick(round_id, now) {
            Ok(outcome) => {
                let done = outcome.is_final();
                for event in outcome.into_events() {
                    observer.publish(event).await;
                }
                if done {
                    tracing::debug!("Ticker for round {} finished", round_id);
                    return;
                }
            }
            Err(e) => {
                tracing::debug!("Ticker for round {} stopped: {}", round_id, e);
                return;
            }
        }
    }
}
