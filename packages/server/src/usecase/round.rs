//! UseCase: ラウンド操作
//!
//! HTTP 境界から受け取った緩い型の数値をここで一度だけクランプし、
//! 型付きの値として `RoundRuntime` に渡す。

use std::sync::Arc;

use crate::domain::{CashOutTarget, Participant, RoundSnapshot, SpeedFactor, Wager};

use super::{error::RoundControlError, round_runtime::RoundRuntime};

/// ラウンド開始のユースケース
pub struct StartRoundUseCase {
    runtime: Arc<RoundRuntime>,
}

impl StartRoundUseCase {
    pub fn new(runtime: Arc<RoundRuntime>) -> Self {
        Self { runtime }
    }

    /// # Arguments
    ///
    /// * `wager` - 賭け金（`[0, 残高]` にクランプ）
    /// * `cash_out_target` - キャッシュアウト倍率（`[0, 10]` にクランプ）
    pub async fn execute(
        &self,
        wager: f64,
        cash_out_target: f64,
    ) -> Result<RoundSnapshot, RoundControlError> {
        let balance = self.runtime.balance().await;
        let wager = Wager::clamped(wager, balance);
        let cash_out_target = CashOutTarget::clamped(cash_out_target);
        Ok(self.runtime.start(wager, cash_out_target).await?)
    }
}

/// ラウンドリセットのユースケース
pub struct ResetRoundUseCase {
    runtime: Arc<RoundRuntime>,
}

impl ResetRoundUseCase {
    pub fn new(runtime: Arc<RoundRuntime>) -> Self {
        Self { runtime }
    }

    pub async fn execute(&self) -> Result<RoundSnapshot, RoundControlError> {
        Ok(self.runtime.reset().await?)
    }
}

/// 速度変更のユースケース
pub struct SetSpeedUseCase {
    runtime: Arc<RoundRuntime>,
}

impl SetSpeedUseCase {
    pub fn new(runtime: Arc<RoundRuntime>) -> Self {
        Self { runtime }
    }

    /// `speed_factor` は `[1, 5]` にクランプされる
    pub async fn execute(&self, speed_factor: f64) -> Result<RoundSnapshot, RoundControlError> {
        Ok(self
            .runtime
            .set_speed(SpeedFactor::clamped(speed_factor))
            .await?)
    }
}

/// ラウンド状態取得のユースケース
pub struct GetRoundStateUseCase {
    runtime: Arc<RoundRuntime>,
}

impl GetRoundStateUseCase {
    pub fn new(runtime: Arc<RoundRuntime>) -> Self {
        Self { runtime }
    }

    pub async fn execute(&self) -> RoundSnapshot {
        self.runtime.snapshot().await
    }
}

/// ランキング取得のユースケース
pub struct GetRankingUseCase {
    runtime: Arc<RoundRuntime>,
}

impl GetRankingUseCase {
    pub fn new(runtime: Arc<RoundRuntime>) -> Self {
        Self { runtime }
    }

    /// 得点の降順、得点なしは最後
    pub async fn execute(&self) -> Vec<Participant> {
        self.runtime.ranking().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            CrashPoint, RoundEngine, RoundError, RoundObserver, RoundPhase, RoundSettings, Stake,
        },
        infrastructure::random::{SequenceCrashGenerator, SequenceStakeGenerator},
    };
    use async_trait::async_trait;
    use liftoff_shared::time::FixedClock;
    use std::time::Duration;

    struct NoopObserver;

    #[async_trait]
    impl RoundObserver for NoopObserver {
        async fn publish(&self, _event: crate::domain::RoundEvent) {}
    }

    fn create_runtime(crash_hundredths: u32) -> Arc<RoundRuntime> {
        let engine = RoundEngine::new(
            RoundSettings {
                synthetic_participants: 2,
                ..RoundSettings::default()
            },
            Box::new(SequenceCrashGenerator::new(vec![
                CrashPoint::from_hundredths(crash_hundredths).unwrap(),
            ])),
            Box::new(SequenceStakeGenerator::new(vec![
                Stake {
                    wager: Wager::from_points(10),
                    cash_out_target: CashOutTarget::clamped(2.0),
                },
                Stake {
                    wager: Wager::from_points(20),
                    cash_out_target: CashOutTarget::clamped(9.0),
                },
            ])),
        );
        Arc::new(RoundRuntime::new(
            engine,
            Arc::new(NoopObserver),
            Arc::new(FixedClock::new(1_000)),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_clamps_inputs() {
        // テスト項目: 範囲外の入力は境界にクランプされる
        // given (前提条件):
        let runtime = create_runtime(500);
        let usecase = StartRoundUseCase::new(runtime.clone());

        // when (操作):
        let snapshot = usecase.execute(-5.0, 42.0).await.unwrap();

        // then (期待する結果):
        let primary = &snapshot.participants[0];
        assert_eq!(primary.wager, Some(Wager::ZERO));
        assert_eq!(primary.cash_out_target, Some(CashOutTarget::clamped(10.0)));
        runtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_rounds_to_two_decimals_and_caps_at_balance() {
        // テスト項目: 賭け金は小数第 2 位に丸められ、残高を超えない
        // given (前提条件):
        let runtime = create_runtime(500);
        let usecase = StartRoundUseCase::new(runtime.clone());

        // when (操作):
        let snapshot = usecase.execute(5_000.0, 1.234).await.unwrap();

        // then (期待する結果):
        let primary = &snapshot.participants[0];
        assert_eq!(primary.wager, Some(Wager::from_points(1000)));
        assert_eq!(primary.cash_out_target.map(|t| t.hundredths()), Some(123));
        assert_eq!(snapshot.balance, Wager::ZERO);
        runtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_is_rejected() {
        // テスト項目: Running 中の 2 回目の start は拒否される
        // given (前提条件):
        let runtime = create_runtime(500);
        let usecase = StartRoundUseCase::new(runtime.clone());
        usecase.execute(50.0, 4.0).await.unwrap();

        // when (操作):
        let result = usecase.execute(10.0, 2.0).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RoundControlError::Rejected(RoundError::StartWhileRunning))
        );
        runtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_ranking_after_round_end() {
        // テスト項目: 終了後のランキングは得点の降順、得点なしは最後
        // given (前提条件):
        let runtime = create_runtime(500);
        StartRoundUseCase::new(runtime.clone())
            .execute(50.0, 4.0)
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5_050)).await;

        // when (操作):
        let ranking = GetRankingUseCase::new(runtime.clone()).execute().await;

        // then (期待する結果):
        let scores: Vec<Option<u64>> = ranking.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![Some(200), Some(20), None]);
        assert_eq!(ranking[0].display_name, "me");
    }

    #[tokio::test]
    async fn test_speed_is_clamped() {
        // テスト項目: 速度は [1, 5] にクランプされる
        // given (前提条件):
        let runtime = create_runtime(500);
        let usecase = SetSpeedUseCase::new(runtime.clone());

        // when (操作):
        let fast = usecase.execute(50.0).await.unwrap();
        let slow = usecase.execute(0.0).await.unwrap();

        // then (期待する結果):
        assert_eq!(fast.speed_factor.value(), 5.0);
        assert_eq!(fast.tick_interval, Duration::from_millis(20));
        assert_eq!(slow.speed_factor.value(), 1.0);
    }

    #[tokio::test]
    async fn test_reset_from_idle_and_state() {
        // テスト項目: Idle からの reset は成功し、状態取得で Idle が返る
        // given (前提条件):
        let runtime = create_runtime(500);

        // when (操作):
        let reset = ResetRoundUseCase::new(runtime.clone()).execute().await;
        let state = GetRoundStateUseCase::new(runtime).execute().await;

        // then (期待する結果):
        assert!(reset.is_ok());
        assert_eq!(state.phase, RoundPhase::Idle);
        assert_eq!(state.balance, Wager::from_points(1000));
    }
}
