//! Dependency wiring shared by the server binary and the integration tests.
//!
//! Initialize dependencies in order:
//! 1. MessagePusher (broadcast hub)
//! 2. RoundEngine + RoundRuntime
//! 3. UseCases
//! 4. AppState

use std::sync::Arc;

use liftoff_shared::time::Clock;

use crate::{
    domain::{CrashPointGenerator, MessagePusher, RoundEngine, RoundSettings, StakeGenerator},
    infrastructure::{
        message_pusher::{BroadcastRoundObserver, WebSocketMessagePusher},
        random::{RandomCrashGenerator, RandomStakeGenerator},
    },
    ui::AppState,
    usecase::{
        ConnectSessionUseCase, DisconnectSessionUseCase, GetRankingUseCase, GetRoundStateUseCase,
        RelayMessageUseCase, ResetRoundUseCase, RoundRuntime, SetSpeedUseCase, StartRoundUseCase,
    },
};

/// Wired application.
pub struct Application {
    pub state: AppState,
    pub message_pusher: Arc<dyn MessagePusher>,
    /// Kept so the caller can cancel the ticker on shutdown.
    pub runtime: Arc<RoundRuntime>,
}

/// Wire the application with entropy-seeded random sources.
pub fn build(settings: RoundSettings, clock: Arc<dyn Clock>) -> Application {
    build_with(
        settings,
        Box::new(RandomCrashGenerator::new()),
        Box::new(RandomStakeGenerator::new()),
        clock,
    )
}

/// Wire the application with the given random sources.
pub fn build_with(
    settings: RoundSettings,
    crash_points: Box<dyn CrashPointGenerator>,
    stakes: Box<dyn StakeGenerator>,
    clock: Arc<dyn Clock>,
) -> Application {
    // 1. MessagePusher
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());

    // 2. RoundRuntime（ラウンドイベントはハブ経由で全セッションに配信）
    let engine = RoundEngine::new(settings, crash_points, stakes);
    let observer = Arc::new(BroadcastRoundObserver::new(message_pusher.clone()));
    let runtime = Arc::new(RoundRuntime::new(engine, observer, clock));

    // 3. UseCases / 4. AppState
    let state = AppState {
        connect_session_usecase: Arc::new(ConnectSessionUseCase::new(message_pusher.clone())),
        disconnect_session_usecase: Arc::new(DisconnectSessionUseCase::new(
            message_pusher.clone(),
        )),
        relay_message_usecase: Arc::new(RelayMessageUseCase::new(message_pusher.clone())),
        start_round_usecase: Arc::new(StartRoundUseCase::new(runtime.clone())),
        reset_round_usecase: Arc::new(ResetRoundUseCase::new(runtime.clone())),
        set_speed_usecase: Arc::new(SetSpeedUseCase::new(runtime.clone())),
        get_round_state_usecase: Arc::new(GetRoundStateUseCase::new(runtime.clone())),
        get_ranking_usecase: Arc::new(GetRankingUseCase::new(runtime.clone())),
    };

    Application {
        state,
        message_pusher,
        runtime,
    }
}
