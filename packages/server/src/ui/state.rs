//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectSessionUseCase, DisconnectSessionUseCase, GetRankingUseCase, GetRoundStateUseCase,
    RelayMessageUseCase, ResetRoundUseCase, SetSpeedUseCase, StartRoundUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectSessionUseCase（セッション接続のユースケース）
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// DisconnectSessionUseCase（セッション切断のユースケース）
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// RelayMessageUseCase（チャット中継のユースケース）
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    /// StartRoundUseCase（ラウンド開始のユースケース）
    pub start_round_usecase: Arc<StartRoundUseCase>,
    /// ResetRoundUseCase（ラウンドリセットのユースケース）
    pub reset_round_usecase: Arc<ResetRoundUseCase>,
    /// SetSpeedUseCase（速度変更のユースケース）
    pub set_speed_usecase: Arc<SetSpeedUseCase>,
    /// GetRoundStateUseCase（ラウンド状態取得のユースケース）
    pub get_round_state_usecase: Arc<GetRoundStateUseCase>,
    /// GetRankingUseCase（ランキング取得のユースケース）
    pub get_ranking_usecase: Arc<GetRankingUseCase>,
}
