//! UseCase 層
//!
//! ハブ（セッション接続・切断・チャット中継）とラウンド操作のユースケース。

mod connect_session;
mod disconnect_session;
mod error;
mod relay_message;
mod round;
mod round_runtime;

pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::{RelayError, RoundControlError};
pub use relay_message::RelayMessageUseCase;
pub use round::{
    GetRankingUseCase, GetRoundStateUseCase, ResetRoundUseCase, SetSpeedUseCase,
    StartRoundUseCase,
};
pub use round_runtime::RoundRuntime;
