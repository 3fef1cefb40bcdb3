//! UseCase: セッション接続処理

use std::sync::Arc;

use crate::domain::{MessagePusher, PusherChannel, SessionId};

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    /// MessagePusher（ブロードキャストハブの抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectSessionUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 新しいセッション ID を払い出し、ハブに登録する
    ///
    /// 接続前のメッセージは届かない（バックログなし）。
    pub async fn execute(&self, sender: PusherChannel) -> SessionId {
        let session_id = SessionId::generate();
        self.message_pusher.register_session(session_id, sender).await;
        tracing::info!("Session '{}' connected", session_id);
        session_id
    }
}
