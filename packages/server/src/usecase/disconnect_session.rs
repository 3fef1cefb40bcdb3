//! UseCase: セッション切断処理

use std::sync::Arc;

use crate::domain::{MessagePusher, SessionId};

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    /// MessagePusher（ブロードキャストハブの抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectSessionUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// ハブからセッションを登録解除する
    ///
    /// 既に解除済み（送信失敗で切り離された等）の場合は `false` を返し、何もしない。
    pub async fn execute(&self, session_id: &SessionId) -> bool {
        let removed = self.message_pusher.unregister_session(session_id).await;
        if removed {
            tracing::info!("Session '{}' disconnected", session_id);
        } else {
            tracing::debug!("Session '{}' was already unregistered", session_id);
        }
        removed
    }
}
