//! UseCase: チャットメッセージの中継
//!
//! 受信したテキストフレームを ChatMessage としてパースし、成功した場合は
//! 送信者を含む全セッションにそのまま転送する。パースできないものは破棄する。

use std::sync::Arc;

use crate::domain::{BroadcastReport, ChatMessage, MessagePusher, SessionId};

use super::error::RelayError;

/// チャットメッセージ中継のユースケース
pub struct RelayMessageUseCase {
    /// MessagePusher（ブロードキャストハブの抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayMessageUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// # Arguments
    ///
    /// * `from` - 受信元セッション
    /// * `raw` - 受信したテキストフレーム
    ///
    /// # Returns
    ///
    /// * `Ok(BroadcastReport)` - 転送結果
    /// * `Err(RelayError)` - パース失敗（何も送信しない）
    pub async fn execute(&self, from: &SessionId, raw: &str) -> Result<BroadcastReport, RelayError> {
        let message = match ChatMessage::from_wire(raw) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("Dropped malformed message from '{}': {}", from, e);
                return Err(e.into());
            }
        };

        tracing::debug!(
            "Relaying message from '{}' (sender '{}')",
            from,
            message.sender
        );

        // 再シリアライズせず、受信したフレームをそのまま転送
        Ok(self.message_pusher.broadcast(raw).await)
    }
}
