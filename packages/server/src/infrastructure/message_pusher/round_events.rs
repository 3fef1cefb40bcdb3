//! ラウンドイベントをブロードキャストハブ経由で配信する RoundObserver 実装

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{MessagePusher, RoundEvent, RoundObserver},
    infrastructure::dto::websocket::RoundEventMessage,
};

/// Serializes each round event to JSON and broadcasts it to every session.
pub struct BroadcastRoundObserver {
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastRoundObserver {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }
}

#[async_trait]
impl RoundObserver for BroadcastRoundObserver {
    async fn publish(&self, event: RoundEvent) {
        let message = RoundEventMessage::from(event);
        let json = match serde_json::to_string(&message) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize round event: {}", e);
                return;
            }
        };

        let report = self.message_pusher.broadcast(&json).await;
        if !report.evicted.is_empty() {
            tracing::info!(
                "Evicted {} session(s) while publishing round event",
                report.evicted.len()
            );
        }
    }
}
