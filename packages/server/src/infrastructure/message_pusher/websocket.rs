//! WebSocket を使った MessagePusher 実装（ブロードキャストハブ）
//!
//! ## 責務
//!
//! - 接続中セッションの `UnboundedSender` を管理
//! - 全セッションへのメッセージ配信（broadcast）
//! - 送信に失敗したセッションの登録解除
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! セッション集合は 1 つの Mutex で保護され、ブロードキャスト中に
//! 登録解除が割り込むことはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{BroadcastReport, MessagePusher, PusherChannel, SessionId};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_session(session_id, tx).await;
///
/// let report = pusher.broadcast("{\"sender\":\"me\",\"message\":\"hi\"}").await;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のセッションの WebSocket sender
    sessions: Arc<Mutex<HashMap<SessionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_session(&self, session_id: SessionId, sender: PusherChannel) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session_id, sender);
        tracing::debug!(
            "Session '{}' registered to hub ({} live)",
            session_id,
            sessions.len()
        );
    }

    async fn unregister_session(&self, session_id: &SessionId) -> bool {
        let mut sessions = self.sessions.lock().await;
        let removed = sessions.remove(session_id).is_some();
        if removed {
            tracing::debug!(
                "Session '{}' unregistered from hub ({} live)",
                session_id,
                sessions.len()
            );
        }
        removed
    }

    async fn broadcast(&self, content: &str) -> BroadcastReport {
        let mut sessions = self.sessions.lock().await;
        let mut report = BroadcastReport::default();

        for (session_id, sender) in sessions.iter() {
            // ブロードキャストでは一部の送信失敗を許容
            match sender.send(content.to_string()) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!("Failed to push message to session '{}': {}", session_id, e);
                    report.evicted.push(*session_id);
                }
            }
        }

        for session_id in &report.evicted {
            sessions.remove(session_id);
        }

        tracing::debug!(
            "Broadcasted message to {} session(s), evicted {}",
            report.delivered,
            report.evicted.len()
        );
        report
    }

    async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - register / unregister（冪等性）
    // - broadcast: 全セッションへの同一ペイロード配信
    // - 送信失敗セッションの切り離し（他のセッションへの配信は継続）
    // - broadcast と同時に行われる unregister
    // ========================================

    #[tokio::test]
    async fn test_broadcast_delivers_identical_payload_to_all_sessions() {
        // テスト項目: 3 セッション登録後の配信で、全員が同一のペイロードを受け取る
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let mut receivers = Vec::new();
        for _ in 0..3 {
            let (tx, rx) = mpsc::unbounded_channel();
            pusher.register_session(SessionId::generate(), tx).await;
            receivers.push(rx);
        }
        let payload = r#"{"sender":"me","message":"hello"}"#;

        // when (操作):
        let report = pusher.broadcast(payload).await;

        // then (期待する結果):
        assert_eq!(report.delivered, 3);
        assert!(report.evicted.is_empty());
        for rx in &mut receivers {
            assert_eq!(rx.recv().await.as_deref(), Some(payload));
        }
    }

    #[tokio::test]
    async fn test_broadcast_evicts_closed_session_and_continues() {
        // テスト項目: 閉じたセッションへの送信失敗は他のセッションへの配信を妨げず、登録解除される
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (alive_tx, mut alive_rx) = mpsc::unbounded_channel();
        let (closed_tx, closed_rx) = mpsc::unbounded_channel();
        let alive = SessionId::generate();
        let closed = SessionId::generate();
        pusher.register_session(alive, alive_tx).await;
        pusher.register_session(closed, closed_tx).await;
        drop(closed_rx);

        // when (操作):
        let report = pusher.broadcast("ping").await;

        // then (期待する結果):
        assert_eq!(report.delivered, 1);
        assert_eq!(report.evicted, vec![closed]);
        assert_eq!(alive_rx.recv().await.as_deref(), Some("ping"));
        assert_eq!(pusher.session_count().await, 1);
        assert!(!pusher.unregister_session(&closed).await);
    }

    #[tokio::test]
    async fn test_unregister_is_idempotent() {
        // テスト項目: 同じセッションの 2 回目の unregister は何もしない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let session = SessionId::generate();
        pusher.register_session(session, tx).await;

        // when (操作):
        let first = pusher.unregister_session(&session).await;
        let second = pusher.unregister_session(&session).await;

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(pusher.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_unregister_during_broadcast_does_not_fault() {
        // テスト項目: ブロードキャストと並行した unregister でも失敗せず、解除後は配信対象外
        // given (前提条件):
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let (stay_tx, mut stay_rx) = mpsc::unbounded_channel();
        let (leave_tx, mut leave_rx) = mpsc::unbounded_channel();
        let leaving = SessionId::generate();
        pusher.register_session(SessionId::generate(), stay_tx).await;
        pusher.register_session(leaving, leave_tx).await;

        // when (操作):
        let broadcaster = {
            let pusher = pusher.clone();
            tokio::spawn(async move {
                for n in 0..100 {
                    pusher.broadcast(&format!("msg {}", n)).await;
                }
            })
        };
        let unregister = {
            let pusher = pusher.clone();
            tokio::spawn(async move { pusher.unregister_session(&leaving).await })
        };
        let removed = unregister.await.unwrap();
        broadcaster.await.unwrap();
        pusher.broadcast("after").await;

        // then (期待する結果):
        assert!(removed);
        let mut stay_messages = Vec::new();
        while let Ok(msg) = stay_rx.try_recv() {
            stay_messages.push(msg);
        }
        assert_eq!(stay_messages.len(), 101);
        assert_eq!(stay_messages.last().map(String::as_str), Some("after"));

        let mut leave_messages = Vec::new();
        while let Ok(msg) = leave_rx.try_recv() {
            leave_messages.push(msg);
        }
        assert!(leave_messages.len() <= 100);
        assert!(!leave_messages.contains(&"after".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_with_no_sessions() {
        // テスト項目: セッションがなくてもエラーにならない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let report = pusher.broadcast("Message").await;

        // then (期待する結果):
        assert_eq!(report, BroadcastReport::default());
    }
}
