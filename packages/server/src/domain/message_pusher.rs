//! MessagePusher trait 定義
//!
//! ブロードキャストハブが提供するインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::value_object::SessionId;

/// Outbound channel of a single connection.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Outcome of a broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Number of sessions the payload was handed to.
    pub delivered: usize,
    /// Sessions whose channel was closed; they have been unregistered.
    pub evicted: Vec<SessionId>,
}

/// Broadcast hub: the set of live sessions and fan-out to them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Add a session to the live set.
    async fn register_session(&self, session_id: SessionId, sender: PusherChannel);

    /// Remove a session. Returns `false` if it was already gone.
    async fn unregister_session(&self, session_id: &SessionId) -> bool;

    /// Push to every registered session. Sessions that fail are evicted and
    /// do not interrupt delivery to the others.
    async fn broadcast(&self, content: &str) -> BroadcastReport;

    async fn session_count(&self) -> usize;
}
