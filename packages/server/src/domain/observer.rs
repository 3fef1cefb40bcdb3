//! Observer of round engine events.

use async_trait::async_trait;

use super::engine::RoundEvent;

/// Receives every event produced by the round engine, in order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoundObserver: Send + Sync {
    async fn publish(&self, event: RoundEvent);
}
