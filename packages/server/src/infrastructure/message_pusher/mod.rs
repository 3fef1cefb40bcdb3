//! メッセージ送信（通知）の実装
//!
//! ## 実装
//!
//! - `websocket`: WebSocket セッションへのブロードキャストハブ
//! - `round_events`: ラウンドイベントをハブ経由で配信する `RoundObserver`

pub mod round_events;
pub mod websocket;

pub use round_events::BroadcastRoundObserver;
pub use websocket::WebSocketMessagePusher;
