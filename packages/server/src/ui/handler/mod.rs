//! HTTP and WebSocket handlers.

mod http;
mod websocket;

pub use http::{get_ranking, get_round_state, health_check, reset_round, set_speed, start_round};
pub use websocket::websocket_handler;
