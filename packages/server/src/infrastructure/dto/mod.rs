//! Data Transfer Objects (DTOs) for the round server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: round events pushed through the hub
//! - `http`: HTTP API request / response bodies

pub mod conversion;
pub mod http;
pub mod websocket;
