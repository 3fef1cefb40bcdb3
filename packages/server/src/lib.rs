//! Liftoff round server library.
//!
//! A crash-style round simulator: a round engine drives a multiplier curve
//! up to a hidden crash point and scores every participant's cash-out
//! target against it, while a WebSocket broadcast hub relays chat messages
//! and round events to every connected session.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod bootstrap;
