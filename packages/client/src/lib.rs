//! Liftoff CLI client.
//!
//! Joins the broadcast hub over one WebSocket connection: typed lines are
//! sent as chat messages, `/` commands drive the round over the HTTP API, and
//! incoming chat and round events are printed to the terminal.

pub mod api;
pub mod command;
pub mod error;
pub mod formatter;

mod domain;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
