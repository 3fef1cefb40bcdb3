//! Utilities shared by the Liftoff server and client.

pub mod logger;
pub mod time;
