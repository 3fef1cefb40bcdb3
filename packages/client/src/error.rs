//! Error types for the Liftoff client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server URL cannot be used; reconnecting will not help
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Could not establish the connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection dropped
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// HTTP API request failed
    #[error("API error: {0}")]
    Api(String),

    /// The server rejected a round control request (409)
    #[error("Rejected: {0}")]
    Rejected(String),

    /// Unparsable input line
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Api(e.to_string())
    }
}
