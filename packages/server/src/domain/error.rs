//! Domain error types.

use thiserror::Error;

use super::value_object::RoundId;

/// Errors raised when constructing value objects from checked input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("crash point {0} (hundredths) is outside 1.00..=10.00")]
    CrashPointOutOfRange(u32),

    #[error("cash-out target {0} (hundredths) is outside 0.00..=10.00")]
    CashOutTargetOutOfRange(u32),

    #[error("malformed chat message: {0}")]
    MalformedChatMessage(String),
}

/// Rejected round engine transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("a round is already running")]
    StartWhileRunning,

    #[error("cannot reset while a round is running")]
    ResetWhileRunning,

    #[error("cannot change speed while a round is running")]
    SpeedChangeWhileRunning,

    #[error("tick for round {0} does not match the current round")]
    StaleTick(RoundId),

    #[error("round {0} is not running")]
    NotRunning(RoundId),
}
