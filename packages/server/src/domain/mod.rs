//! Domain layer: round engine, participants and the hub/observer seams.
//!
//! Nothing here depends on the infrastructure or UI layers. The traits
//! (`CrashPointGenerator`, `StakeGenerator`, `MessagePusher`, `RoundObserver`)
//! are defined here and implemented by the infrastructure layer.

pub mod curve;
pub mod engine;
pub mod entity;
pub mod error;
pub mod generator;
pub mod message_pusher;
pub mod observer;
pub mod value_object;

pub use engine::{RoundEngine, RoundEvent, RoundSettings, RoundSnapshot, TickOutcome};
pub use entity::{
    Bankroll, ChatMessage, MAX_SYNTHETIC_PARTICIPANTS, Participant, ParticipantKind,
    ParticipantSet, Round, RoundPhase, score_for,
};
pub use error::{RoundError, ValueObjectError};
pub use generator::{CrashPointGenerator, Stake, StakeGenerator};
pub use message_pusher::{BroadcastReport, MessagePusher, PusherChannel};
pub use observer::RoundObserver;
pub use value_object::{
    CashOutTarget, CrashPoint, ParticipantId, RoundId, SessionId, SpeedFactor, Timestamp, Wager,
};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
#[cfg(test)]
pub use observer::MockRoundObserver;
