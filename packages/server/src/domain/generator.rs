//! Random sources consumed by the round engine.
//!
//! The engine only sees these traits, so production code plugs in a
//! `rand`-backed implementation and tests plug in fixed sequences.

use super::value_object::{CashOutTarget, CrashPoint, Wager};

/// Produces the crash point of each round.
pub trait CrashPointGenerator: Send {
    /// Draw the next crash point, uniform over `[1.00, 10.00]`.
    fn next_crash_point(&mut self) -> CrashPoint;
}

/// A synthetic participant's stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stake {
    pub wager: Wager,
    pub cash_out_target: CashOutTarget,
}

/// Produces stakes for synthetic participants.
pub trait StakeGenerator: Send {
    /// Draw a wager in `[1, 100]` and a cash-out target in `[0.00, 10.00]`.
    fn next_stake(&mut self) -> Stake;
}
