//! Multiplier curve sampled by the round engine.

use super::value_object::CrashPoint;

/// Ticks per unit of elapsed round-time; each tick advances elapsed by 0.1.
pub const TICKS_PER_UNIT: f64 = 10.0;

/// Value reported once elapsed time has passed the crash point (the axis maximum).
pub const PLATEAU: f64 = 10.0;

/// Displayed multiplier after `elapsed` units of round-time.
///
/// Quadratic ramp from 0 that reaches exactly `crash_point` at
/// `elapsed == crash_point`, then a flat [`PLATEAU`]. Negative elapsed values
/// are treated as 0.
pub fn value_at(elapsed: f64, crash_point: f64) -> f64 {
    let elapsed = elapsed.max(0.0);
    if elapsed <= crash_point {
        let ratio = elapsed / crash_point;
        crash_point * ratio * ratio
    } else {
        PLATEAU
    }
}

/// Typed variant of [`value_at`].
pub fn multiplier_at(elapsed: f64, crash_point: CrashPoint) -> f64 {
    value_at(elapsed, crash_point.value())
}

/// Elapsed round-time after `tick` ticks.
///
/// Divides the integer count instead of accumulating 0.1 steps, so the final
/// sample of a crash point like 7.00 lands exactly on it.
pub fn elapsed_for_tick(tick: u32) -> f64 {
    f64::from(tick) / TICKS_PER_UNIT
}
