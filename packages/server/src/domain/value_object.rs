//! Value objects for the round domain.
//!
//! Every numeric input that enters the domain is parsed and clamped exactly
//! once by the constructors in this module. Fractional values are stored as
//! integer hundredths so that comparisons between crash points and cash-out
//! targets are exact.

use std::{fmt, time::Duration};

use uuid::Uuid;

use super::error::ValueObjectError;

/// Smallest crash point, in hundredths (1.00x).
pub const MIN_CRASH_POINT_HUNDREDTHS: u32 = 100;
/// Largest crash point, in hundredths (10.00x).
pub const MAX_CRASH_POINT_HUNDREDTHS: u32 = 1000;
/// Largest cash-out target, in hundredths (10.00x).
pub const MAX_CASH_OUT_TARGET_HUNDREDTHS: u32 = 1000;
/// Speed factor bounds.
pub const MIN_SPEED_FACTOR: f64 = 1.0;
pub const MAX_SPEED_FACTOR: f64 = 5.0;
/// Lower bound for the tick timer period.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Scale `raw` to hundredths and clamp it into `[min, max]`.
///
/// NaN maps to `min`, infinities saturate.
fn clamp_to_hundredths(raw: f64, min: u64, max: u64) -> u64 {
    if raw.is_nan() {
        return min;
    }
    let scaled = (raw * 100.0).round();
    if scaled <= min as f64 {
        min
    } else if scaled >= max as f64 {
        max
    } else {
        scaled as u64
    }
}

/// Crash point of a round, in `[1.00, 10.00]` with 2-decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CrashPoint(u32);

impl CrashPoint {
    /// Create a crash point from hundredths, rejecting out-of-range values.
    pub fn from_hundredths(hundredths: u32) -> Result<Self, ValueObjectError> {
        if (MIN_CRASH_POINT_HUNDREDTHS..=MAX_CRASH_POINT_HUNDREDTHS).contains(&hundredths) {
            Ok(Self(hundredths))
        } else {
            Err(ValueObjectError::CrashPointOutOfRange(hundredths))
        }
    }

    /// Create a crash point from hundredths, saturating at the bounds.
    pub fn saturating_from_hundredths(hundredths: u32) -> Self {
        Self(hundredths.clamp(MIN_CRASH_POINT_HUNDREDTHS, MAX_CRASH_POINT_HUNDREDTHS))
    }

    pub fn hundredths(&self) -> u32 {
        self.0
    }

    pub fn value(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Number of ticks the round runs for: `floor(crash_point * 10)`.
    pub fn sample_count(&self) -> u32 {
        self.0 / 10
    }
}

impl fmt::Display for CrashPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}x", self.value())
    }
}

/// Multiplier at which a participant intends to cash out, in `[0.00, 10.00]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CashOutTarget(u32);

impl CashOutTarget {
    /// Parse-and-clamp entry point for untrusted input.
    pub fn clamped(raw: f64) -> Self {
        Self(clamp_to_hundredths(raw, 0, u64::from(MAX_CASH_OUT_TARGET_HUNDREDTHS)) as u32)
    }

    pub fn from_hundredths(hundredths: u32) -> Result<Self, ValueObjectError> {
        if hundredths <= MAX_CASH_OUT_TARGET_HUNDREDTHS {
            Ok(Self(hundredths))
        } else {
            Err(ValueObjectError::CashOutTargetOutOfRange(hundredths))
        }
    }

    pub fn saturating_from_hundredths(hundredths: u32) -> Self {
        Self(hundredths.min(MAX_CASH_OUT_TARGET_HUNDREDTHS))
    }

    pub fn hundredths(&self) -> u32 {
        self.0
    }

    pub fn value(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// A participant cashes out only if the crash happens strictly after the target.
    pub fn survives(&self, crash_point: CrashPoint) -> bool {
        crash_point.hundredths() > self.0
    }
}

/// Points put at stake for a round, non-negative with 2-decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Wager(u64);

impl Wager {
    pub const ZERO: Wager = Wager(0);

    /// Parse-and-clamp entry point for untrusted input, capped at `limit`.
    pub fn clamped(raw: f64, limit: Wager) -> Self {
        Self(clamp_to_hundredths(raw, 0, limit.0))
    }

    pub fn from_points(points: u64) -> Self {
        Self(points.saturating_mul(100))
    }

    pub fn from_hundredths(hundredths: u64) -> Self {
        Self(hundredths)
    }

    pub fn hundredths(&self) -> u64 {
        self.0
    }

    pub fn value(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn saturating_add(self, other: Wager) -> Wager {
        Wager(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Wager) -> Wager {
        Wager(self.0.saturating_sub(other.0))
    }

    /// `round(target * wager)` in whole points, rounding halves up.
    pub fn payout(&self, target: CashOutTarget) -> u64 {
        let product = u128::from(self.0) * u128::from(target.hundredths());
        let rounded = (product + 5_000) / 10_000;
        u64::try_from(rounded).unwrap_or(u64::MAX)
    }
}

impl fmt::Display for Wager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

/// Caller-controlled scalar compressing the real-time duration of a round.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SpeedFactor(f64);

impl SpeedFactor {
    /// Parse-and-clamp entry point for untrusted input. NaN maps to the slowest speed.
    pub fn clamped(raw: f64) -> Self {
        if raw.is_nan() {
            return Self(MIN_SPEED_FACTOR);
        }
        Self(raw.clamp(MIN_SPEED_FACTOR, MAX_SPEED_FACTOR))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// `base / speed`, never shorter than [`MIN_TICK_INTERVAL`].
    pub fn tick_interval(&self, base: Duration) -> Duration {
        base.div_f64(self.0).max(MIN_TICK_INTERVAL)
    }
}

impl Default for SpeedFactor {
    fn default() -> Self {
        Self(MIN_SPEED_FACTOR)
    }
}

/// Participant identifier, stable for the lifetime of the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantId(u32);

impl ParticipantId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Sequential round identifier, used to discard ticks from a cancelled round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoundId(u64);

impl RoundId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque handle of a live connection in the broadcast hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
