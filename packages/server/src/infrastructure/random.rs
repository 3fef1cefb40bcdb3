//! Random sources for the round engine.
//!
//! - `RandomCrashGenerator` / `RandomStakeGenerator`: `rand`-backed, used in production
//! - `SequenceCrashGenerator` / `SequenceStakeGenerator`: replay a fixed sequence

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::domain::{
    CashOutTarget, CrashPoint, CrashPointGenerator, Stake, StakeGenerator, Wager,
    value_object::{MAX_CASH_OUT_TARGET_HUNDREDTHS, MAX_CRASH_POINT_HUNDREDTHS, MIN_CRASH_POINT_HUNDREDTHS},
};

const MIN_SYNTHETIC_WAGER_POINTS: u64 = 1;
const MAX_SYNTHETIC_WAGER_POINTS: u64 = 100;

/// Crash point generator drawing uniformly from the 2-decimal values in `[1.00, 10.00]`.
pub struct RandomCrashGenerator {
    rng: StdRng,
}

impl RandomCrashGenerator {
    /// Seeded from the operating system's entropy source.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomCrashGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CrashPointGenerator for RandomCrashGenerator {
    fn next_crash_point(&mut self) -> CrashPoint {
        let hundredths = self
            .rng
            .gen_range(MIN_CRASH_POINT_HUNDREDTHS..=MAX_CRASH_POINT_HUNDREDTHS);
        CrashPoint::saturating_from_hundredths(hundredths)
    }
}

/// Stake generator for synthetic participants: whole-point wagers in
/// `[1, 100]` and 2-decimal targets in `[0.00, 10.00]`.
pub struct RandomStakeGenerator {
    rng: StdRng,
}

impl RandomStakeGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStakeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl StakeGenerator for RandomStakeGenerator {
    fn next_stake(&mut self) -> Stake {
        let points = self
            .rng
            .gen_range(MIN_SYNTHETIC_WAGER_POINTS..=MAX_SYNTHETIC_WAGER_POINTS);
        let target = self.rng.gen_range(0..=MAX_CASH_OUT_TARGET_HUNDREDTHS);
        Stake {
            wager: Wager::from_points(points),
            cash_out_target: CashOutTarget::saturating_from_hundredths(target),
        }
    }
}

/// Replays a fixed list of crash points, cycling when exhausted.
///
/// An empty list always yields 1.00x.
pub struct SequenceCrashGenerator {
    values: Vec<CrashPoint>,
    cursor: usize,
}

impl SequenceCrashGenerator {
    pub fn new(values: Vec<CrashPoint>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl CrashPointGenerator for SequenceCrashGenerator {
    fn next_crash_point(&mut self) -> CrashPoint {
        if self.values.is_empty() {
            return CrashPoint::saturating_from_hundredths(MIN_CRASH_POINT_HUNDREDTHS);
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// Replays a fixed list of stakes, cycling when exhausted.
///
/// An empty list always yields a zero wager at 0.00x.
pub struct SequenceStakeGenerator {
    values: Vec<Stake>,
    cursor: usize,
}

impl SequenceStakeGenerator {
    pub fn new(values: Vec<Stake>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl StakeGenerator for SequenceStakeGenerator {
    fn next_stake(&mut self) -> Stake {
        if self.values.is_empty() {
            return Stake {
                wager: Wager::ZERO,
                cash_out_target: CashOutTarget::saturating_from_hundredths(0),
            };
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_two_decimals(value: f64) -> bool {
        let scaled = value * 100.0;
        (scaled - scaled.round()).abs() < 1e-9
    }

    #[test]
    fn test_random_crash_points_are_in_range_with_two_decimals() {
        // テスト項目: どのシードでもクラッシュ地点は [1.00, 10.00] かつ小数第 2 位まで
        for seed in 0..64 {
            // given (前提条件):
            let mut generator = RandomCrashGenerator::with_seed(seed);

            for _ in 0..200 {
                // when (操作):
                let crash = generator.next_crash_point();

                // then (期待する結果):
                assert!((1.0..=10.0).contains(&crash.value()), "seed {}: {}", seed, crash);
                assert!(has_two_decimals(crash.value()));
            }
        }
    }

    #[test]
    fn test_random_crash_points_cover_the_range() {
        // テスト項目: 十分な回数引くと範囲の両端付近まで分布する
        // given (前提条件):
        let mut generator = RandomCrashGenerator::with_seed(7);

        // when (操作):
        let draws: Vec<u32> = (0..5_000)
            .map(|_| generator.next_crash_point().hundredths())
            .collect();

        // then (期待する結果):
        assert!(draws.iter().any(|h| *h < 150));
        assert!(draws.iter().any(|h| *h > 950));
    }

    #[test]
    fn test_same_seed_gives_same_sequence() {
        // テスト項目: 同じシードからは同じ列が得られる
        // given (前提条件):
        let mut a = RandomCrashGenerator::with_seed(42);
        let mut b = RandomCrashGenerator::with_seed(42);

        // when (操作):
        let seq_a: Vec<CrashPoint> = (0..20).map(|_| a.next_crash_point()).collect();
        let seq_b: Vec<CrashPoint> = (0..20).map(|_| b.next_crash_point()).collect();

        // then (期待する結果):
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_random_stakes_are_in_range() {
        // テスト項目: 合成参加者の賭け金は [1, 100]、倍率は [0, 10]
        // given (前提条件):
        let mut generator = RandomStakeGenerator::with_seed(3);

        for _ in 0..1_000 {
            // when (操作):
            let stake = generator.next_stake();

            // then (期待する結果):
            assert!((1.0..=100.0).contains(&stake.wager.value()));
            assert_eq!(stake.wager.hundredths() % 100, 0);
            assert!((0.0..=10.0).contains(&stake.cash_out_target.value()));
            assert!(has_two_decimals(stake.cash_out_target.value()));
        }
    }

    #[test]
    fn test_sequence_generator_cycles() {
        // テスト項目: 固定列ジェネレータは列を繰り返す
        // given (前提条件):
        let values = vec![
            CrashPoint::from_hundredths(150).unwrap(),
            CrashPoint::from_hundredths(420).unwrap(),
        ];
        let mut generator = SequenceCrashGenerator::new(values.clone());

        // when (操作):
        let drawn: Vec<CrashPoint> = (0..3).map(|_| generator.next_crash_point()).collect();

        // then (期待する結果):
        assert_eq!(drawn, vec![values[0], values[1], values[0]]);
        assert_eq!(
            SequenceCrashGenerator::new(vec![]).next_crash_point().hundredths(),
            100
        );
    }
}
