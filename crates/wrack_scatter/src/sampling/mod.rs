//! Sampling strategies and spatial indexing for generating positions in a 2D domain.
//!
//! Domains are axis-aligned rectangles anchored at the origin: a strategy given an extent
//! `(w, h)` proposes points in `[0, w) × [0, h)`.
use std::f32::consts::TAU;

use mint::Vector2;
use rand::Rng as RngCore;

pub mod grid;
pub mod poisson_disk;
pub mod uniform_random;

pub use poisson_disk::PoissonDiskSampling;
pub use uniform_random::UniformRandomSampling;

/// Trait for position sampling.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, domain_extent: Vector2<f32>, rng: &mut dyn RngCore) -> Vec<Vector2<f32>>;
}

/// Generate a random float in the range [0, 1).
///
/// Uses the top 24 bits so every result is exactly representable and strictly below 1.
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}

/// Generate a random float in `[min, max)`.
#[inline]
pub(crate) fn rand_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + rand01(rng) * (max - min)
}

/// Uniform angle in `[0, 2π)`.
#[inline]
pub(crate) fn rand_angle(rng: &mut dyn RngCore) -> f32 {
    rand01(rng) * TAU
}

/// Uniform index in `[0, len)`. `len` must be non-zero.
///
/// Integer multiply-shift on a full 64-bit draw: every index stays reachable for any `len`.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn RngCore, len: usize) -> usize {
    debug_assert!(len > 0);
    ((rng.next_u64() as u128 * len as u128) >> 64) as usize
}

/// Compute the next smaller representable float value.
///
/// Returns a value that is strictly less than the input, useful for
/// ensuring bounds are strictly inside a domain.
#[inline]
pub(crate) fn next_down(val: f32) -> f32 {
    if val.is_nan() {
        return f32::NAN;
    }

    if val == f32::NEG_INFINITY {
        return f32::NEG_INFINITY;
    }

    if val == f32::INFINITY {
        return f32::MAX;
    }

    if val == 0.0 {
        return -f32::MIN_POSITIVE;
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits.saturating_sub(1))
    } else {
        f32::from_bits(bits.saturating_add(1))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) struct FixedRng {
        pub(crate) value: u32,
    }

    impl rand::TryRng for FixedRng {
        type Error = core::convert::Infallible;

        fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
            Ok(self.value)
        }

        fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
            Ok(((self.value as u64) << 32) | self.value as u64)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Self::Error> {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
            Ok(())
        }
    }

    #[test]
    fn rand01_returns_zero_for_zero_input() {
        let mut rng = FixedRng { value: 0 };
        assert_eq!(rand01(&mut rng), 0.0);
    }

    #[test]
    fn rand01_stays_below_one() {
        let mut rng = FixedRng { value: u32::MAX };
        assert!(rand01(&mut rng) < 1.0);
    }

    #[test]
    fn rand01_values_in_range() {
        let test_values = vec![0, 1, 100, 1000, u32::MAX / 2, u32::MAX - 1, u32::MAX];

        for value in test_values {
            let mut rng = FixedRng { value };
            let result = rand01(&mut rng);
            assert!(
                (0.0..=1.0).contains(&result),
                "rand01({}) = {} is out of range [0,1]",
                value,
                result
            );
        }
    }

    #[test]
    fn rand_range_maps_onto_interval() {
        let mut rng = FixedRng {
            value: u32::MAX / 2,
        };
        let v = rand_range(&mut rng, 10.0, 20.0);
        assert!((v - 15.0).abs() < 0.01);
    }

    #[test]
    fn rand_index_stays_below_len() {
        let mut rng = FixedRng { value: u32::MAX };
        assert_eq!(rand_index(&mut rng, 7), 6);
        let mut rng = FixedRng { value: 0 };
        assert_eq!(rand_index(&mut rng, 7), 0);
    }

    #[test]
    fn rand_index_reaches_slots_past_f32_precision() {
        // 2^24 + 1 is not representable as f32; the last slot must still be drawable.
        let len = (1usize << 24) + 1;
        let mut rng = FixedRng { value: u32::MAX };
        assert_eq!(rand_index(&mut rng, len), len - 1);
    }

    #[test]
    fn rand_index_is_even_for_odd_lengths() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(3);
        let mut counts = [0usize; 3];
        let n = 30_000;
        for _ in 0..n {
            counts[rand_index(&mut rng, 3)] += 1;
        }
        for c in counts {
            let share = c as f32 / n as f32;
            assert!((share - 1.0 / 3.0).abs() < 0.02, "share {share}");
        }
    }

    #[test]
    fn next_down_handles_edge_cases() {
        assert!(next_down(1.0) < 1.0);
        assert_eq!(next_down(0.0), -f32::MIN_POSITIVE);
        assert!(next_down(-1.0) < -1.0);
        assert_eq!(next_down(f32::INFINITY), f32::MAX);
        assert_eq!(next_down(f32::NEG_INFINITY), f32::NEG_INFINITY);
        assert!(next_down(f32::NAN).is_nan());
    }
}
