//! Independent uniform candidates, the raw input of the per-candidate power-law strategy.
use mint::Vector2;
use rand::Rng as RngCore;

use crate::sampling::{next_down, rand01, PositionSampling};

/// `count` i.i.d. points over `[0, w) × [0, h)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformRandomSampling {
    pub count: usize,
}

impl UniformRandomSampling {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

impl PositionSampling for UniformRandomSampling {
    fn generate(&self, domain_extent: Vector2<f32>, rng: &mut dyn RngCore) -> Vec<Vector2<f32>> {
        let Vector2 { x: w, y: h } = domain_extent;
        if self.count == 0 || !(w > 0.0 && h > 0.0) {
            return Vec::new();
        }

        // rand01 < 1, but `u * w` can still round up to `w`.
        let (x_max, y_max) = (next_down(w), next_down(h));
        (0..self.count)
            .map(|_| Vector2 {
                x: (rand01(rng) * w).min(x_max),
                y: (rand01(rng) * h).min(y_max),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn degenerate_inputs_yield_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let sampler = UniformRandomSampling::new(10);

        for extent in [Vec2::new(0.0, 800.0), Vec2::new(800.0, -1.0), Vec2::NAN] {
            assert!(sampler.generate(extent.into(), &mut rng).is_empty());
        }
        assert!(sampler
            .with_count(0)
            .generate(Vec2::splat(800.0).into(), &mut rng)
            .is_empty());
    }

    #[test]
    fn candidates_cover_the_terrain_evenly() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 20_000;
        let pts = UniformRandomSampling::new(n).generate(Vec2::splat(800.0).into(), &mut rng);
        assert_eq!(pts.len(), n);

        let mut quadrants = [0usize; 4];
        for p in &pts {
            assert!((0.0..800.0).contains(&p.x) && (0.0..800.0).contains(&p.y));
            quadrants[(p.x >= 400.0) as usize + 2 * (p.y >= 400.0) as usize] += 1;
        }
        for q in quadrants {
            let share = q as f32 / n as f32;
            assert!((share - 0.25).abs() < 0.02, "quadrant share {share}");
        }
    }

    #[test]
    fn seed_determines_candidates() {
        let sampler = UniformRandomSampling::new(32);
        let extent: Vector2<f32> = Vec2::new(800.0, 720.0).into();

        let a = sampler.generate(extent, &mut StdRng::seed_from_u64(123));
        let b = sampler.generate(extent, &mut StdRng::seed_from_u64(123));
        let c = sampler.generate(extent, &mut StdRng::seed_from_u64(456));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
