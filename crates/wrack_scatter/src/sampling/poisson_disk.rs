//! Poisson disk position sampling strategy (Bridson's algorithm).
use glam::Vec2;
use mint::Vector2;
use rand::Rng as RngCore;

use crate::sampling::grid::SingleSlotGrid;
use crate::sampling::{next_down, rand01, rand_angle, rand_index, rand_range, PositionSampling};

/// Default number of annulus candidates tried around an active sample before retiring it.
pub const DEFAULT_MAX_ATTEMPTS: usize = 30;

/// Poisson disk sampling strategy.
///
/// Produces a maximal point set over `[0, w) × [0, h)` in which no two points are closer
/// than `radius`.
#[derive(Debug, Clone)]
pub struct PoissonDiskSampling {
    /// Minimum distance between samples in world units.
    pub radius: f32,
    /// Candidates tried around each active sample before it is retired.
    pub max_attempts: usize,
}

impl PositionSampling for PoissonDiskSampling {
    fn generate(&self, domain_extent: Vector2<f32>, rng: &mut dyn RngCore) -> Vec<Vector2<f32>> {
        self.sample_points(Vec2::from(domain_extent), rng)
            .into_iter()
            .map(Into::into)
            .collect()
    }
}

impl PoissonDiskSampling {
    /// Create a new PoissonDiskSampling with specified radius.
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Set the per-sample attempt cap (builder-style).
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sample the domain `[0, extent.x) × [0, extent.y)`.
    ///
    /// Returns an empty set for a non-positive radius or extent.
    pub fn sample_points(&self, extent: Vec2, rng: &mut dyn RngCore) -> Vec<Vec2> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Vec::new();
        }
        if !extent.is_finite() || extent.x <= 0.0 || extent.y <= 0.0 {
            return Vec::new();
        }

        PoissonDiskSampler::new(self.radius, self.max_attempts, extent).generate(rng)
    }
}

struct PoissonDiskSampler {
    radius: f32,
    radius_squared: f32,
    max_attempts: usize,
    bounds: Vec2,
    grid: SingleSlotGrid,
    samples: Vec<Vec2>,
    active: Vec<usize>,
}

impl PoissonDiskSampler {
    fn new(radius: f32, max_attempts: usize, bounds: Vec2) -> Self {
        debug_assert!(radius > 0.0);
        Self {
            radius,
            radius_squared: radius * radius,
            max_attempts,
            bounds,
            grid: SingleSlotGrid::for_min_distance(bounds, radius),
            samples: Vec::new(),
            active: Vec::new(),
        }
    }

    fn in_domain(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x < self.bounds.x && point.y >= 0.0 && point.y < self.bounds.y
    }

    fn is_valid_point(&self, point: Vec2) -> bool {
        if !self.in_domain(point) {
            return false;
        }

        let samples = &self.samples;
        let radius_squared = self.radius_squared;
        self.grid.visit_within(point, self.radius, |index| {
            samples[index].distance_squared(point) >= radius_squared
        })
    }

    fn add_point(&mut self, point: Vec2) {
        let index = self.samples.len();
        self.samples.push(point);
        self.grid.insert(index, point);
        self.active.push(index);
    }

    fn generate_around_point(&self, rng: &mut dyn RngCore, point: Vec2) -> Option<Vec2> {
        for _ in 0..self.max_attempts {
            let angle = rand_angle(rng);
            let distance = rand_range(rng, self.radius, 2.0 * self.radius);
            let candidate = point + Vec2::from_angle(angle) * distance;

            if self.is_valid_point(candidate) {
                return Some(candidate);
            }
        }

        None
    }

    fn generate(mut self, rng: &mut dyn RngCore) -> Vec<Vec2> {
        let initial = Vec2::new(
            (rand01(rng) * self.bounds.x).min(next_down(self.bounds.x)),
            (rand01(rng) * self.bounds.y).min(next_down(self.bounds.y)),
        );
        self.add_point(initial);

        while !self.active.is_empty() {
            let slot = rand_index(rng, self.active.len());
            let origin = self.samples[self.active[slot]];

            match self.generate_around_point(rng, origin) {
                Some(p) => self.add_point(p),
                None => {
                    self.active.swap_remove(slot);
                }
            }
        }

        self.samples
    }
}
