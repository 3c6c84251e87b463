//! Footprint overlap rejection for objects of varying radius.
//!
//! A candidate `(p, r)` is clear when, for every placed `(q, s)`,
//! `|p - q| >= r + s - reduction(r)`. The reduction only applies to small candidates, letting
//! light debris pack tightly against anchors.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sampling::grid::BucketGrid;

/// Separation rules for overlap rejection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OverlapRules {
    /// Candidates with a radius at or below this receive the reduction.
    pub small_radius_threshold: f32,
    /// Distance subtracted from the required separation for small candidates.
    pub reduction: f32,
}

impl Default for OverlapRules {
    fn default() -> Self {
        Self {
            small_radius_threshold: 3.0,
            reduction: 1.5,
        }
    }
}

impl OverlapRules {
    /// Disallow any footprint overlap.
    pub fn strict() -> Self {
        Self {
            small_radius_threshold: 0.0,
            reduction: 0.0,
        }
    }

    #[inline]
    pub fn reduction_for(&self, candidate_radius: f32) -> f32 {
        if candidate_radius <= self.small_radius_threshold {
            self.reduction
        } else {
            0.0
        }
    }

    /// Minimum center distance between a candidate and an already placed object.
    #[inline]
    pub fn required_separation(&self, candidate_radius: f32, placed_radius: f32) -> f32 {
        candidate_radius + placed_radius - self.reduction_for(candidate_radius)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.small_radius_threshold >= 0.0 && self.reduction >= 0.0) {
            return Err(Error::invalid(
                "overlap threshold and reduction must be >= 0",
            ));
        }
        Ok(())
    }
}

/// How overlap candidates are found.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CollisionCheck {
    /// Compare against every placed object.
    BruteForce,
    /// Bucket grid over the domain with the given cell size.
    Grid { cell_size: f32 },
}

impl CollisionCheck {
    pub fn validate(&self) -> Result<()> {
        match *self {
            CollisionCheck::BruteForce => Ok(()),
            CollisionCheck::Grid { cell_size } if cell_size > 0.0 && cell_size.is_finite() => {
                Ok(())
            }
            CollisionCheck::Grid { .. } => Err(Error::invalid("collision cell_size must be > 0")),
        }
    }
}

/// Placed footprints with an optional grid accelerator.
#[derive(Debug, Clone)]
pub struct OverlapIndex {
    rules: OverlapRules,
    placed: Vec<(Vec2, f32)>,
    grid: Option<BucketGrid>,
    max_radius: f32,
}

impl OverlapIndex {
    /// Index comparing every candidate against every placed object.
    pub fn brute_force(rules: OverlapRules) -> Self {
        Self {
            rules,
            placed: Vec::new(),
            grid: None,
            max_radius: 0.0,
        }
    }

    /// Index accelerated by a bucket grid covering `extent`.
    pub fn with_grid(rules: OverlapRules, extent: Vec2, cell_size: f32) -> Self {
        Self {
            grid: Some(BucketGrid::new(extent, cell_size)),
            ..Self::brute_force(rules)
        }
    }

    pub fn from_check(rules: OverlapRules, check: CollisionCheck, extent: Vec2) -> Self {
        match check {
            CollisionCheck::BruteForce => Self::brute_force(rules),
            CollisionCheck::Grid { cell_size } => Self::with_grid(rules, extent, cell_size),
        }
    }

    pub fn rules(&self) -> &OverlapRules {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Whether a footprint of `radius` at `p` keeps its separation from everything placed.
    pub fn is_clear(&self, p: Vec2, radius: f32) -> bool {
        let rules = self.rules;
        let placed = &self.placed;
        let separated = |index: usize| {
            let (q, s) = placed[index];
            p.distance(q) >= rules.required_separation(radius, s)
        };

        match &self.grid {
            Some(grid) => grid.visit_within(p, radius + self.max_radius, separated),
            None => (0..placed.len()).all(separated),
        }
    }

    /// Record a footprint without checking it.
    pub fn insert(&mut self, p: Vec2, radius: f32) {
        let index = self.placed.len();
        self.placed.push((p, radius));
        self.max_radius = self.max_radius.max(radius);
        if let Some(grid) = self.grid.as_mut() {
            grid.insert(index, p);
        }
    }

    /// Insert when clear; returns whether the footprint was accepted.
    pub fn try_insert(&mut self, p: Vec2, radius: f32) -> bool {
        if self.is_clear(p, radius) {
            self.insert(p, radius);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::sampling::{rand01, rand_range};

    #[test]
    fn small_candidates_get_the_reduction() {
        let rules = OverlapRules::default();
        assert_eq!(rules.required_separation(2.0, 10.0), 10.5);
        assert_eq!(rules.required_separation(3.0, 10.0), 11.5);
        assert_eq!(rules.required_separation(3.5, 10.0), 13.5);
    }

    #[test]
    fn rejects_overlapping_footprints() {
        let mut index = OverlapIndex::brute_force(OverlapRules::strict());
        assert!(index.try_insert(Vec2::new(10.0, 10.0), 5.0));
        assert!(!index.is_clear(Vec2::new(14.0, 10.0), 2.0));
        assert!(index.is_clear(Vec2::new(17.0, 10.0), 2.0));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn small_objects_may_snug_against_anchors() {
        let mut index = OverlapIndex::brute_force(OverlapRules::default());
        index.insert(Vec2::new(50.0, 50.0), 10.0);
        // 11.0 apart: strict separation would need 12.0, reduction allows 10.5.
        assert!(index.is_clear(Vec2::new(61.0, 50.0), 2.0));
        assert!(!index.is_clear(Vec2::new(61.0, 50.0), 3.5));
    }

    #[test]
    fn grid_and_brute_force_agree() {
        let extent = Vec2::new(100.0, 100.0);
        let rules = OverlapRules::default();
        let mut brute = OverlapIndex::brute_force(rules);
        let mut grid = OverlapIndex::with_grid(rules, extent, 6.0);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..2_000 {
            let p = Vec2::new(rand01(&mut rng) * 100.0, rand01(&mut rng) * 100.0);
            let r = rand_range(&mut rng, 1.0, 9.0);
            let a = brute.try_insert(p, r);
            let b = grid.try_insert(p, r);
            assert_eq!(a, b);
        }
        assert!(brute.len() > 10);
        assert_eq!(brute.len(), grid.len());
    }

    #[test]
    fn collision_check_validation() {
        assert!(CollisionCheck::BruteForce.validate().is_ok());
        assert!(CollisionCheck::Grid { cell_size: 4.0 }.validate().is_ok());
        assert!(CollisionCheck::Grid { cell_size: 0.0 }.validate().is_err());
    }
}
