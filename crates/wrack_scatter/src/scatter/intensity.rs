//! Shoreline acceptance gradient and power-law intensity shaping.
//!
//! The same two primitives drive every strategy at two scales: at the macro scale they decide
//! which cluster centers survive and how large and populous each cluster is, at the micro scale
//! they size individual objects. Callers map an intensity onto concrete quantities through
//! [`ValueRange::lerp`].
use glam::Vec2;
use rand::Rng as RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sampling::rand01;

/// Closed scalar interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Degenerate range holding a single value.
    pub const fn fixed(value: f32) -> Self {
        Self::new(value, value)
    }

    /// Linear interpolation; `t` is clamped to `[0, 1]`.
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + (self.max - self.min) * t.clamp(0.0, 1.0)
    }

    /// Position of `value` inside the range, clamped to `[0, 1]`.
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    /// Uniform draw from the range.
    pub fn sample(&self, rng: &mut dyn RngCore) -> f32 {
        self.lerp(rand01(rng))
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(Error::invalid(format!("{name} must be finite")));
        }
        if self.min > self.max {
            return Err(Error::invalid(format!(
                "{name} is inverted: min {} > max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn validate_positive(&self, name: &str) -> Result<()> {
        self.validate(name)?;
        if self.min <= 0.0 {
            return Err(Error::invalid(format!("{name} must be > 0")));
        }
        Ok(())
    }
}

/// Power-law shaping `u ↦ u^exponent`, skewing uniform draws towards zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PowerLaw {
    pub exponent: f32,
}

impl PowerLaw {
    pub const fn new(exponent: f32) -> Self {
        Self { exponent }
    }

    #[inline]
    pub fn transform(&self, u: f32) -> f32 {
        u.clamp(0.0, 1.0).powf(self.exponent)
    }

    pub fn sample(&self, rng: &mut dyn RngCore) -> f32 {
        self.transform(rand01(rng))
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        if !self.exponent.is_finite() || self.exponent <= 0.0 {
            return Err(Error::invalid(format!("{name} exponent must be > 0")));
        }
        Ok(())
    }
}

/// Acceptance probability falling off linearly with distance from the shoreline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShorelineGradient {
    /// Distance, as a fraction of the terrain size, at which the probability bottoms out.
    pub falloff_fraction: f32,
    /// Probability at the shoreline.
    pub near_probability: f32,
    /// Probability at and beyond the falloff distance.
    pub far_probability: f32,
}

impl Default for ShorelineGradient {
    fn default() -> Self {
        Self {
            falloff_fraction: 0.85,
            near_probability: 1.0,
            far_probability: 0.2,
        }
    }
}

impl ShorelineGradient {
    pub fn validate(&self) -> Result<()> {
        if !self.falloff_fraction.is_finite() || self.falloff_fraction <= 0.0 {
            return Err(Error::invalid("gradient falloff_fraction must be > 0"));
        }
        let unit = 0.0..=1.0;
        if !unit.contains(&self.near_probability) || !unit.contains(&self.far_probability) {
            return Err(Error::invalid("gradient probabilities must lie in [0, 1]"));
        }
        Ok(())
    }
}

/// Ephemeral parent point of a Matérn-style cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterCenter {
    pub center: Vec2,
    /// Power-law intensity in `[0, 1]`.
    pub intensity: f32,
    pub radius: f32,
    pub member_count: usize,
}

impl ClusterCenter {
    /// Derive radius and member count by interpolating `intensity` into the given ranges.
    pub fn from_intensity(
        center: Vec2,
        intensity: f32,
        radius: ValueRange,
        member_count: ValueRange,
    ) -> Self {
        Self {
            center,
            intensity,
            radius: radius.lerp(intensity),
            member_count: member_count.lerp(intensity).round().max(0.0) as usize,
        }
    }
}

/// Shoreline-distance acceptance and power-law intensity for one terrain.
#[derive(Debug, Clone, Copy)]
pub struct ClusterIntensityModel {
    terrain_size: f32,
    shoreline_y: f32,
    gradient: ShorelineGradient,
}

impl ClusterIntensityModel {
    pub fn new(terrain_size: f32, shoreline_y: f32, gradient: ShorelineGradient) -> Self {
        Self {
            terrain_size,
            shoreline_y,
            gradient,
        }
    }

    pub fn gradient(&self) -> &ShorelineGradient {
        &self.gradient
    }

    #[inline]
    pub fn shoreline_distance(&self, p: Vec2) -> f32 {
        (self.shoreline_y - p.y).abs()
    }

    /// Clamped linear map of shoreline distance `[0, falloff]` onto `[near, far]` probability.
    pub fn acceptance_probability(&self, p: Vec2) -> f32 {
        let falloff = self.gradient.falloff_fraction * self.terrain_size;
        let t = if falloff > 0.0 {
            (self.shoreline_distance(p) / falloff).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let g = &self.gradient;
        g.near_probability + (g.far_probability - g.near_probability) * t
    }

    /// Bernoulli trial with [`Self::acceptance_probability`]; returns the probability used.
    pub fn accept(&self, p: Vec2, rng: &mut dyn RngCore) -> (bool, f32) {
        let probability = self.acceptance_probability(p);
        (rand01(rng) < probability, probability)
    }

    /// Power-law intensity of a uniform draw `u`.
    #[inline]
    pub fn intensity(&self, law: PowerLaw, u: f32) -> f32 {
        law.transform(u)
    }

    /// Draw a fresh intensity.
    pub fn draw_intensity(&self, law: PowerLaw, rng: &mut dyn RngCore) -> f32 {
        self.intensity(law, rand01(rng))
    }
}
