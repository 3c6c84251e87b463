//! Inset placement bounds.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Closed axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Whether `p` lies inside, edges included.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn is_empty(&self) -> bool {
        !(self.min.x < self.max.x && self.min.y < self.max.y)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Margins shrinking the square terrain domain to the area objects may occupy.
///
/// Resolves to `[min_margin, size - max_x_margin] × [min_margin, max_y_fraction · size]`; the
/// upper `y` bound is a cutoff relative to the seaward edge of the domain.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InsetBounds {
    pub min_margin: f32,
    pub max_x_margin: f32,
    pub max_y_fraction: f32,
}

impl InsetBounds {
    pub fn new(min_margin: f32, max_x_margin: f32, max_y_fraction: f32) -> Self {
        Self {
            min_margin,
            max_x_margin,
            max_y_fraction,
        }
    }

    pub fn resolve(&self, terrain_size: f32) -> Rect {
        Rect::new(
            Vec2::splat(self.min_margin),
            Vec2::new(
                terrain_size - self.max_x_margin,
                terrain_size * self.max_y_fraction,
            ),
        )
    }

    pub fn validate(&self, terrain_size: f32, context: &str) -> Result<()> {
        if self.min_margin < 0.0 || self.max_x_margin < 0.0 || self.max_y_fraction <= 0.0 {
            return Err(Error::invalid(format!(
                "{context}: inset margins must be >= 0 and max_y_fraction > 0"
            )));
        }
        if self.resolve(terrain_size).is_empty() {
            return Err(Error::invalid(format!(
                "{context}: inset bounds leave no placement area"
            )));
        }
        Ok(())
    }
}
