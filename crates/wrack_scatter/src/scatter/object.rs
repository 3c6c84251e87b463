//! Placed debris objects and their categories.
use glam::{Quat, Vec2, Vec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::terrain::normal::surface_rotation;

/// Size/visual class of a debris object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DebrisCategory {
    Rock,
    Log,
    Towel,
    SmallDebris,
}

impl DebrisCategory {
    pub const ALL: [DebrisCategory; 4] = [
        DebrisCategory::Rock,
        DebrisCategory::Log,
        DebrisCategory::Towel,
        DebrisCategory::SmallDebris,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DebrisCategory::Rock => "rock",
            DebrisCategory::Log => "log",
            DebrisCategory::Towel => "towel",
            DebrisCategory::SmallDebris => "small_debris",
        }
    }

    /// Extent along (length, width, height) per unit of length.
    pub fn proportions(self) -> Vec3 {
        match self {
            DebrisCategory::Rock => Vec3::new(1.0, 0.8, 0.6),
            DebrisCategory::Log => Vec3::new(1.0, 0.25, 0.25),
            DebrisCategory::Towel => Vec3::new(1.0, 0.7, 0.05),
            DebrisCategory::SmallDebris => Vec3::ONE,
        }
    }

    /// Rendering extent for an object of the given length.
    pub fn extent(self, length: f32) -> Vec3 {
        self.proportions() * length
    }
}

impl std::fmt::Display for DebrisCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intensity cut points mapping a value in `[0, 1]` to a category.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CategoryThresholds {
    /// At or above: [`DebrisCategory::Rock`].
    pub rock: f32,
    /// At or above: [`DebrisCategory::Log`].
    pub log: f32,
    /// At or above: [`DebrisCategory::Towel`]; below: [`DebrisCategory::SmallDebris`].
    pub towel: f32,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            rock: 0.5,
            log: 0.2,
            towel: 0.05,
        }
    }
}

impl CategoryThresholds {
    pub fn classify(&self, intensity: f32) -> DebrisCategory {
        if intensity >= self.rock {
            DebrisCategory::Rock
        } else if intensity >= self.log {
            DebrisCategory::Log
        } else if intensity >= self.towel {
            DebrisCategory::Towel
        } else {
            DebrisCategory::SmallDebris
        }
    }

    pub fn validate(&self) -> Result<()> {
        let ordered = 0.0 <= self.towel && self.towel <= self.log && self.log <= self.rock;
        if !ordered || !self.rock.is_finite() {
            return Err(Error::invalid(
                "category thresholds must satisfy 0 <= towel <= log <= rock",
            ));
        }
        Ok(())
    }
}

/// One placed piece of debris.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DebrisObject {
    /// Position on the terrain; `z` is the surface height plus a small offset.
    pub position: Vec3,
    pub category: DebrisCategory,
    /// Radius used for overlap rejection.
    pub footprint_radius: f32,
    /// Rendering extent (length, width, height).
    pub size: Vec3,
    /// Rotation about the vertical axis in radians.
    pub spin_angle: f32,
    /// Local terrain normal when placed flush with the surface.
    pub surface_normal: Option<Vec3>,
}

impl DebrisObject {
    /// Ground-plane position.
    #[inline]
    pub fn position_2d(&self) -> Vec2 {
        self.position.truncate()
    }

    /// Spin about the vertical axis followed by the surface tilt, if any.
    pub fn orientation(&self) -> Quat {
        let spin = Quat::from_rotation_z(self.spin_angle);
        match self.surface_normal {
            Some(normal) => surface_rotation(normal) * spin,
            None => spin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(normal: Option<Vec3>) -> DebrisObject {
        DebrisObject {
            position: Vec3::new(1.0, 2.0, 3.0),
            category: DebrisCategory::Log,
            footprint_radius: 2.0,
            size: DebrisCategory::Log.extent(4.0),
            spin_angle: std::f32::consts::FRAC_PI_2,
            surface_normal: normal,
        }
    }

    #[test]
    fn thresholds_partition_intensity() {
        let t = CategoryThresholds::default();
        assert_eq!(t.classify(0.9), DebrisCategory::Rock);
        assert_eq!(t.classify(0.5), DebrisCategory::Rock);
        assert_eq!(t.classify(0.3), DebrisCategory::Log);
        assert_eq!(t.classify(0.1), DebrisCategory::Towel);
        assert_eq!(t.classify(0.0), DebrisCategory::SmallDebris);
    }

    #[test]
    fn thresholds_must_be_ordered() {
        let t = CategoryThresholds {
            rock: 0.1,
            log: 0.2,
            towel: 0.05,
        };
        assert!(t.validate().is_err());
        assert!(CategoryThresholds::default().validate().is_ok());
    }

    #[test]
    fn log_extent_is_elongated() {
        let size = DebrisCategory::Log.extent(8.0);
        assert_eq!(size, Vec3::new(8.0, 2.0, 2.0));
    }

    #[test]
    fn orientation_without_normal_is_pure_spin() {
        let o = object(None);
        let x = o.orientation() * Vec3::X;
        assert!(x.abs_diff_eq(Vec3::Y, 1e-6));
        assert_eq!(o.position_2d(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn orientation_tilts_up_axis_onto_normal() {
        let n = Vec3::new(0.2, 0.1, 1.0).normalize();
        let o = object(Some(n));
        assert!((o.orientation() * Vec3::Z).abs_diff_eq(n, 1e-5));
    }
}
