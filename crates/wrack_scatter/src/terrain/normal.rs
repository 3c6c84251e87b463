//! Surface normals of a [`HeightField`] by central differences.
use glam::{Quat, Vec3};

use crate::terrain::height::HeightField;

/// Default finite-difference step in world units.
pub const DEFAULT_NORMAL_EPSILON: f32 = 1.0;

/// Normal view over a height field.
#[derive(Debug, Clone, Copy)]
pub struct NormalField<'a> {
    field: &'a HeightField,
    epsilon: f32,
}

impl<'a> NormalField<'a> {
    pub fn new(field: &'a HeightField, epsilon: f32) -> Self {
        Self { field, epsilon }
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Unit surface normal at `(x, y)`, pointing towards +Z.
    ///
    /// Falls back to [`Vec3::Z`] when the tangent cross product degenerates.
    pub fn normal(&self, x: f32, y: f32) -> Vec3 {
        let e = self.epsilon;
        let dx = self.field.height(x + e, y) - self.field.height(x - e, y);
        let dy = self.field.height(x, y + e) - self.field.height(x, y - e);

        let tangent_x = Vec3::new(2.0 * e, 0.0, dx);
        let tangent_y = Vec3::new(0.0, 2.0 * e, dy);
        tangent_x
            .cross(tangent_y)
            .try_normalize()
            .unwrap_or(Vec3::Z)
    }
}

/// Rotation taking the vertical axis onto `normal`, used to tilt objects flush with the ground.
pub fn surface_rotation(normal: Vec3) -> Quat {
    match normal.try_normalize() {
        Some(n) => Quat::from_rotation_arc(Vec3::Z, n),
        None => Quat::IDENTITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::height::{HeightFieldConfig, NoiseLayer};

    fn flat() -> HeightField {
        let config = HeightFieldConfig::default()
            .with_layers(Vec::new())
            .with_slope_rise(0.0);
        HeightField::new(&config, 100.0, 50.0)
    }

    #[test]
    fn flat_terrain_points_straight_up() {
        let field = flat();
        let normals = NormalField::new(&field, 1.0);
        assert_eq!(normals.normal(10.0, 20.0), Vec3::Z);
    }

    #[test]
    fn zero_epsilon_falls_back_to_vertical() {
        let field = HeightField::new(&HeightFieldConfig::default(), 800.0, 720.0);
        let normals = NormalField::new(&field, 0.0);
        let n = normals.normal(123.0, 456.0);
        assert_eq!(n, Vec3::Z);
        assert!(n.is_finite());
    }

    #[test]
    fn slope_tilts_normal_against_its_gradient() {
        // Only the slope: height grows with y.
        let config = HeightFieldConfig::default()
            .with_layers(Vec::new())
            .with_slope_rise(100.0);
        let field = HeightField::new(&config, 100.0, 90.0);
        let normals = NormalField::new(&field, 0.5);
        let inland = normals.normal(50.0, 40.0);
        let seaward = normals.normal(50.0, 95.0);

        assert!((inland.length() - 1.0).abs() < 1e-5);
        assert!(inland.z > 0.0);
        assert!(inland.y < 0.0);
        assert!(inland.x.abs() < 1e-6);
        // No kink at the shoreline.
        assert!((seaward - inland).length() < 1e-5);
    }

    #[test]
    fn seaward_normals_follow_the_slope() {
        let config = HeightFieldConfig::default().with_layers(Vec::new());
        let field = HeightField::new(&config, 800.0, 720.0);
        let n = NormalField::new(&field, 1.0).normal(0.0, 760.0);
        assert_ne!(n, Vec3::Z);
        assert!(n.y < 0.0);
    }

    #[test]
    fn normals_are_unit_and_repeatable() {
        let config = HeightFieldConfig::default()
            .with_layers(vec![NoiseLayer::new(0.05, 8.0), NoiseLayer::new(0.2, 2.0)]);
        let field = HeightField::new(&config, 200.0, 180.0);
        let normals = NormalField::new(&field, 1.0);
        for i in 0..20 {
            let (x, y) = (i as f32 * 9.7, i as f32 * 8.3);
            let n = normals.normal(x, y);
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(n.z > 0.0);
            assert_eq!(n, normals.normal(x, y));
        }
    }

    #[test]
    fn surface_rotation_maps_up_onto_normal() {
        let n = Vec3::new(0.3, -0.2, 0.9).normalize();
        let rotated = surface_rotation(n) * Vec3::Z;
        assert!(rotated.abs_diff_eq(n, 1e-5));
        assert_eq!(surface_rotation(Vec3::ZERO), Quat::IDENTITY);
    }
}
