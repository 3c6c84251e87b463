//! Shoreline height field built from a linear inland rise and layered coherent value noise.
use std::fmt;

use glam::{Vec2, Vec3};
use noise::{NoiseFn, Value};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One octave of coherent noise added to the terrain.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NoiseLayer {
    /// Spatial frequency applied to world coordinates before sampling.
    pub frequency: f32,
    /// Height contributed by a noise value of 1.0.
    pub amplitude: f32,
}

impl NoiseLayer {
    pub fn new(frequency: f32, amplitude: f32) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }
}

/// Parameters of the terrain surface.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeightFieldConfig {
    /// Height change per terrain size of distance from the shoreline, positive seaward.
    ///
    /// The slope is `(y - shoreline_y) / terrain_size · slope_rise`; a negative value makes the
    /// ground rise inland instead.
    pub slope_rise: f32,
    /// Clamp the slope to zero seaward of the shoreline.
    pub flat_seaward: bool,
    /// Noise octaves, summed on top of the slope.
    pub layers: Vec<NoiseLayer>,
    /// Seed of the noise permutation tables.
    pub seed: u32,
}

impl Default for HeightFieldConfig {
    fn default() -> Self {
        Self {
            slope_rise: 20.0,
            flat_seaward: false,
            // Large-scale swells, then fine detail.
            layers: vec![NoiseLayer::new(0.005, 10.0), NoiseLayer::new(0.02, 5.0)],
            seed: 0,
        }
    }
}

impl HeightFieldConfig {
    /// Replace the noise layers.
    pub fn with_layers(mut self, layers: Vec<NoiseLayer>) -> Self {
        self.layers = layers;
        self
    }

    /// Set the slope rise.
    pub fn with_slope_rise(mut self, slope_rise: f32) -> Self {
        self.slope_rise = slope_rise;
        self
    }

    /// Flatten the slope seaward of the shoreline.
    pub fn with_flat_seaward(mut self, flat_seaward: bool) -> Self {
        self.flat_seaward = flat_seaward;
        self
    }

    /// Set the noise seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.slope_rise.is_finite() {
            return Err(Error::invalid("slope_rise must be finite"));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if !layer.frequency.is_finite() || !layer.amplitude.is_finite() {
                return Err(Error::invalid(format!(
                    "noise layer {i} must have finite frequency and amplitude"
                )));
            }
        }
        Ok(())
    }
}

/// Terrain elevation over `[0, terrain_size]²`, defined (and continuous) for all real inputs.
///
/// `height(x, y) = slope(y) + Σ amplitude · noise01(frequency · (x, y))`, where the slope is
/// linear in `(y - shoreline_y) / terrain_size`: zero on the shoreline and small near it.
#[derive(Clone)]
pub struct HeightField {
    terrain_size: f32,
    shoreline_y: f32,
    slope_rise: f32,
    flat_seaward: bool,
    layers: Vec<(NoiseLayer, Value)>,
}

impl fmt::Debug for HeightField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeightField")
            .field("terrain_size", &self.terrain_size)
            .field("shoreline_y", &self.shoreline_y)
            .field("slope_rise", &self.slope_rise)
            .field("flat_seaward", &self.flat_seaward)
            .field("layers", &self.layers.iter().map(|(l, _)| l).collect::<Vec<_>>())
            .finish()
    }
}

impl HeightField {
    pub fn new(config: &HeightFieldConfig, terrain_size: f32, shoreline_y: f32) -> Self {
        let layers = config
            .layers
            .iter()
            .enumerate()
            .map(|(i, layer)| (*layer, Value::new(config.seed.wrapping_add(i as u32))))
            .collect();

        Self {
            terrain_size,
            shoreline_y,
            slope_rise: config.slope_rise,
            flat_seaward: config.flat_seaward,
            layers,
        }
    }

    pub fn terrain_size(&self) -> f32 {
        self.terrain_size
    }

    pub fn shoreline_y(&self) -> f32 {
        self.shoreline_y
    }

    /// Linear slope term, zero on the shoreline.
    #[inline]
    pub fn slope(&self, y: f32) -> f32 {
        if self.terrain_size <= 0.0 || (self.flat_seaward && self.is_seaward(y)) {
            return 0.0;
        }
        (y - self.shoreline_y) / self.terrain_size * self.slope_rise
    }

    /// Elevation at `(x, y)`.
    pub fn height(&self, x: f32, y: f32) -> f32 {
        let mut z = self.slope(y);
        for (layer, noise) in &self.layers {
            let sample = noise.get([
                (x * layer.frequency) as f64,
                (y * layer.frequency) as f64,
            ]);
            // Value noise spans [-1, 1]; map onto [0, 1].
            let unit = (sample as f32 * 0.5 + 0.5).clamp(0.0, 1.0);
            z += unit * layer.amplitude;
        }
        z
    }

    /// Elevation at a 2D point.
    #[inline]
    pub fn height_at(&self, p: Vec2) -> f32 {
        self.height(p.x, p.y)
    }

    /// Whether `y` lies seaward of the shoreline.
    #[inline]
    pub fn is_seaward(&self, y: f32) -> bool {
        y > self.shoreline_y
    }

    /// Evaluate the field on a `(resolution + 1)²` vertex lattice covering the domain.
    pub fn bake(&self, resolution: usize) -> TerrainGrid {
        let resolution = resolution.max(1);
        let step = self.terrain_size / resolution as f32;
        let side = resolution + 1;

        let mut heights = Vec::with_capacity(side * side);
        for iy in 0..side {
            for ix in 0..side {
                heights.push(self.height(ix as f32 * step, iy as f32 * step));
            }
        }
        let seaward_rows = (0..side)
            .map(|iy| self.is_seaward(iy as f32 * step))
            .collect();

        TerrainGrid {
            resolution,
            step,
            heights,
            seaward_rows,
        }
    }
}

/// Heights pre-evaluated on a regular vertex lattice, ready for tessellation.
#[derive(Debug, Clone)]
pub struct TerrainGrid {
    resolution: usize,
    step: f32,
    heights: Vec<f32>,
    seaward_rows: Vec<bool>,
}

impl TerrainGrid {
    /// Number of quads along each side; there are `resolution + 1` vertices per side.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// World distance between neighboring vertices.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Row-major vertex heights, `y` major.
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Vertex at lattice coordinate `(ix, iy)`, or `None` outside the lattice.
    pub fn vertex(&self, ix: usize, iy: usize) -> Option<Vec3> {
        let side = self.resolution + 1;
        if ix >= side || iy >= side {
            return None;
        }
        Some(Vec3::new(
            ix as f32 * self.step,
            iy as f32 * self.step,
            self.heights[iy * side + ix],
        ))
    }

    /// Whether lattice row `iy` lies seaward of the shoreline.
    pub fn is_seaward_row(&self, iy: usize) -> bool {
        self.seaward_rows.get(iy).copied().unwrap_or(false)
    }
}
