//! Configuration for a generation pass.
//!
//! Every tunable constant of the terrain and of each strategy lives here. Defaults reproduce
//! the reference wrack-line setup: an 800 × 800 domain with the shoreline at `y = 720`.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sampling::poisson_disk::DEFAULT_MAX_ATTEMPTS;
use crate::scatter::bounds::InsetBounds;
use crate::scatter::intensity::{PowerLaw, ShorelineGradient, ValueRange};
use crate::scatter::object::CategoryThresholds;
use crate::scatter::overlap::{CollisionCheck, OverlapRules};
use crate::scatter::DEFAULT_SURFACE_OFFSET;
use crate::terrain::height::HeightFieldConfig;
use crate::terrain::normal::DEFAULT_NORMAL_EPSILON;

/// Largest member count a single cluster may be configured to hold.
pub const MAX_CLUSTER_MEMBERS: usize = 1 << 20;

/// Largest number of towels snagged around one anchor.
pub const MAX_TOWELS_PER_ANCHOR: usize = 1 << 10;

/// Largest number of cells an overlap grid may allocate.
pub const MAX_GRID_CELLS: usize = 1 << 24;

fn validate_grid_cells(terrain_size: f32, cell_size: f32, name: &str) -> Result<()> {
    let side = (terrain_size / cell_size).ceil();
    if side * side > MAX_GRID_CELLS as f32 {
        return Err(Error::invalid(format!(
            "{name} {cell_size} needs {side}² cells over terrain {terrain_size} (max {MAX_GRID_CELLS})"
        )));
    }
    Ok(())
}

/// Independent acceptance of uniform candidates, power-law sized.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PowerLawConfig {
    pub candidate_count: usize,
    pub size_law: PowerLaw,
    /// Object length interpolated by the size intensity.
    pub length: ValueRange,
    pub bounds: InsetBounds,
}

impl Default for PowerLawConfig {
    fn default() -> Self {
        Self {
            candidate_count: 20_000,
            size_law: PowerLaw::new(5.0),
            length: ValueRange::new(1.0, 20.0),
            bounds: InsetBounds::new(5.0, 5.0, 0.85),
        }
    }
}

impl PowerLawConfig {
    fn validate(&self, terrain_size: f32) -> Result<()> {
        self.size_law.validate("power_law.size_law")?;
        self.length.validate_positive("power_law.length")?;
        self.bounds.validate(terrain_size, "power_law.bounds")
    }
}

/// Fixed-radius, fixed-population clusters around shoreline-weighted centers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaternConfig {
    pub center_count: usize,
    pub radius: f32,
    pub member_count: usize,
    /// Object length drawn uniformly.
    pub length: ValueRange,
    pub bounds: InsetBounds,
}

impl Default for MaternConfig {
    fn default() -> Self {
        Self {
            center_count: 150,
            radius: 40.0,
            member_count: 30,
            length: ValueRange::new(2.0, 8.0),
            bounds: InsetBounds::new(5.0, 5.0, 0.95),
        }
    }
}

impl MaternConfig {
    fn validate(&self, terrain_size: f32) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::invalid("matern.radius must be > 0"));
        }
        if self.member_count > MAX_CLUSTER_MEMBERS {
            return Err(Error::invalid(format!(
                "matern.member_count must be <= {MAX_CLUSTER_MEMBERS}"
            )));
        }
        self.length.validate_positive("matern.length")?;
        self.bounds.validate(terrain_size, "matern.bounds")
    }
}

/// Clusters whose extent and population follow a power law, members sized by a second one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HybridConfig {
    pub center_count: usize,
    pub cluster_law: PowerLaw,
    pub radius: ValueRange,
    pub member_count: ValueRange,
    pub size_law: PowerLaw,
    pub length: ValueRange,
    pub bounds: InsetBounds,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            center_count: 400,
            cluster_law: PowerLaw::new(4.0),
            radius: ValueRange::new(20.0, 100.0),
            member_count: ValueRange::new(10.0, 400.0),
            size_law: PowerLaw::new(5.0),
            length: ValueRange::new(1.0, 16.0),
            bounds: InsetBounds::new(5.0, 15.0, 0.91),
        }
    }
}

impl HybridConfig {
    fn validate(&self, terrain_size: f32) -> Result<()> {
        self.cluster_law.validate("hybrid.cluster_law")?;
        self.size_law.validate("hybrid.size_law")?;
        self.radius.validate_positive("hybrid.radius")?;
        self.member_count.validate("hybrid.member_count")?;
        if self.member_count.min < 0.0 {
            return Err(Error::invalid("hybrid.member_count must be >= 0"));
        }
        if self.member_count.max > MAX_CLUSTER_MEMBERS as f32 {
            return Err(Error::invalid(format!(
                "hybrid.member_count must be <= {MAX_CLUSTER_MEMBERS}"
            )));
        }
        self.length.validate_positive("hybrid.length")?;
        self.bounds.validate(terrain_size, "hybrid.bounds")
    }
}

/// Rocks, then channel-weighted logs, then towels snagged around rocks, with overlap rejection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CategorizedConfig {
    pub rock_count: usize,
    pub rock_attempts: usize,
    pub rock_radius: ValueRange,
    pub log_count: usize,
    pub log_attempts: usize,
    pub log_radius: ValueRange,
    /// Half-width of the flow channel as a fraction of the terrain size.
    pub channel_half_width: f32,
    /// Lowest log probability far from the channel.
    pub channel_floor: f32,
    /// Also weight log placement by the shoreline gradient.
    pub logs_follow_shoreline: bool,
    pub towels_per_rock_min: usize,
    pub towels_per_rock_max: usize,
    pub towel_radius: ValueRange,
    pub towel_attempts: usize,
    /// How far beyond a rock's rim towels may land.
    pub snag_distance: f32,
    pub overlap: OverlapRules,
    pub collision: CollisionCheck,
    pub bounds: InsetBounds,
}

impl Default for CategorizedConfig {
    fn default() -> Self {
        Self {
            rock_count: 40,
            rock_attempts: 4_000,
            rock_radius: ValueRange::new(8.0, 16.0),
            log_count: 60,
            log_attempts: 6_000,
            log_radius: ValueRange::new(5.0, 10.0),
            channel_half_width: 0.5,
            channel_floor: 0.1,
            logs_follow_shoreline: true,
            towels_per_rock_min: 2,
            towels_per_rock_max: 5,
            towel_radius: ValueRange::new(2.0, 3.0),
            towel_attempts: 10,
            snag_distance: 8.0,
            overlap: OverlapRules::default(),
            collision: CollisionCheck::BruteForce,
            bounds: InsetBounds::new(10.0, 10.0, 0.95),
        }
    }
}

impl CategorizedConfig {
    fn validate(&self, terrain_size: f32) -> Result<()> {
        self.rock_radius.validate_positive("categorized.rock_radius")?;
        self.log_radius.validate_positive("categorized.log_radius")?;
        self.towel_radius.validate_positive("categorized.towel_radius")?;
        if self.rock_count > 0 && self.rock_attempts == 0 {
            return Err(Error::invalid("categorized.rock_attempts must be > 0"));
        }
        if self.log_count > 0 && self.log_attempts == 0 {
            return Err(Error::invalid("categorized.log_attempts must be > 0"));
        }
        if self.towels_per_rock_max > 0 && self.towel_attempts == 0 {
            return Err(Error::invalid("categorized.towel_attempts must be > 0"));
        }
        if self.towels_per_rock_max > MAX_TOWELS_PER_ANCHOR {
            return Err(Error::invalid(format!(
                "categorized.towels_per_rock_max must be <= {MAX_TOWELS_PER_ANCHOR}"
            )));
        }
        if self.towels_per_rock_min > self.towels_per_rock_max {
            return Err(Error::invalid(
                "categorized.towels_per_rock_min must be <= towels_per_rock_max",
            ));
        }
        if !(self.channel_half_width > 0.0) {
            return Err(Error::invalid("categorized.channel_half_width must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.channel_floor) {
            return Err(Error::invalid("categorized.channel_floor must lie in [0, 1]"));
        }
        if !(self.snag_distance >= 0.0) {
            return Err(Error::invalid("categorized.snag_distance must be >= 0"));
        }
        self.overlap.validate()?;
        self.collision.validate()?;
        if let CollisionCheck::Grid { cell_size } = self.collision {
            validate_grid_cells(terrain_size, cell_size, "categorized.collision cell_size")?;
        }
        self.bounds.validate(terrain_size, "categorized.bounds")
    }
}

/// Blue-noise point set emitted as small debris.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlueNoiseConfig {
    pub min_distance: f32,
    pub max_attempts: usize,
    /// Limit sampling to `y < shoreline_y · fraction`; `None` samples the whole domain.
    pub shoreline_fraction: Option<f32>,
    pub length: ValueRange,
}

impl Default for BlueNoiseConfig {
    fn default() -> Self {
        Self {
            min_distance: 10.0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            shoreline_fraction: Some(0.85),
            length: ValueRange::new(0.5, 2.0),
        }
    }
}

impl BlueNoiseConfig {
    /// Sampled extent for a terrain.
    pub fn extent(&self, terrain_size: f32, shoreline_y: f32) -> Vec2 {
        match self.shoreline_fraction {
            Some(fraction) => Vec2::new(terrain_size, (shoreline_y * fraction).min(terrain_size)),
            None => Vec2::splat(terrain_size),
        }
    }

    fn validate(&self, terrain_size: f32, shoreline_y: f32) -> Result<()> {
        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err(Error::invalid("blue_noise.min_distance must be > 0"));
        }
        if self.max_attempts == 0 {
            return Err(Error::invalid("blue_noise.max_attempts must be >= 1"));
        }
        if let Some(fraction) = self.shoreline_fraction {
            if !(fraction > 0.0) {
                return Err(Error::invalid("blue_noise.shoreline_fraction must be > 0"));
            }
        }
        let extent = self.extent(terrain_size, shoreline_y);
        if extent.x <= 0.0 || extent.y <= 0.0 {
            return Err(Error::invalid("blue_noise sampling extent is empty"));
        }
        self.length.validate_positive("blue_noise.length")
    }
}

/// Towels snagged around large anchors of an already generated field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SnagConfig {
    /// Objects with at least this footprint radius act as anchors.
    pub anchor_min_radius: f32,
    pub towels_per_anchor_min: usize,
    pub towels_per_anchor_max: usize,
    pub towel_radius: ValueRange,
    pub attempts_per_towel: usize,
    pub snag_distance: f32,
    pub overlap: OverlapRules,
    /// Cell size of the overlap grid built over the existing field.
    pub grid_cell_size: f32,
    pub bounds: InsetBounds,
}

impl Default for SnagConfig {
    fn default() -> Self {
        Self {
            anchor_min_radius: 4.0,
            towels_per_anchor_min: 2,
            towels_per_anchor_max: 5,
            towel_radius: ValueRange::new(1.5, 3.0),
            attempts_per_towel: 8,
            snag_distance: 6.0,
            overlap: OverlapRules::default(),
            grid_cell_size: 8.0,
            bounds: InsetBounds::new(5.0, 15.0, 0.91),
        }
    }
}

impl SnagConfig {
    fn validate(&self, terrain_size: f32) -> Result<()> {
        if !(self.anchor_min_radius >= 0.0) {
            return Err(Error::invalid("snagging.anchor_min_radius must be >= 0"));
        }
        if self.towels_per_anchor_max > MAX_TOWELS_PER_ANCHOR {
            return Err(Error::invalid(format!(
                "snagging.towels_per_anchor_max must be <= {MAX_TOWELS_PER_ANCHOR}"
            )));
        }
        if self.towels_per_anchor_min > self.towels_per_anchor_max {
            return Err(Error::invalid(
                "snagging.towels_per_anchor_min must be <= towels_per_anchor_max",
            ));
        }
        if self.towels_per_anchor_max > 0 && self.attempts_per_towel == 0 {
            return Err(Error::invalid("snagging.attempts_per_towel must be > 0"));
        }
        if !(self.snag_distance >= 0.0) {
            return Err(Error::invalid("snagging.snag_distance must be >= 0"));
        }
        if !(self.grid_cell_size > 0.0) {
            return Err(Error::invalid("snagging.grid_cell_size must be > 0"));
        }
        validate_grid_cells(terrain_size, self.grid_cell_size, "snagging.grid_cell_size")?;
        self.towel_radius.validate_positive("snagging.towel_radius")?;
        self.overlap.validate()?;
        self.bounds.validate(terrain_size, "snagging.bounds")
    }
}

/// Full configuration of a generation pass.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationConfig {
    /// Side length of the square terrain domain `[0, size]²`.
    pub terrain_size: f32,
    /// Shoreline reference; larger `y` is seaward.
    pub shoreline_y: f32,
    pub terrain: HeightFieldConfig,
    /// Finite-difference step for surface normals.
    pub normal_epsilon: f32,
    /// Height of placed objects above the surface.
    pub surface_offset: f32,
    /// Record surface normals so objects can be tilted flush with the terrain.
    pub conform_to_surface: bool,
    pub gradient: ShorelineGradient,
    pub thresholds: CategoryThresholds,
    pub power_law: PowerLawConfig,
    pub matern: MaternConfig,
    pub hybrid: HybridConfig,
    pub categorized: CategorizedConfig,
    pub blue_noise: BlueNoiseConfig,
    /// Optional post-process snagging towels around large objects.
    pub snagging: Option<SnagConfig>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(800.0)
    }
}

impl GenerationConfig {
    /// Reference configuration for a domain of `terrain_size`, shoreline at 90% depth.
    pub fn new(terrain_size: f32) -> Self {
        Self {
            terrain_size,
            shoreline_y: terrain_size * 0.9,
            terrain: HeightFieldConfig::default(),
            normal_epsilon: DEFAULT_NORMAL_EPSILON,
            surface_offset: DEFAULT_SURFACE_OFFSET,
            conform_to_surface: true,
            gradient: ShorelineGradient::default(),
            thresholds: CategoryThresholds::default(),
            power_law: PowerLawConfig::default(),
            matern: MaternConfig::default(),
            hybrid: HybridConfig::default(),
            categorized: CategorizedConfig::default(),
            blue_noise: BlueNoiseConfig::default(),
            snagging: None,
        }
    }

    pub fn with_shoreline_y(mut self, shoreline_y: f32) -> Self {
        self.shoreline_y = shoreline_y;
        self
    }

    pub fn with_terrain(mut self, terrain: HeightFieldConfig) -> Self {
        self.terrain = terrain;
        self
    }

    pub fn with_noise_seed(mut self, seed: u32) -> Self {
        self.terrain.seed = seed;
        self
    }

    pub fn with_normal_epsilon(mut self, normal_epsilon: f32) -> Self {
        self.normal_epsilon = normal_epsilon;
        self
    }

    pub fn with_surface_offset(mut self, surface_offset: f32) -> Self {
        self.surface_offset = surface_offset;
        self
    }

    pub fn with_conform_to_surface(mut self, conform: bool) -> Self {
        self.conform_to_surface = conform;
        self
    }

    pub fn with_gradient(mut self, gradient: ShorelineGradient) -> Self {
        self.gradient = gradient;
        self
    }

    pub fn with_thresholds(mut self, thresholds: CategoryThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_power_law(mut self, power_law: PowerLawConfig) -> Self {
        self.power_law = power_law;
        self
    }

    pub fn with_matern(mut self, matern: MaternConfig) -> Self {
        self.matern = matern;
        self
    }

    pub fn with_hybrid(mut self, hybrid: HybridConfig) -> Self {
        self.hybrid = hybrid;
        self
    }

    pub fn with_categorized(mut self, categorized: CategorizedConfig) -> Self {
        self.categorized = categorized;
        self
    }

    pub fn with_blue_noise(mut self, blue_noise: BlueNoiseConfig) -> Self {
        self.blue_noise = blue_noise;
        self
    }

    pub fn with_snagging(mut self, snagging: Option<SnagConfig>) -> Self {
        self.snagging = snagging;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.terrain_size.is_finite() || self.terrain_size <= 0.0 {
            return Err(Error::invalid("terrain_size must be > 0"));
        }
        if !self.shoreline_y.is_finite() {
            return Err(Error::invalid("shoreline_y must be finite"));
        }
        if !self.normal_epsilon.is_finite() || self.normal_epsilon <= 0.0 {
            return Err(Error::invalid("normal_epsilon must be > 0"));
        }
        if !self.surface_offset.is_finite() {
            return Err(Error::invalid("surface_offset must be finite"));
        }
        self.terrain.validate()?;
        self.gradient.validate()?;
        self.thresholds.validate()?;
        self.power_law.validate(self.terrain_size)?;
        self.matern.validate(self.terrain_size)?;
        self.hybrid.validate(self.terrain_size)?;
        self.categorized.validate(self.terrain_size)?;
        self.blue_noise
            .validate(self.terrain_size, self.shoreline_y)?;
        if let Some(snagging) = &self.snagging {
            snagging.validate(self.terrain_size)?;
        }
        Ok(())
    }
}
