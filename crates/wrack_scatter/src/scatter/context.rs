//! Generation entry points: the strategy selector, the owning context and run results.
use std::collections::HashMap;
use std::fmt;

use rand::Rng as RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::scatter::config::GenerationConfig;
use crate::scatter::events::EventSink;
use crate::scatter::intensity::ClusterIntensityModel;
use crate::scatter::object::{DebrisCategory, DebrisObject};
use crate::scatter::strategy::run_pass;
use crate::terrain::height::HeightField;
use crate::terrain::normal::NormalField;

/// Placement strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// Per-candidate shoreline trial with power-law sizes.
    PowerLaw,
    /// Fixed-radius, fixed-count clusters with uniform sizes.
    Matern,
    /// Power-law clusters filled with power-law sized debris.
    #[default]
    Hybrid,
    /// Rocks, channel-weighted logs and snagged towels with overlap rejection.
    Categorized,
    /// Poisson-disk small debris.
    BlueNoise,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::PowerLaw,
        Strategy::Matern,
        Strategy::Hybrid,
        Strategy::Categorized,
        Strategy::BlueNoise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::PowerLaw => "power_law",
            Strategy::Matern => "matern",
            Strategy::Hybrid => "hybrid",
            Strategy::Categorized => "categorized",
            Strategy::BlueNoise => "blue_noise",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one generation pass.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct GenerationResult {
    /// Placed objects in placement order.
    pub objects: Vec<DebrisObject>,
    /// Total candidate positions considered.
    pub candidates_evaluated: usize,
    /// Candidates discarded by an acceptance trial, bounds or overlap check.
    pub candidates_rejected: usize,
    pub clusters_accepted: usize,
    pub clusters_rejected: usize,
}

impl GenerationResult {
    /// Creates a new empty [`GenerationResult`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of placed objects per category.
    pub fn count_by_category(&self) -> HashMap<DebrisCategory, usize> {
        let mut counts = HashMap::new();
        for object in &self.objects {
            *counts.entry(object.category).or_insert(0) += 1;
        }
        counts
    }
}

/// Owns a validated configuration, the height field built from it and the latest output.
///
/// Every call to [`GenerationContext::generate`] discards the previous output and rebuilds it
/// from scratch.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    config: GenerationConfig,
    field: HeightField,
    result: GenerationResult,
}

impl GenerationContext {
    /// Validates `config` and builds its height field.
    pub fn try_new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        let field = HeightField::new(&config.terrain, config.terrain_size, config.shoreline_y);
        debug!(
            "Generation context ready: terrain {}, shoreline at {}.",
            config.terrain_size, config.shoreline_y
        );
        Ok(Self {
            config,
            field,
            result: GenerationResult::new(),
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    /// Normal view over the height field using the configured epsilon.
    pub fn normal_field(&self) -> NormalField<'_> {
        NormalField::new(&self.field, self.config.normal_epsilon)
    }

    pub fn intensity_model(&self) -> ClusterIntensityModel {
        ClusterIntensityModel::new(
            self.config.terrain_size,
            self.config.shoreline_y,
            self.config.gradient,
        )
    }

    /// Objects from the latest pass.
    pub fn objects(&self) -> &[DebrisObject] {
        &self.result.objects
    }

    pub fn result(&self) -> &GenerationResult {
        &self.result
    }

    pub fn into_result(self) -> GenerationResult {
        self.result
    }

    /// Runs `strategy`, replacing the previous output.
    pub fn generate<R: RngCore>(&mut self, strategy: Strategy, rng: &mut R) -> &[DebrisObject] {
        self.generate_with_events(strategy, rng, &mut ())
    }

    /// Runs `strategy` and streams progress to `sink`, replacing the previous output.
    pub fn generate_with_events<R: RngCore>(
        &mut self,
        strategy: Strategy,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> &[DebrisObject] {
        self.result = run_pass(&self.config, &self.field, strategy, rng, sink);
        &self.result.objects
    }
}

/// One-shot generation: validate `config`, run `strategy` and return the result.
pub fn generate<R: RngCore>(
    strategy: Strategy,
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<GenerationResult> {
    let mut context = GenerationContext::try_new(config.clone())?;
    context.generate(strategy, rng);
    Ok(context.into_result())
}
