#![forbid(unsafe_code)]
//! wrack_scatter: procedural debris scattering over height-mapped shoreline terrain.
//!
//! Modules:
//! - terrain: layered-noise height field, finite-difference normals, baked height grids
//! - sampling: candidate generation (uniform random, Poisson disk) and the spatial bucket grid
//! - scatter: intensity model, placement strategies, overlap rejection, generation context, events
//!
//! For a quick start, see [`scatter::context::generate`].
pub mod error;
pub mod sampling;
pub mod scatter;
pub mod terrain;

/// Convenient re-exports for common types. Import with `use wrack_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::sampling::grid::{BucketGrid, SingleSlotGrid, SpatialGrid};
    pub use crate::sampling::{PoissonDiskSampling, PositionSampling, UniformRandomSampling};
    pub use crate::scatter::bounds::{InsetBounds, Rect};
    pub use crate::scatter::config::{
        BlueNoiseConfig, CategorizedConfig, GenerationConfig, HybridConfig, MaternConfig,
        PowerLawConfig, SnagConfig,
    };
    pub use crate::scatter::context::{generate, GenerationContext, GenerationResult, Strategy};
    pub use crate::scatter::events::{
        EventSink, FnSink, GenerationEvent, GenerationEventKind, MultiSink, RejectReason,
        VecSink,
    };
    pub use crate::scatter::intensity::{
        ClusterCenter, ClusterIntensityModel, PowerLaw, ShorelineGradient, ValueRange,
    };
    pub use crate::scatter::object::{CategoryThresholds, DebrisCategory, DebrisObject};
    pub use crate::scatter::overlap::{CollisionCheck, OverlapIndex, OverlapRules};
    pub use crate::terrain::height::{HeightField, HeightFieldConfig, NoiseLayer, TerrainGrid};
    pub use crate::terrain::normal::{surface_rotation, NormalField};
}
