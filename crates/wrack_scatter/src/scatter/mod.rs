//! Debris placement: intensity model, strategies, overlap rejection and the generation context.
pub mod bounds;
pub mod config;
pub mod context;
pub mod events;
pub mod intensity;
pub mod object;
pub mod overlap;
pub mod strategy;

/// Height of placed objects above the sampled terrain surface.
pub const DEFAULT_SURFACE_OFFSET: f32 = 1.0;
