//! Terrain surface: a continuous height field over the square domain and its normals.
//!
//! The height field is a pure function of the coordinate; the placement strategies query it to
//! lift objects onto the surface and the normal field to tilt them flush with the local slope.
pub mod height;
pub mod normal;

pub use height::{HeightField, HeightFieldConfig, NoiseLayer, TerrainGrid};
pub use normal::{surface_rotation, NormalField};
