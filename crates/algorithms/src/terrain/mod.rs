//! Terrain relief from terrain-RGB tiles
//!
//! - Decode: terrain-RGB pixels to elevation and back
//! - Neighbors: clamped four-neighbor sampling
//! - Derivatives: gradient, slope and aspect
//! - Illumination: sun incidence on a sloped surface
//! - Relief: raw, shaded and colorized output tiles

mod decode;
mod derivatives;
mod illumination;
mod neighbors;
mod relief;

pub use decode::{
    decode_elevation, decode_pixel, decode_terrain_rgb, encode_elevation, encode_terrain_rgb,
    ELEVATION_OFFSET, ELEVATION_STEP, MAX_CODE,
};
pub use derivatives::SurfaceGradient;
pub use illumination::Illumination;
pub use neighbors::{sample_neighbors, NeighborElevations, Neighbors};
pub use relief::{
    shaded_relief, shaded_relief_buffer, shaded_relief_with, ReliefMode, ReliefParams,
    ShadedRelief, WATER_COLOR,
};
