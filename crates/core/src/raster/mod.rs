//! Raster data structures

mod grid;
mod rgba;

pub use grid::{ElevationGrid, GridStatistics};
pub use rgba::{check_buffer, RgbaImage, CHANNELS};
