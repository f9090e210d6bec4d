//! # Terrashade Algorithms
//!
//! Relief rendering for terrain-RGB elevation tiles.
//!
//! ```no_run
//! use terrashade_algorithms::prelude::*;
//!
//! # fn run(tile: &RgbaImage) -> Result<()> {
//! let params = ReliefParams {
//!     resolution: 30.0,
//!     mode: ReliefMode::Colorized,
//!     ..Default::default()
//! };
//! let relief = shaded_relief(tile, &params)?;
//! # let _ = relief;
//! # Ok(())
//! # }
//! ```

pub mod terrain;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::terrain::{
        decode_terrain_rgb, encode_terrain_rgb, shaded_relief, shaded_relief_buffer,
        shaded_relief_with, ReliefMode, ReliefParams, ShadedRelief,
    };
    pub use terrashade_colormap::{ColorRamp, ColorScheme, Rgb};
    pub use terrashade_core::prelude::*;
    pub use terrashade_parallel::ProcessingMode;
}
