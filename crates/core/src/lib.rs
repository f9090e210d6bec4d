//! # terrashade core
//!
//! Core types, traits and I/O shared by the terrashade crates.
//!
//! This crate provides:
//! - `RgbaImage`: 8-bit RGBA pixel buffer (terrain-RGB input, rendered output)
//! - `ElevationGrid`: decoded elevations on a regular grid
//! - `Algorithm`: common trait for raster operations
//! - Float32 GeoTIFF I/O for elevation grids

pub mod error;
pub mod io;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{ElevationGrid, GridStatistics, RgbaImage};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::raster::{ElevationGrid, RgbaImage};
    pub use crate::Algorithm;
}

/// Core trait for all raster operations.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
