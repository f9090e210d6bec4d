//! # terrashade parallel
//!
//! Execution strategies for per-row raster work.
//!
//! Raster operations in terrashade compute each output row independently,
//! so rows can be handed to rayon workers in any partitioning. Results are
//! always collected in row order.

pub mod strategy;

pub use strategy::{num_threads, ParallelStrategy, ProcessingMode};
pub use rayon::ThreadPoolBuildError;
