//! # terrashade colormap
//!
//! Hypsometric tinting for terrashade.
//!
//! Continuous color schemes are evaluated with a multi-stop interpolation
//! engine and then discretized into a [`ColorRamp`]: a fixed-size lookup
//! table of `(threshold, color)` entries spanning an elevation domain.
//!
//! ## Usage
//!
//! ```ignore
//! use terrashade_colormap::{ColorRamp, ColorScheme};
//!
//! let ramp = ColorRamp::from_scheme(ColorScheme::Earth, 50, -1000.0, 9500.0)?;
//! let color = ramp.color_for(1250.0, -1000.0, 9500.0);
//! ```

mod ramp;
mod scheme;

pub use ramp::{
    normalize, validate_domain, ColorRamp, RampEntry, DEFAULT_MAX_ELEVATION,
    DEFAULT_MIN_ELEVATION, DEFAULT_STEPS,
};
pub use scheme::{evaluate, ColorScheme, ColorStop, Rgb};
