//! Shaded relief from terrain-RGB tiles
//!
//! Decodes elevation from an RGBA tile, estimates slope and aspect from the
//! four clamped neighbors of every pixel, lights the surface with a distant
//! sun and writes one RGBA pixel per input pixel:
//!
//! - [`ReliefMode::Raw`]: the input, unchanged
//! - [`ReliefMode::Shaded`]: gray `55 + 200 * cos_incidence`
//! - [`ReliefMode::Colorized`]: ramp color scaled by `cos_incidence`
//!
//! In both lit modes pixels at or below sea level are painted
//! [`WATER_COLOR`]. Alpha is always copied from the input.

use super::decode::decode_pixel;
use super::derivatives::SurfaceGradient;
use super::illumination::Illumination;
use super::neighbors::sample_neighbors;
use std::fmt;
use std::str::FromStr;
use terrashade_colormap::{validate_domain, ColorRamp, Rgb};
use terrashade_core::raster::check_buffer;
use terrashade_core::{Algorithm, Error, Result, RgbaImage};
use terrashade_parallel::{ParallelStrategy, ProcessingMode};

/// Color painted over pixels at or below sea level.
pub const WATER_COLOR: Rgb = Rgb::new(0, 60, 136);

/// Gray level of a surface lit edge-on (`cos_incidence = 0`).
const SHADE_BASE: f64 = 55.0;
/// Gray levels added per unit of `cos_incidence`.
const SHADE_GAIN: f64 = 200.0;

/// What the relief operation renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ReliefMode {
    /// Pass the encoded elevation tile through untouched
    Raw,
    /// Grayscale hillshade
    #[default]
    Shaded,
    /// Hypsometric tint modulated by the hillshade
    Colorized,
}

impl ReliefMode {
    pub const ALL: &'static [ReliefMode] = &[Self::Raw, Self::Shaded, Self::Colorized];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Shaded => "shaded",
            Self::Colorized => "colorized",
        }
    }
}

impl fmt::Display for ReliefMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReliefMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "shade" | "shaded" | "hillshade" => Ok(Self::Shaded),
            "colorize" | "colorized" | "color" | "colour" => Ok(Self::Colorized),
            _ => Err(format!("Unknown mode: {}. Use raw, shade, or colorize.", s)),
        }
    }
}

/// Parameters for the relief operation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReliefParams {
    /// Ground distance per pixel, in meters
    pub resolution: f64,
    /// Multiplier applied to elevations before differencing
    pub vertical_exaggeration: f64,
    /// Sun altitude above the horizon, in degrees
    pub sun_elevation: f64,
    /// Sun azimuth, in degrees
    pub sun_azimuth: f64,
    /// Elevations at or below this are drawn as water; `-inf` disables it
    pub sea_level: f64,
    /// Output style
    pub mode: ReliefMode,
    /// Hypsometric ramp, used in colorized mode
    pub ramp: ColorRamp,
    /// Elevation mapped to the first ramp entry
    pub min_elevation: f64,
    /// Elevation mapped to the last ramp entry
    pub max_elevation: f64,
}

impl Default for ReliefParams {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            vertical_exaggeration: 1.0,
            sun_elevation: 45.0,
            sun_azimuth: 315.0,
            sea_level: 0.0,
            mode: ReliefMode::Shaded,
            ramp: ColorRamp::default(),
            min_elevation: terrashade_colormap::DEFAULT_MIN_ELEVATION,
            max_elevation: terrashade_colormap::DEFAULT_MAX_ELEVATION,
        }
    }
}

impl ReliefParams {
    /// Check every numeric parameter before any pixel is touched.
    pub fn validate(&self) -> Result<()> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(Error::invalid_parameter(
                "resolution",
                self.resolution,
                "must be a positive, finite number of meters per pixel",
            ));
        }
        let finite = [
            ("vertical_exaggeration", self.vertical_exaggeration),
            ("sun_elevation", self.sun_elevation),
            ("sun_azimuth", self.sun_azimuth),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(Error::invalid_parameter(name, value, "must be finite"));
            }
        }
        if self.sea_level.is_nan() {
            return Err(Error::invalid_parameter("sea_level", self.sea_level, "must not be NaN"));
        }
        validate_domain(self.min_elevation, self.max_elevation)
    }
}

/// Shaded relief algorithm
#[derive(Debug, Clone, Default)]
pub struct ShadedRelief;

impl Algorithm for ShadedRelief {
    type Input = RgbaImage;
    type Output = RgbaImage;
    type Params = ReliefParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Shaded relief"
    }

    fn description(&self) -> &'static str {
        "Shade or color a terrain-RGB elevation tile"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        shaded_relief(&input, &params)
    }
}

/// Render shaded relief, spreading rows over rayon's global pool.
///
/// # Arguments
/// * `image` - Terrain-RGB encoded elevation tile
/// * `params` - Sun position, exaggeration, mode and ramp
///
/// # Returns
/// A new RGBA image with the same dimensions as `image`
pub fn shaded_relief(image: &RgbaImage, params: &ReliefParams) -> Result<RgbaImage> {
    shaded_relief_with(image, params, ProcessingMode::Parallel)
}

/// Render shaded relief from a raw RGBA buffer with declared dimensions.
///
/// Fails with [`Error::InvalidInput`] before any work if `data` does not
/// hold exactly `width * height` RGBA pixels.
pub fn shaded_relief_buffer(
    data: &[u8],
    width: usize,
    height: usize,
    params: &ReliefParams,
) -> Result<RgbaImage> {
    check_buffer(width, height, data.len())?;
    let image = RgbaImage::from_raw(width, height, data.to_vec())?;
    shaded_relief(&image, params)
}

/// Render shaded relief with an explicit processing mode.
///
/// The output is byte-identical for every [`ProcessingMode`].
pub fn shaded_relief_with(
    image: &RgbaImage,
    params: &ReliefParams,
    processing: ProcessingMode,
) -> Result<RgbaImage> {
    params.validate()?;

    let style = match params.mode {
        ReliefMode::Raw => return Ok(image.clone()),
        ReliefMode::Shaded => Style::Gray,
        ReliefMode::Colorized => Style::Tinted,
    };

    let compositor = Compositor {
        image,
        params,
        style,
        sun: Illumination::new(params.sun_elevation, params.sun_azimuth),
    };

    let (width, height) = image.dimensions();
    let rows = processing
        .par_map(0..height, |y| compositor.render_row(y))
        .map_err(|e| Error::Algorithm(format!("cannot build thread pool: {}", e)))?;

    RgbaImage::from_raw(width, height, rows.concat())
}

#[derive(Debug, Clone, Copy)]
enum Style {
    Gray,
    Tinted,
}

struct Compositor<'a> {
    image: &'a RgbaImage,
    params: &'a ReliefParams,
    style: Style,
    sun: Illumination,
}

impl Compositor<'_> {
    fn render_row(&self, y: usize) -> Vec<u8> {
        let width = self.image.width();
        let mut row = Vec::with_capacity(width * 4);
        for x in 0..width {
            row.extend_from_slice(&self.render_pixel(x, y));
        }
        row
    }

    /// Sea level and the ramp see the pixel's own decoded elevation;
    /// vertical exaggeration only feeds the derivatives.
    fn render_pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let p = self.params;
        let source = self.image.pixel(x, y);
        let alpha = source[3];

        let elevation = decode_pixel(source);
        if elevation <= p.sea_level {
            return [WATER_COLOR.r, WATER_COLOR.g, WATER_COLOR.b, alpha];
        }

        let z = sample_neighbors(self.image, x, y, p.vertical_exaggeration);
        let gradient = SurfaceGradient::from_neighbors(&z, p.resolution);
        let cos_incidence = self.sun.cos_incidence(gradient.slope(), gradient.aspect());

        match self.style {
            Style::Gray => {
                let v = to_channel(SHADE_BASE + cos_incidence * SHADE_GAIN);
                [v, v, v, alpha]
            }
            Style::Tinted => {
                let c = p.ramp.color_for(elevation, p.min_elevation, p.max_elevation);
                [
                    to_channel(cos_incidence * c.r as f64),
                    to_channel(cos_incidence * c.g as f64),
                    to_channel(cos_incidence * c.b as f64),
                    alpha,
                ]
            }
        }
    }
}

/// Convert to a channel byte: clamp to `[0, 255]`, round half to even, NaN to 0.
#[inline]
pub(crate) fn to_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0).round_ties_even() as u8
}
