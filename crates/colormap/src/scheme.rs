//! Color schemes and multi-stop interpolation engine.

use std::fmt;
use std::str::FromStr;

/// RGB color as (r, g, b) with values in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A color stop: position in [0, 1] mapped to an RGB color.
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub t: f64,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(t: f64, r: u8, g: u8, b: u8) -> Self {
        Self {
            t,
            color: Rgb::new(r, g, b),
        }
    }
}

/// Continuous color schemes that ramps are sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorScheme {
    /// Blue -> Cyan -> Green -> Yellow -> Brown -> White (bathymetry through peaks)
    #[default]
    Earth,
    /// Green -> Yellow -> Brown -> White (land elevation)
    Terrain,
    /// Black -> White
    Grayscale,
}

impl ColorScheme {
    /// All available schemes.
    pub const ALL: &'static [ColorScheme] = &[Self::Earth, Self::Terrain, Self::Grayscale];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Earth => "Earth",
            Self::Terrain => "Terrain",
            Self::Grayscale => "Grayscale",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "earth" => Ok(Self::Earth),
            "terrain" => Ok(Self::Terrain),
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(Self::Grayscale),
            _ => Err(format!(
                "Unknown color scheme: {}. Use earth, terrain, or grayscale.",
                s
            )),
        }
    }
}

// ─── Color stop definitions ────────────────────────────────────────────

/// The widely used "Earth" hypsometric scale (deep water blue to snow).
const EARTH_STOPS: &[ColorStop] = &[
    ColorStop::new(0.0, 0, 0, 130),
    ColorStop::new(0.1, 0, 180, 180),
    ColorStop::new(0.2, 40, 210, 40),
    ColorStop::new(0.4, 230, 230, 50),
    ColorStop::new(0.6, 120, 70, 20),
    ColorStop::new(1.0, 255, 255, 255),
];

const TERRAIN_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 34, 139, 34),
    ColorStop::new(0.25, 144, 190, 60),
    ColorStop::new(0.50, 220, 200, 80),
    ColorStop::new(0.75, 180, 120, 60),
    ColorStop::new(1.00, 255, 255, 255),
];

// ─── Interpolation engine ──────────────────────────────────────────────

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_color(c1: Rgb, c2: Rgb, t: f64) -> Rgb {
    Rgb::new(
        lerp(c1.r as f64, c2.r as f64, t).round() as u8,
        lerp(c1.g as f64, c2.g as f64, t).round() as u8,
        lerp(c1.b as f64, c2.b as f64, t).round() as u8,
    )
}

fn multi_stop(stops: &[ColorStop], t: f64) -> Rgb {
    if t <= 0.0 || t.is_nan() {
        return stops[0].color;
    }
    if t >= 1.0 {
        return stops[stops.len() - 1].color;
    }
    for i in 1..stops.len() {
        if t <= stops[i].t {
            let ratio = (t - stops[i - 1].t) / (stops[i].t - stops[i - 1].t);
            return lerp_color(stops[i - 1].color, stops[i].color, ratio);
        }
    }
    stops[stops.len() - 1].color
}

/// Evaluate a color scheme at normalized position `t` ∈ [0, 1].
///
/// Positions outside the unit interval (and NaN) clamp to the end colors.
pub fn evaluate(scheme: ColorScheme, t: f64) -> Rgb {
    match scheme {
        ColorScheme::Earth => multi_stop(EARTH_STOPS, t),
        ColorScheme::Terrain => multi_stop(TERRAIN_STOPS, t),
        ColorScheme::Grayscale => {
            let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
            let v = (t * 255.0).round() as u8;
            Rgb::new(v, v, v)
        }
    }
}
