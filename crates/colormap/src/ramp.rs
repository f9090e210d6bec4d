//! Stepped color ramps for hypsometric tinting.
//!
//! A [`ColorRamp`] is a fixed-size lookup table. An elevation is normalized
//! into `[0, 1]` over the ramp domain and the entry at
//! `round(f * (N - 1))` is returned, so elevations outside the domain
//! saturate to the first or last color.

use crate::scheme::{evaluate, ColorScheme, Rgb};
use terrashade_core::{Error, Result};

/// Number of entries in the default ramp.
pub const DEFAULT_STEPS: usize = 50;
/// Lower bound of the default ramp domain, in meters.
pub const DEFAULT_MIN_ELEVATION: f64 = -1000.0;
/// Upper bound of the default ramp domain, in meters.
pub const DEFAULT_MAX_ELEVATION: f64 = 9500.0;

/// One ramp entry: the elevation where the band starts and its color.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RampEntry {
    pub threshold: f64,
    pub color: Rgb,
}

impl RampEntry {
    pub const fn new(threshold: f64, color: Rgb) -> Self {
        Self { threshold, color }
    }
}

/// Non-empty lookup table of colors sorted ascending by threshold.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<RampEntry>", into = "Vec<RampEntry>"))]
pub struct ColorRamp {
    entries: Vec<RampEntry>,
}

impl ColorRamp {
    /// Build a ramp from explicit entries.
    ///
    /// Fails with [`Error::InvalidParameter`] if `entries` is empty, a
    /// threshold is not finite, or thresholds are not sorted ascending.
    pub fn new(entries: Vec<RampEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::invalid_parameter(
                "ramp",
                "[]",
                "color ramp must have at least one entry",
            ));
        }
        if let Some(bad) = entries.iter().find(|e| !e.threshold.is_finite()) {
            return Err(Error::invalid_parameter(
                "ramp",
                bad.threshold,
                "ramp thresholds must be finite",
            ));
        }
        if let Some(i) = entries
            .windows(2)
            .position(|w| w[1].threshold < w[0].threshold)
        {
            return Err(Error::invalid_parameter(
                "ramp",
                format!("[{}] = {}", i + 1, entries[i + 1].threshold),
                format!(
                    "thresholds must be sorted ascending, previous entry is {}",
                    entries[i].threshold
                ),
            ));
        }
        Ok(Self { entries })
    }

    /// Sample `steps` evenly spaced colors from a continuous scheme.
    pub fn from_scheme(scheme: ColorScheme, steps: usize, min: f64, max: f64) -> Result<Self> {
        if steps == 0 {
            return Err(Error::invalid_parameter(
                "steps",
                steps,
                "a color ramp needs at least one step",
            ));
        }
        validate_domain(min, max)?;
        Ok(Self::sample(scheme, steps, min, max))
    }

    fn sample(scheme: ColorScheme, steps: usize, min: f64, max: f64) -> Self {
        let entries = (0..steps)
            .map(|i| {
                let t = if steps > 1 {
                    i as f64 / (steps - 1) as f64
                } else {
                    0.0
                };
                RampEntry::new(threshold_at(i, steps, min, max), evaluate(scheme, t))
            })
            .collect();
        Self { entries }
    }

    /// Number of entries (always at least one)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The ramp entries, sorted by threshold
    pub fn entries(&self) -> &[RampEntry] {
        &self.entries
    }

    /// Lookup index for a normalized fraction.
    ///
    /// `f` is clamped to `[0, 1]` first (NaN maps to 0), so the result is
    /// always a valid index.
    pub fn index_for(&self, f: f64) -> usize {
        let f = if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) };
        let last = self.entries.len() - 1;
        ((f * last as f64).round() as usize).min(last)
    }

    /// Color for a normalized fraction in `[0, 1]`
    pub fn lookup(&self, f: f64) -> Rgb {
        self.entries[self.index_for(f)].color
    }

    /// Color for an elevation, normalized over `[min, max]`
    pub fn color_for(&self, elevation: f64, min: f64, max: f64) -> Rgb {
        self.lookup(normalize(elevation, min, max))
    }
}

impl Default for ColorRamp {
    /// 50 steps of [`ColorScheme::Earth`] over -1000..9500 m.
    fn default() -> Self {
        Self::sample(
            ColorScheme::Earth,
            DEFAULT_STEPS,
            DEFAULT_MIN_ELEVATION,
            DEFAULT_MAX_ELEVATION,
        )
    }
}

impl TryFrom<Vec<RampEntry>> for ColorRamp {
    type Error = Error;

    fn try_from(entries: Vec<RampEntry>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<ColorRamp> for Vec<RampEntry> {
    fn from(ramp: ColorRamp) -> Self {
        ramp.entries
    }
}

/// Fraction of the way `elevation` lies through `[min, max]`, clamped to `[0, 1]`.
///
/// Callers must ensure `max > min` (see [`validate_domain`]).
pub fn normalize(elevation: f64, min: f64, max: f64) -> f64 {
    let f = (elevation - min) / (max - min);
    if f.is_nan() {
        0.0
    } else {
        f.clamp(0.0, 1.0)
    }
}

/// Check that `[min, max]` is a usable normalization domain.
pub fn validate_domain(min: f64, max: f64) -> Result<()> {
    if !min.is_finite() {
        return Err(Error::invalid_parameter("min_elevation", min, "must be finite"));
    }
    if !max.is_finite() {
        return Err(Error::invalid_parameter("max_elevation", max, "must be finite"));
    }
    if max <= min {
        return Err(Error::invalid_parameter(
            "max_elevation",
            max,
            format!("must be greater than min_elevation ({})", min),
        ));
    }
    Ok(())
}

fn threshold_at(i: usize, n: usize, min: f64, max: f64) -> f64 {
    if n <= 1 {
        return min;
    }
    min + (max - min) * i as f64 / (n - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn three_band() -> ColorRamp {
        ColorRamp::new(vec![
            RampEntry::new(0.0, Rgb::new(0, 0, 255)),
            RampEntry::new(500.0, Rgb::new(0, 255, 0)),
            RampEntry::new(1000.0, Rgb::new(255, 0, 0)),
        ])
        .unwrap()
    }

    #[test]
    fn index_rounds_to_nearest() {
        let ramp = three_band();
        assert_eq!(ramp.index_for(0.0), 0);
        assert_eq!(ramp.index_for(0.24), 0);
        assert_eq!(ramp.index_for(0.25), 1);
        assert_eq!(ramp.index_for(0.74), 1);
        assert_eq!(ramp.index_for(0.75), 2);
        assert_eq!(ramp.index_for(1.0), 2);
    }

    #[test]
    fn saturates_outside_domain() {
        let ramp = three_band();
        let top = ramp.lookup(1.0);
        let bottom = ramp.lookup(0.0);
        assert_eq!(ramp.color_for(1.0e6, 0.0, 1000.0), top);
        assert_eq!(ramp.color_for(-1.0e6, 0.0, 1000.0), bottom);
        assert_eq!(ramp.lookup(f64::NAN), bottom);
        assert_eq!(ramp.lookup(f64::INFINITY), top);
    }

    #[test]
    fn single_entry_ramp() {
        let ramp = ColorRamp::new(vec![RampEntry::new(0.0, Rgb::new(1, 2, 3))]).unwrap();
        assert_eq!(ramp.lookup(0.0), Rgb::new(1, 2, 3));
        assert_eq!(ramp.lookup(0.99), Rgb::new(1, 2, 3));
    }

    #[test]
    fn empty_ramp_rejected() {
        let err = ColorRamp::new(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "ramp", .. }));
    }

    #[test]
    fn unsorted_ramp_rejected() {
        let err = ColorRamp::new(vec![
            RampEntry::new(100.0, Rgb::new(0, 0, 0)),
            RampEntry::new(50.0, Rgb::new(9, 9, 9)),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "ramp", .. }));
    }

    #[test]
    fn nan_threshold_rejected() {
        let result = ColorRamp::new(vec![RampEntry::new(f64::NAN, Rgb::new(0, 0, 0))]);
        assert!(result.is_err());
    }

    #[test]
    fn from_scheme_spans_domain() {
        let ramp = ColorRamp::from_scheme(ColorScheme::Grayscale, 5, -100.0, 300.0).unwrap();
        assert_eq!(ramp.len(), 5);
        let thresholds: Vec<f64> = ramp.entries().iter().map(|e| e.threshold).collect();
        assert_relative_eq!(thresholds[0], -100.0);
        assert_relative_eq!(thresholds[2], 100.0);
        assert_relative_eq!(thresholds[4], 300.0);
        assert_eq!(ramp.entries()[0].color, Rgb::new(0, 0, 0));
        assert_eq!(ramp.entries()[4].color, Rgb::new(255, 255, 255));
    }

    #[test]
    fn from_scheme_rejects_bad_input() {
        assert!(ColorRamp::from_scheme(ColorScheme::Earth, 0, 0.0, 1.0).is_err());
        assert!(ColorRamp::from_scheme(ColorScheme::Earth, 10, 5.0, 5.0).is_err());
        assert!(ColorRamp::from_scheme(ColorScheme::Earth, 10, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn default_ramp_is_valid() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.len(), DEFAULT_STEPS);
        assert!(ColorRamp::new(ramp.entries().to_vec()).is_ok());
        assert_relative_eq!(ramp.entries()[0].threshold, DEFAULT_MIN_ELEVATION);
        assert_relative_eq!(ramp.entries()[DEFAULT_STEPS - 1].threshold, DEFAULT_MAX_ELEVATION);
    }

    #[test]
    fn degenerate_domain_rejected() {
        assert!(validate_domain(10.0, 10.0).is_err());
        assert!(validate_domain(10.0, 5.0).is_err());
        assert!(validate_domain(f64::NAN, 5.0).is_err());
        assert!(validate_domain(-1.0, 1.0).is_ok());
    }
}
