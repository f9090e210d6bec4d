//! Lambertian illumination from a distant sun

/// Sun position with its trigonometric terms pre-computed.
///
/// Built once per operation; [`Illumination::cos_incidence`] is then a few
/// multiplications per pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Illumination {
    sin_elevation: f64,
    cos_elevation: f64,
    azimuth: f64,
}

impl Illumination {
    /// Sun `elevation` above the horizon and `azimuth`, both in degrees.
    pub fn new(elevation_deg: f64, azimuth_deg: f64) -> Self {
        let elevation = elevation_deg.to_radians();
        Self {
            sin_elevation: elevation.sin(),
            cos_elevation: elevation.cos(),
            azimuth: azimuth_deg.to_radians(),
        }
    }

    /// Cosine of the angle between the sun direction and the surface normal.
    ///
    /// ```text
    /// sin(el) * cos(slope) + cos(el) * sin(slope) * cos(az - aspect)
    /// ```
    ///
    /// Ranges over `[-1, 1]`; negative values mean the surface faces away
    /// from the sun.
    #[inline]
    pub fn cos_incidence(&self, slope: f64, aspect: f64) -> f64 {
        self.sin_elevation * slope.cos()
            + self.cos_elevation * slope.sin() * (self.azimuth - aspect).cos()
    }
}
