//! Surface gradient, slope and aspect from clamped neighbor elevations
//!
//! Central differences over the four axis neighbors:
//!
//! ```text
//! dz/dx = (z_east  - z_west)  / dp
//! dz/dy = (z_south - z_north) / dp        dp = 2 * resolution
//! ```
//!
//! `dp` stays `2 * resolution` even where a border clamp collapsed one side
//! of the pair, so edge gradients come out at half strength.

use super::neighbors::NeighborElevations;
use std::f64::consts::{FRAC_PI_2, PI};

/// Partial derivatives of elevation at one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGradient {
    /// Change in elevation per meter, increasing column (eastward)
    pub dzdx: f64,
    /// Change in elevation per meter, increasing row (southward in a north-up tile)
    pub dzdy: f64,
}

impl SurfaceGradient {
    /// Gradient from neighbor elevations and ground resolution (meters per pixel).
    #[inline]
    pub fn from_neighbors(z: &NeighborElevations, resolution: f64) -> Self {
        let dp = resolution * 2.0;
        Self {
            dzdx: (z.east - z.west) / dp,
            dzdy: (z.south - z.north) / dp,
        }
    }

    /// Slope angle in radians, in `[0, π/2)`.
    #[inline]
    pub fn slope(&self) -> f64 {
        (self.dzdx * self.dzdx + self.dzdy * self.dzdy).sqrt().atan()
    }

    /// Aspect in radians as a bearing for the illumination model.
    ///
    /// The mathematical angle `atan2(dzdy, -dzdx)` is remapped:
    /// - negative angles map to `π/2 - a`
    /// - angles above `π/2` map to `2π - a + π/2`
    /// - everything else maps to `π/2 - a`
    ///
    /// A flat surface has `dzdx = +0`, so the angle is `atan2(+0, -0) = π`
    /// and the aspect comes out as `3π/2`.
    #[inline]
    pub fn aspect(&self) -> f64 {
        let a = self.dzdy.atan2(-self.dzdx);
        if a < 0.0 {
            FRAC_PI_2 - a
        } else if a > FRAC_PI_2 {
            2.0 * PI - a + FRAC_PI_2
        } else {
            FRAC_PI_2 - a
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::decode::encode_elevation;
    use crate::terrain::neighbors::sample_neighbors;
    use approx::assert_abs_diff_eq;
    use terrashade_core::RgbaImage;

    /// Tile whose elevation is `100 + 30 * (x or y)` along one axis.
    fn linear_ramp(width: usize, height: usize, along_x: bool) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let step = if along_x { x } else { y };
            let [r, g, b] = encode_elevation(100.0 + 30.0 * step as f64);
            [r, g, b, 255]
        })
        .unwrap()
    }

    fn gradient_at(image: &RgbaImage, x: usize, y: usize) -> SurfaceGradient {
        SurfaceGradient::from_neighbors(&sample_neighbors(image, x, y, 1.0), 1.0)
    }

    fn elevations(west: f64, east: f64, north: f64, south: f64) -> NeighborElevations {
        NeighborElevations {
            west,
            east,
            north,
            south,
        }
    }

    #[test]
    fn flat_surface_has_zero_slope() {
        let g = SurfaceGradient::from_neighbors(&elevations(50.0, 50.0, 50.0, 50.0), 30.0);
        assert_eq!(g.dzdx, 0.0);
        assert_eq!(g.dzdy, 0.0);
        assert_eq!(g.slope(), 0.0);
        assert_abs_diff_eq!(g.aspect(), 1.5 * PI, epsilon = 1e-12);
    }

    #[test]
    fn spacing_is_twice_resolution() {
        let g = SurfaceGradient::from_neighbors(&elevations(0.0, 60.0, 0.0, 0.0), 30.0);
        assert_abs_diff_eq!(g.dzdx, 1.0);
        assert_abs_diff_eq!(g.slope(), PI / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn dzdy_increases_with_row() {
        let g = SurfaceGradient::from_neighbors(&elevations(0.0, 0.0, 10.0, 30.0), 5.0);
        assert_abs_diff_eq!(g.dzdy, 2.0);
        assert_eq!(g.dzdx, 0.0);
    }

    #[test]
    fn left_and_right_edges_halve_dzdx() {
        let image = linear_ramp(5, 1, true);
        let interior = gradient_at(&image, 2, 0).dzdx;
        assert_abs_diff_eq!(interior, 30.0, epsilon = 1e-9);

        for x in [0, 4] {
            let edge = gradient_at(&image, x, 0).dzdx;
            assert_abs_diff_eq!(edge, 15.0, epsilon = 1e-9);
            assert_abs_diff_eq!(edge * 2.0, interior, epsilon = 1e-9);
        }
    }

    #[test]
    fn top_and_bottom_rows_halve_dzdy() {
        let image = linear_ramp(1, 5, false);
        let interior = gradient_at(&image, 0, 2).dzdy;
        assert_abs_diff_eq!(interior, 30.0, epsilon = 1e-9);

        for y in [0, 4] {
            let edge = gradient_at(&image, 0, y).dzdy;
            assert_abs_diff_eq!(edge, 15.0, epsilon = 1e-9);
            assert_abs_diff_eq!(edge * 2.0, interior, epsilon = 1e-9);
        }
    }

    #[test]
    fn border_clamp_flattens_edge_slope() {
        let image = linear_ramp(5, 5, true);
        let interior = gradient_at(&image, 2, 2).slope();
        let edge = gradient_at(&image, 0, 2).slope();
        assert!(edge < interior);
        // Clamping along x leaves dzdy untouched on a plane in x
        assert_eq!(gradient_at(&image, 0, 0).dzdy, 0.0);
    }

    #[test]
    fn slope_stays_below_right_angle() {
        let g = SurfaceGradient::from_neighbors(&elevations(-1.0e6, 1.0e6, 0.0, 0.0), 0.5);
        assert!(g.slope() < FRAC_PI_2);
        assert!(g.slope() > 1.5);
    }

    #[test]
    fn aspect_remap_branches() {
        // Rising eastward: atan2(0, -1) = π, upper branch -> 2π - π + π/2
        let east = SurfaceGradient { dzdx: 1.0, dzdy: 0.0 };
        assert_abs_diff_eq!(east.aspect(), 1.5 * PI, epsilon = 1e-12);

        // Rising westward: atan2(0, 1) = 0, middle branch -> π/2
        let west = SurfaceGradient { dzdx: -1.0, dzdy: 0.0 };
        assert_abs_diff_eq!(west.aspect(), FRAC_PI_2, epsilon = 1e-12);

        // Rising northward (dzdy < 0): atan2(-1, 0) = -π/2, lower branch -> π
        let north = SurfaceGradient { dzdx: 0.0, dzdy: -1.0 };
        assert_abs_diff_eq!(north.aspect(), PI, epsilon = 1e-12);

        // Rising southward: atan2(1, 0) = π/2, middle branch -> 0
        let south = SurfaceGradient { dzdx: 0.0, dzdy: 1.0 };
        assert_abs_diff_eq!(south.aspect(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn aspect_stays_in_one_turn() {
        for i in 0..72 {
            let theta = i as f64 * 5.0_f64.to_radians();
            let g = SurfaceGradient {
                dzdx: theta.cos(),
                dzdy: theta.sin(),
            };
            let a = g.aspect();
            assert!((0.0..=2.0 * PI).contains(&a), "aspect {} out of range", a);
        }
    }
}
