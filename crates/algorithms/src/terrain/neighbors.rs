//! Clamped four-neighbor sampling
//!
//! Neighbors that would fall outside the image collapse onto the pixel
//! itself, turning the central difference into a one-sided difference at the
//! borders instead of reading out of bounds or wrapping around.

use super::decode::decode_elevation;
use terrashade_core::RgbaImage;

/// Coordinates of the four axis neighbors of a pixel, clamped to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    /// Column of the left neighbor (`x - 1`, or `x` on the left edge)
    pub west: usize,
    /// Column of the right neighbor (`x + 1`, or `x` on the right edge)
    pub east: usize,
    /// Row of the neighbor above (`y - 1`, or `y` on the top edge)
    pub north: usize,
    /// Row of the neighbor below (`y + 1`, or `y` on the bottom edge)
    pub south: usize,
}

impl Neighbors {
    /// Clamped neighbors of `(x, y)` in a `width x height` image.
    ///
    /// `x` and `y` must lie inside the image.
    #[inline]
    pub fn clamped(x: usize, y: usize, width: usize, height: usize) -> Self {
        debug_assert!(x < width && y < height);
        Self {
            west: x.saturating_sub(1),
            east: if x + 1 < width { x + 1 } else { x },
            north: y.saturating_sub(1),
            south: if y + 1 < height { y + 1 } else { y },
        }
    }
}

/// Exaggerated elevations at the four clamped neighbors of a pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborElevations {
    pub west: f64,
    pub east: f64,
    pub north: f64,
    pub south: f64,
}

/// Decode the four clamped neighbor elevations of `(x, y)`, each multiplied
/// by `exaggeration`.
#[inline]
pub fn sample_neighbors(
    image: &RgbaImage,
    x: usize,
    y: usize,
    exaggeration: f64,
) -> NeighborElevations {
    let n = Neighbors::clamped(x, y, image.width(), image.height());
    let z = |col: usize, row: usize| {
        let [r, g, b, _] = image.pixel(col, row);
        exaggeration * decode_elevation(r, g, b)
    };
    NeighborElevations {
        west: z(n.west, y),
        east: z(n.east, y),
        north: z(x, n.north),
        south: z(x, n.south),
    }
}
