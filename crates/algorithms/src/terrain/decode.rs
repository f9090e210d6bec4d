//! Terrain-RGB elevation encoding
//!
//! Elevation is packed into the three color channels of a pixel as a 24-bit
//! count of 0.1 m steps above -10000 m:
//!
//! ```text
//! elevation = -10000 + (R * 65536 + G * 256 + B) * 0.1
//! ```
//!
//! Alpha plays no part in the encoding.

use terrashade_core::{ElevationGrid, Error, Result, RgbaImage};

/// Elevation of code 0, in meters.
pub const ELEVATION_OFFSET: f64 = -10000.0;
/// Meters per encoded step.
pub const ELEVATION_STEP: f64 = 0.1;
/// Largest code that fits in three 8-bit channels.
pub const MAX_CODE: u32 = 0x00FF_FFFF;

/// Decode the elevation in meters of one terrain-RGB pixel.
#[inline]
pub fn decode_elevation(r: u8, g: u8, b: u8) -> f64 {
    let code = (r as u32) * 65536 + (g as u32) * 256 + b as u32;
    ELEVATION_OFFSET + code as f64 * ELEVATION_STEP
}

/// Decode the elevation of an RGBA pixel.
#[inline]
pub fn decode_pixel(pixel: [u8; 4]) -> f64 {
    decode_elevation(pixel[0], pixel[1], pixel[2])
}

/// Encode an elevation as terrain-RGB channels.
///
/// The elevation is rounded to the nearest 0.1 m step and saturates at the
/// ends of the representable range. NaN encodes as code 0.
pub fn encode_elevation(elevation: f64) -> [u8; 3] {
    let steps = ((elevation - ELEVATION_OFFSET) / ELEVATION_STEP).round();
    let code = if steps.is_nan() {
        0
    } else {
        steps.clamp(0.0, MAX_CODE as f64) as u32
    };
    [(code >> 16) as u8, (code >> 8) as u8, code as u8]
}

/// Decode a whole terrain-RGB image into an elevation grid.
///
/// `resolution` becomes the grid cell size. Row 0 of the grid is the top
/// row of the image.
pub fn decode_terrain_rgb(image: &RgbaImage, resolution: f64) -> Result<ElevationGrid> {
    let (width, height) = image.dimensions();
    let data = image
        .as_raw()
        .chunks_exact(4)
        .map(|p| decode_elevation(p[0], p[1], p[2]))
        .collect();
    ElevationGrid::from_vec(data, height, width, resolution)
}

/// Encode an elevation grid as an opaque terrain-RGB image.
///
/// No-data cells are written fully transparent.
pub fn encode_terrain_rgb(grid: &ElevationGrid) -> Result<RgbaImage> {
    let (rows, cols) = grid.shape();
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    let mut data = Vec::with_capacity(rows * cols * 4);
    for &z in grid.data().iter() {
        if grid.is_nodata(z) {
            data.extend_from_slice(&[0, 0, 0, 0]);
        } else {
            let [r, g, b] = encode_elevation(z);
            data.extend_from_slice(&[r, g, b, 255]);
        }
    }
    RgbaImage::from_raw(cols, rows, data)
}
