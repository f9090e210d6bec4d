//! 8-bit RGBA pixel buffers

use crate::error::{Error, Result};

/// Number of bytes per pixel.
pub const CHANNELS: usize = 4;

/// A rectangular buffer of 8-bit RGBA pixels in row-major order.
///
/// Used both for terrain-RGB encoded elevation tiles and for rendered
/// relief output. The buffer length always equals `width * height * 4`,
/// which every constructor checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Create a fully transparent image
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; width * height * CHANNELS],
        })
    }

    /// Create an image where every pixel is `pixel`
    pub fn filled(width: usize, height: usize, pixel: [u8; 4]) -> Result<Self> {
        check_dimensions(width, height)?;
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(width * height * CHANNELS)
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap an existing RGBA buffer.
    ///
    /// Fails with [`Error::InvalidInput`] when the declared dimensions are
    /// zero or do not match the buffer length.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        check_buffer(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> [u8; 4],
    {
        check_dimensions(width, height)?;
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Dimensions as (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Raw RGBA bytes
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image and return its RGBA bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel (x, y)
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * CHANNELS
    }

    /// Pixel at (x, y), or `None` when out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixel(x, y))
    }

    /// Pixel at (x, y).
    ///
    /// # Panics
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let o = self.offset(x, y);
        [self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]]
    }

    /// Overwrite pixel (x, y)
    pub fn set(&mut self, x: usize, y: usize, pixel: [u8; 4]) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                row: y,
                col: x,
                rows: self.height,
                cols: self.width,
            });
        }
        let o = self.offset(x, y);
        self.data[o..o + CHANNELS].copy_from_slice(&pixel);
        Ok(())
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(format!(
            "image dimensions must be non-zero, got {}x{}",
            width, height
        )));
    }
    Ok(())
}

/// Validate that a raw buffer of `len` bytes holds exactly `width x height` RGBA pixels.
pub fn check_buffer(width: usize, height: usize, len: usize) -> Result<()> {
    check_dimensions(width, height)?;
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| {
            Error::InvalidInput(format!("image dimensions {}x{} overflow", width, height))
        })?;
    if len != expected {
        return Err(Error::InvalidInput(format!(
            "buffer of {} bytes does not match {}x{} RGBA ({} bytes expected)",
            len, width, height, expected
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_checks_length() {
        assert!(RgbaImage::from_raw(2, 2, vec![0; 16]).is_ok());

        let err = RgbaImage::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            RgbaImage::from_raw(0, 3, Vec::new()),
            Err(Error::InvalidInput(_))
        ));
        assert!(RgbaImage::new(4, 0).is_err());
    }

    #[test]
    fn pixel_addressing_is_row_major() {
        let img = RgbaImage::from_fn(3, 2, |x, y| [x as u8, y as u8, 7, 255]).unwrap();
        assert_eq!(img.pixel(2, 1), [2, 1, 7, 255]);
        assert_eq!(img.offset(2, 1), 20);
        assert_eq!(img.get(3, 0), None);
    }

    #[test]
    fn filled_repeats_pixel() {
        let img = RgbaImage::filled(2, 3, [1, 2, 3, 4]).unwrap();
        assert_eq!(img.as_raw().len(), 24);
        assert!(img.as_raw().chunks_exact(4).all(|p| p == [1, 2, 3, 4]));
    }

    #[test]
    fn set_out_of_bounds() {
        let mut img = RgbaImage::new(2, 2).unwrap();
        img.set(1, 1, [9, 9, 9, 9]).unwrap();
        assert_eq!(img.pixel(1, 1), [9, 9, 9, 9]);
        assert!(img.set(2, 0, [0; 4]).is_err());
    }
}
