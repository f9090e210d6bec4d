//! Elevation grid type

use crate::error::{Error, Result};
use ndarray::Array2;

/// A 2D grid of elevations in meters.
///
/// Values are stored in row-major order `(row, col)`, with row 0 at the
/// top (north) edge. `cell_size` is the ground distance covered by one cell.
///
/// # Example
///
/// ```ignore
/// use terrashade_core::ElevationGrid;
///
/// let mut grid = ElevationGrid::filled(256, 256, 0.0, 30.0);
/// grid.set(10, 20, 1250.5)?;
/// let z = grid.get(10, 20)?;
/// ```
#[derive(Debug, Clone)]
pub struct ElevationGrid {
    data: Array2<f64>,
    cell_size: f64,
    nodata: Option<f64>,
}

impl ElevationGrid {
    /// Create a new grid filled with zeros
    pub fn new(rows: usize, cols: usize, cell_size: f64) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
            cell_size,
            nodata: None,
        }
    }

    /// Create a new grid filled with a specific value
    pub fn filled(rows: usize, cols: usize, value: f64, cell_size: f64) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
            cell_size,
            nodata: None,
        }
    }

    /// Create a grid from row-major data
    pub fn from_vec(data: Vec<f64>, rows: usize, cols: usize, cell_size: f64) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self {
            data: array,
            cell_size,
            nodata: None,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the grid is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Ground distance per cell
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Get the no-data value
    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    /// Set the no-data value
    pub fn set_nodata(&mut self, nodata: Option<f64>) {
        self.nodata = nodata;
    }

    /// Check if a value is no-data. NaN always counts as no-data.
    pub fn is_nodata(&self, value: f64) -> bool {
        if value.is_nan() {
            return true;
        }
        match self.nodata {
            Some(nd) => (value - nd).abs() < f64::EPSILON * 100.0,
            None => false,
        }
    }

    /// Calculate basic statistics over valid cells
    pub fn statistics(&self) -> GridStatistics {
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;
        let mut sum = 0.0;
        let mut count = 0usize;

        for &value in self.data.iter() {
            if self.is_nodata(value) {
                continue;
            }
            min = Some(min.map_or(value, |m| m.min(value)));
            max = Some(max.map_or(value, |m| m.max(value)));
            sum += value;
            count += 1;
        }

        let mean = if count > 0 {
            Some(sum / count as f64)
        } else {
            None
        };

        GridStatistics {
            min,
            max,
            mean,
            valid_count: count,
            nodata_count: self.len() - count,
        }
    }
}

/// Basic statistics for an elevation grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridStatistics {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub valid_count: usize,
    pub nodata_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_creation() {
        let grid = ElevationGrid::new(100, 200, 30.0);
        assert_eq!(grid.rows(), 100);
        assert_eq!(grid.cols(), 200);
        assert_eq!(grid.shape(), (100, 200));
        assert_eq!(grid.cell_size(), 30.0);
    }

    #[test]
    fn test_grid_access() {
        let mut grid = ElevationGrid::new(10, 10, 1.0);
        grid.set(5, 5, 42.0).unwrap();
        assert_eq!(grid.get(5, 5).unwrap(), 42.0);
        assert!(grid.get(10, 0).is_err());
        assert!(grid.set(0, 10, 1.0).is_err());
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let result = ElevationGrid::from_vec(vec![0.0; 5], 2, 3, 1.0);
        assert!(matches!(result, Err(Error::InvalidDimensions { width: 3, height: 2 })));
    }

    #[test]
    fn test_grid_statistics_skip_nodata() {
        let mut grid = ElevationGrid::new(2, 3, 1.0);
        grid.set(0, 0, -50.0).unwrap();
        grid.set(0, 1, 150.0).unwrap();
        grid.set(1, 2, f64::NAN).unwrap();
        grid.set(1, 1, -9999.0).unwrap();
        grid.set_nodata(Some(-9999.0));

        let stats = grid.statistics();
        assert_eq!(stats.min, Some(-50.0));
        assert_eq!(stats.max, Some(150.0));
        assert_eq!(stats.valid_count, 4);
        assert_eq!(stats.nodata_count, 2);
        assert_relative_eq!(stats.mean.unwrap(), 25.0);
    }
}
