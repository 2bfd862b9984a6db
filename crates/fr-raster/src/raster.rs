//! Raster grid and its georeferencing.
//!
//! Cells are row-major with row 0 at the top (northern edge).  A cell is a
//! hazard when its value is strictly positive; zero, negative, and NaN are
//! all dry.

use fr_core::BBox;

use crate::{RasterError, RasterResult};

/// A single-band raster.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Raster {
    /// Wrap row-major `data`.  Fails unless `data.len() == width * height`.
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> RasterResult<Self> {
        let expected = cell_count(width, height)?;
        if data.len() != expected {
            return Err(RasterError::DimensionMismatch { width, height, expected, len: data.len() });
        }
        Ok(Self { width, height, data })
    }

    /// An all-dry raster.
    pub fn zeros(width: usize, height: usize) -> RasterResult<Self> {
        let cells = cell_count(width, height)?;
        Ok(Self { width, height, data: vec![0.0; cells] })
    }

    /// Build a raster by evaluating `f(col, row)` for every cell.
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> f32) -> RasterResult<Self> {
        let cells = cell_count(width, height)?;
        let mut data = Vec::with_capacity(cells);
        for row in 0..height {
            data.extend((0..width).map(|col| f(col, row)));
        }
        Ok(Self { width, height, data })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Cell value, or `None` outside the grid.
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Option<f32> {
        (col < self.width && row < self.height).then(|| self.data[row * self.width + col])
    }

    #[inline]
    pub fn is_hazard(&self, col: usize, row: usize) -> bool {
        self.get(col, row).is_some_and(|v| v > 0.0)
    }

    pub fn hazard_count(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0.0).count()
    }

    pub(crate) fn set(&mut self, col: usize, row: usize, value: f32) {
        self.data[row * self.width + col] = value;
    }
}

fn cell_count(width: usize, height: usize) -> RasterResult<usize> {
    width
        .checked_mul(height)
        .ok_or(RasterError::DimensionOverflow { width, height })
}

// ── GeoTransform ──────────────────────────────────────────────────────────────

/// Affine mapping from pixel-corner coordinates to lon/lat, north-up.
///
/// ```text
/// lon = origin_lon + x · pixel_width
/// lat = origin_lat + y · pixel_height      (pixel_height < 0)
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoTransform {
    pub origin_lon: f64,
    pub origin_lat: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
}

impl GeoTransform {
    /// Stretch a `width × height` grid over `bbox`, origin at the
    /// upper-left corner.  `None` for a degenerate box or an empty grid.
    pub fn from_bbox(bbox: &BBox, width: usize, height: usize) -> Option<Self> {
        if bbox.is_degenerate() || width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            origin_lon:   bbox.min_lon,
            origin_lat:   bbox.max_lat,
            pixel_width:  bbox.width() / width as f64,
            pixel_height: -(bbox.height() / height as f64),
        })
    }

    /// Lon/lat of the pixel-grid vertex `(x, y)`; `(0, 0)` is the
    /// upper-left corner of the raster.
    #[inline]
    pub fn vertex(&self, x: i64, y: i64) -> (f64, f64) {
        (
            self.origin_lon + x as f64 * self.pixel_width,
            self.origin_lat + y as f64 * self.pixel_height,
        )
    }
}
