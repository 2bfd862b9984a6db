//! Raster-subsystem error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("raster data has {len} cells but {width} × {height} = {expected} were declared")]
    DimensionMismatch { width: usize, height: usize, expected: usize, len: usize },

    #[error("raster dimensions {width} × {height} overflow the cell count")]
    DimensionOverflow { width: usize, height: usize },
}

pub type RasterResult<T> = Result<T, RasterError>;
