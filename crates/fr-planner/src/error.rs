use fr_core::CoreError;
use fr_network::NetworkError;
use fr_raster::RasterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("invalid input: {0}")]
    Core(#[from] CoreError),

    #[error("routing failed: {0}")]
    Network(#[from] NetworkError),

    #[error("hazard raster rejected: {0}")]
    Raster(#[from] RasterError),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
