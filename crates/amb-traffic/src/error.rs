use thiserror::Error;

use amb_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum TrafficError {
    #[error("congestion configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

pub type TrafficResult<T> = Result<T, TrafficError>;
