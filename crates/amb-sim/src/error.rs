use amb_spatial::SpatialError;
use amb_traffic::TrafficError;
use amb_vehicle::VehicleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("ambulance error: {0}")]
    Vehicle(#[from] VehicleError),

    #[error("congestion error: {0}")]
    Traffic(#[from] TrafficError),

    #[error("network error: {0}")]
    Spatial(#[from] SpatialError),
}

pub type SimResult<T> = Result<T, SimError>;
