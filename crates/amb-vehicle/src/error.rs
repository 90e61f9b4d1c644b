use amb_spatial::SpatialError;
use thiserror::Error;

use crate::AmbulanceState;

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("invalid ambulance configuration: {0}")]
    InvalidConfig(String),

    #[error("ambulance is already dispatched (state {0:?})")]
    AlreadyDispatched(AmbulanceState),

    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

pub type VehicleResult<T> = Result<T, VehicleError>;
