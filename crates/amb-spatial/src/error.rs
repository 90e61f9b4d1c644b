//! Spatial-subsystem error type.

use thiserror::Error;

use amb_core::{JunctionId, SegmentId};

/// Errors produced by `amb-spatial`.
///
/// Build-time variants (`DuplicateId`, `UnknownJunction`, `MalformedInput`)
/// abort network construction.  `InvalidCongestion` rejects a single update
/// and leaves the previous factor in place.  `NoPath` is a routing failure.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("junction {0} not found in network")]
    UnknownJunction(JunctionId),

    #[error("segment {0} not found in network")]
    UnknownSegment(SegmentId),

    #[error("junction {0} added twice")]
    DuplicateId(JunctionId),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invalid congestion factor {factor} for {segment}")]
    InvalidCongestion { segment: SegmentId, factor: f64 },

    #[error("no path from {from} to {to}")]
    NoPath { from: JunctionId, to: JunctionId },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
