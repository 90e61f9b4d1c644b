//! Point-in-time views of a running simulation.

use std::sync::{Arc, RwLock};

use amb_core::{Point, Tick};
use amb_spatial::Route;
use amb_vehicle::{AmbulanceState, Position};

/// Everything a renderer needs to draw one tick.
///
/// Owns copies of its data, so it stays valid while the simulation moves on.
#[derive(Clone, Debug, PartialEq)]
pub struct SimSnapshot {
    pub tick:           Tick,
    pub elapsed_secs:   i64,
    /// Congestion factor per segment, indexed by `SegmentId`.
    pub congestion:     Vec<f64>,
    pub state:          AmbulanceState,
    pub position:       Position,
    /// Interpolated map coordinate; `None` if the position is not on the
    /// network.
    pub coordinate:     Option<Point>,
    /// Remaining route, if one has been computed.
    pub route:          Option<Route>,
    pub remaining_cost: f64,
}

/// Latest snapshot, shared with a reader on another thread.
///
/// Written once per tick by [`SnapshotPublisher`]; readers take the read
/// lock, clone what they need and let go.
pub type SharedSnapshot = Arc<RwLock<Option<SimSnapshot>>>;

/// An empty [`SharedSnapshot`].
pub fn shared_snapshot() -> SharedSnapshot {
    Arc::new(RwLock::new(None))
}

/// Copy of the most recent snapshot, if any.
///
/// A poisoned lock still yields its last value.
pub fn latest(shared: &SharedSnapshot) -> Option<SimSnapshot> {
    match shared.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
