//! A strategy that never touches the network.

use amb_core::SimClock;
use amb_spatial::RoadNetwork;

use crate::{CongestionStrategy, TrafficResult};

/// Leaves every congestion factor where it is.
///
/// Useful in tests and for runs where the caller sets congestion by hand.
#[derive(Clone, Copy, Debug, Default)]
pub struct Frozen;

impl CongestionStrategy for Frozen {
    fn name(&self) -> &'static str {
        "frozen"
    }

    fn tick(&mut self, _clock: &SimClock, _network: &mut RoadNetwork) -> TrafficResult<usize> {
        Ok(0)
    }
}
