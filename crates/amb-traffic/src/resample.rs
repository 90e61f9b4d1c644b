//! Independent redraw of every segment's traffic level.
//!
//! Each update draws an integer traffic level in `0..=100` per segment and
//! maps it linearly onto the bounds: level 0 is free flow (`min`), level
//! 100 is `max`.  Successive draws are independent, so the process is
//! stationary around the midpoint of the range.

use amb_core::{SimClock, SimRng};
use amb_spatial::RoadNetwork;

use crate::strategy::apply_factors;
use crate::{CongestionBounds, CongestionStrategy, TrafficResult};

/// Highest traffic level a draw can produce.
pub const MAX_TRAFFIC_LEVEL: u32 = 100;

pub struct Resample {
    bounds: CongestionBounds,
    seed:   u64,
    rng:    SimRng,
}

impl Resample {
    pub fn new(bounds: CongestionBounds, seed: u64) -> Self {
        Self { bounds, seed, rng: SimRng::new(seed) }
    }

    /// Factor for a traffic level in `0..=MAX_TRAFFIC_LEVEL`.
    pub fn factor_for_level(&self, level: u32) -> f64 {
        level_to_factor(&self.bounds, level)
    }
}

fn level_to_factor(bounds: &CongestionBounds, level: u32) -> f64 {
    let t = level.min(MAX_TRAFFIC_LEVEL) as f64 / MAX_TRAFFIC_LEVEL as f64;
    bounds.lerp(t)
}

impl CongestionStrategy for Resample {
    fn name(&self) -> &'static str {
        "resample"
    }

    fn tick(&mut self, clock: &SimClock, network: &mut RoadNetwork) -> TrafficResult<usize> {
        let bounds = self.bounds;
        let next: Vec<f64> = (0..network.segment_count())
            .map(|_| level_to_factor(&bounds, self.rng.gen_range(0..=MAX_TRAFFIC_LEVEL)))
            .collect();
        let changed = apply_factors(network, &next)?;
        log::debug!("{}: resampled traffic on {changed} segments", clock.current_tick);
        Ok(changed)
    }

    fn reset(&mut self) {
        self.rng = SimRng::new(self.seed);
    }
}
