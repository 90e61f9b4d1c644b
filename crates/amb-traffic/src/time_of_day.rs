//! Hourly rush-hour congestion.
//!
//! Every segment gets a fixed, seeded sensitivity `s` in `[0, 1]` (a ring
//! road jams, a back lane barely notices).  For the clock's hour of day `h`:
//!
//! ```text
//! f = min + (max - min) * weight[h] * s
//! ```
//!
//! Factors only move when the hour changes, and return to free flow
//! overnight.

use serde::{Deserialize, Serialize};

use amb_core::{SimClock, SimRng};
use amb_spatial::RoadNetwork;

use crate::strategy::{apply_factors, check_range};
use crate::{CongestionBounds, CongestionStrategy, TrafficResult};

/// Stream offset for the sensitivity draws.
const SENSITIVITY_STREAM: u64 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeOfDayParams {
    /// Congestion weight per hour (index 0 = midnight), each in `[0, 1]`.
    pub weights: [f64; 24],
}

impl Default for TimeOfDayParams {
    fn default() -> Self {
        Self { weights: Self::rush_hour() }
    }
}

impl TimeOfDayParams {
    /// Quiet nights, a morning peak at 08–09, a busy middle of the day and
    /// the heaviest traffic at 17–18.
    pub fn rush_hour() -> [f64; 24] {
        let mut w = [0.0_f64; 24];
        w[6] = 0.3;
        w[7] = 0.7;
        w[8] = 0.9;
        w[9] = 0.9;
        w[10] = 0.6;
        for slot in &mut w[11..16] {
            *slot = 0.5;
        }
        w[16] = 0.8;
        w[17] = 1.0;
        w[18] = 1.0;
        w[19] = 0.7;
        w[20] = 0.4;
        w[21] = 0.2;
        w
    }

    /// No time-of-day effect at all.
    pub fn flat() -> [f64; 24] {
        [0.0; 24]
    }
}

pub struct TimeOfDay {
    bounds:        CongestionBounds,
    params:        TimeOfDayParams,
    seed:          u64,
    sensitivities: Vec<f64>,
}

impl TimeOfDay {
    pub fn new(
        bounds: CongestionBounds,
        params: TimeOfDayParams,
        seed: u64,
        segment_count: usize,
    ) -> TrafficResult<Self> {
        for (hour, &w) in params.weights.iter().enumerate() {
            check_range(&format!("weights[{hour}]"), w, 0.0, 1.0)?;
        }
        Ok(Self {
            bounds,
            params,
            seed,
            sensitivities: draw_sensitivities(seed, segment_count),
        })
    }

    /// Per-segment sensitivity, indexed by `SegmentId`.
    pub fn sensitivities(&self) -> &[f64] {
        &self.sensitivities
    }

    /// Factor this strategy assigns to segment index `ix` at `hour`.
    pub fn factor_at(&self, ix: usize, hour: u32) -> f64 {
        let weight = self.params.weights[hour as usize % 24];
        let s = self.sensitivities.get(ix).copied().unwrap_or(0.0);
        self.bounds.lerp(weight * s)
    }
}

fn draw_sensitivities(seed: u64, count: usize) -> Vec<f64> {
    let mut rng = SimRng::new(seed).child(SENSITIVITY_STREAM);
    (0..count).map(|_| rng.gen_range(0.0..=1.0)).collect()
}

impl CongestionStrategy for TimeOfDay {
    fn name(&self) -> &'static str {
        "time-of-day"
    }

    fn tick(&mut self, clock: &SimClock, network: &mut RoadNetwork) -> TrafficResult<usize> {
        if self.sensitivities.len() != network.segment_count() {
            self.sensitivities = draw_sensitivities(self.seed, network.segment_count());
        }
        let hour = clock.hour_of_day();
        let next: Vec<f64> = (0..network.segment_count())
            .map(|ix| self.factor_at(ix, hour))
            .collect();
        let changed = apply_factors(network, &next)?;
        if changed > 0 {
            log::debug!("{}: hour {hour:02}, {changed} segments re-weighted", clock.current_tick);
        }
        Ok(changed)
    }
}
