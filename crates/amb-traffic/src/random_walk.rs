//! Mean-reverting bounded random walk.
//!
//! Each update, every segment is sampled with probability `sample_rate`.  A
//! sampled segment moves by
//!
//! ```text
//! f' = clamp(f + reversion * (baseline - f) + volatility * U(-1, 1))
//! ```
//!
//! The reversion term pulls factors back to `baseline`, so a long run
//! fluctuates around it instead of drifting to a bound.

use serde::{Deserialize, Serialize};

use amb_core::{SimClock, SimRng};
use amb_spatial::RoadNetwork;

use crate::strategy::{apply_factors, check_range};
use crate::{CongestionBounds, CongestionStrategy, TrafficError, TrafficResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomWalkParams {
    /// Fraction of segments stepped per update, in `[0, 1]`.
    pub sample_rate: f64,
    /// Pull toward `baseline` per update, in `[0, 1]`.
    pub reversion:   f64,
    /// Level the walk reverts to.  Must lie inside the bounds.
    pub baseline:    f64,
    /// Maximum random step size.
    pub volatility:  f64,
}

impl Default for RandomWalkParams {
    fn default() -> Self {
        Self {
            sample_rate: 0.25,
            reversion:   0.1,
            baseline:    1.5,
            volatility:  0.5,
        }
    }
}

pub struct RandomWalk {
    bounds: CongestionBounds,
    params: RandomWalkParams,
    seed:   u64,
    rng:    SimRng,
}

impl RandomWalk {
    pub fn new(bounds: CongestionBounds, params: RandomWalkParams, seed: u64) -> TrafficResult<Self> {
        check_range("sample_rate", params.sample_rate, 0.0, 1.0)?;
        check_range("reversion", params.reversion, 0.0, 1.0)?;
        if !params.volatility.is_finite() || params.volatility < 0.0 {
            return Err(TrafficError::Config(format!(
                "volatility must be finite and >= 0, got {}",
                params.volatility
            )));
        }
        if !bounds.contains(params.baseline) {
            return Err(TrafficError::Config(format!(
                "baseline {} lies outside [{}, {}]",
                params.baseline, bounds.min, bounds.max
            )));
        }
        Ok(Self { bounds, params, seed, rng: SimRng::new(seed) })
    }

    pub fn params(&self) -> &RandomWalkParams {
        &self.params
    }
}

impl CongestionStrategy for RandomWalk {
    fn name(&self) -> &'static str {
        "random-walk"
    }

    fn tick(&mut self, clock: &SimClock, network: &mut RoadNetwork) -> TrafficResult<usize> {
        let p = &self.params;
        let mut next = network.congestion_factors();
        for f in &mut next {
            if !self.rng.gen_bool(p.sample_rate) {
                continue;
            }
            let noise: f64 = self.rng.gen_range(-1.0..=1.0);
            *f = self.bounds.clamp(*f + p.reversion * (p.baseline - *f) + p.volatility * noise);
        }
        let changed = apply_factors(network, &next)?;
        log::debug!("{}: random walk moved {changed} segments", clock.current_tick);
        Ok(changed)
    }

    fn reset(&mut self) {
        self.rng = SimRng::new(self.seed);
    }
}
