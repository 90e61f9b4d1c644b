//! Incidents that spike a segment's congestion and then clear.
//!
//! Each update:
//!
//! 1. every factor above the lower bound decays geometrically,
//!    `f' = min + (f - min) * decay`;
//! 2. scripted incidents whose tick has come raise their segment to the
//!    incident's peak;
//! 3. with probability `probability`, a random segment gets an incident
//!    with a peak drawn from the upper half of the bounds.
//!
//! An incident never lowers a factor that is already higher.

use serde::{Deserialize, Serialize};

use amb_core::{SegmentId, SimClock, SimRng, Tick};
use amb_spatial::{RoadNetwork, SpatialError};

use crate::strategy::{apply_factors, check_range};
use crate::{CongestionBounds, CongestionStrategy, TrafficError, TrafficResult};

/// Factors within this distance of the lower bound snap to it.
const SETTLE_EPSILON: f64 = 1e-6;

/// An incident fixed in advance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptedIncident {
    /// First tick on which the incident is in effect.
    pub tick:    Tick,
    pub segment: SegmentId,
    /// Congestion factor at the height of the incident (clamped to bounds).
    pub peak:    f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentParams {
    /// Chance of a random incident per update, in `[0, 1]`.
    pub probability: f64,
    /// Fraction of excess congestion kept per update, in `[0, 1)`.
    pub decay:       f64,
    pub scripted:    Vec<ScriptedIncident>,
}

impl Default for IncidentParams {
    fn default() -> Self {
        Self {
            probability: 0.05,
            decay:       0.9,
            scripted:    Vec::new(),
        }
    }
}

pub struct IncidentModel {
    bounds:        CongestionBounds,
    params:        IncidentParams,
    seed:          u64,
    rng:           SimRng,
    /// Index of the first scripted incident not yet applied.
    next_scripted: usize,
}

impl IncidentModel {
    pub fn new(bounds: CongestionBounds, mut params: IncidentParams, seed: u64) -> TrafficResult<Self> {
        check_range("probability", params.probability, 0.0, 1.0)?;
        if !params.decay.is_finite() || !(0.0..1.0).contains(&params.decay) {
            return Err(TrafficError::Config(format!("decay must be in [0, 1), got {}", params.decay)));
        }
        if let Some(bad) = params.scripted.iter().find(|i| !i.peak.is_finite()) {
            return Err(TrafficError::Config(format!(
                "scripted incident on {} has non-finite peak",
                bad.segment
            )));
        }
        // Stable: incidents sharing a tick apply in the order given.
        params.scripted.sort_by_key(|i| i.tick);
        Ok(Self { bounds, params, seed, rng: SimRng::new(seed), next_scripted: 0 })
    }

    /// Scripted incidents not yet applied.
    pub fn pending(&self) -> &[ScriptedIncident] {
        &self.params.scripted[self.next_scripted..]
    }
}

impl CongestionStrategy for IncidentModel {
    fn name(&self) -> &'static str {
        "incident"
    }

    fn tick(&mut self, clock: &SimClock, network: &mut RoadNetwork) -> TrafficResult<usize> {
        let now = clock.current_tick;
        let min = self.bounds.min;
        let mut next = network.congestion_factors();

        for f in &mut next {
            let decayed = min + (*f - min) * self.params.decay;
            *f = if decayed - min < SETTLE_EPSILON { min } else { self.bounds.clamp(decayed) };
        }

        while let Some(incident) = self.params.scripted.get(self.next_scripted) {
            if incident.tick > now {
                break;
            }
            let slot = next
                .get_mut(incident.segment.index())
                .ok_or(SpatialError::UnknownSegment(incident.segment))?;
            *slot = slot.max(self.bounds.clamp(incident.peak));
            log::info!("{now}: scripted incident on {} (factor {:.2})", incident.segment, *slot);
            self.next_scripted += 1;
        }

        if !next.is_empty() && self.rng.gen_bool(self.params.probability) {
            let ix = self.rng.gen_range(0..next.len());
            let midpoint = min + self.bounds.span() / 2.0;
            let peak: f64 = self.rng.gen_range(midpoint..=self.bounds.max);
            next[ix] = next[ix].max(peak);
            log::info!("{now}: random incident on {} (factor {:.2})", SegmentId(ix as u32), next[ix]);
        }

        let changed = apply_factors(network, &next)?;
        log::debug!("{now}: incident model changed {changed} segments");
        Ok(changed)
    }

    fn reset(&mut self) {
        self.rng = SimRng::new(self.seed);
        self.next_scripted = 0;
    }
}
