//! The `CongestionStrategy` trait and configuration-driven construction.

use serde::{Deserialize, Serialize};

use amb_core::SimClock;
use amb_spatial::RoadNetwork;

use crate::{
    CongestionBounds, Frozen, IncidentModel, IncidentParams, RandomWalk, RandomWalkParams,
    Resample, TimeOfDay, TimeOfDayParams, TrafficError, TrafficResult,
};

/// Pluggable source of congestion changes.
///
/// The simulation calls [`tick`](Self::tick) on its congestion cadence,
/// before the ambulance re-evaluates its route.  Implementations own their
/// RNG, so the same seed reproduces the same sequence of factors.
///
/// # Example
///
/// ```rust,ignore
/// struct Gridlock;
///
/// impl CongestionStrategy for Gridlock {
///     fn name(&self) -> &'static str { "gridlock" }
///
///     fn tick(&mut self, _clock: &SimClock, network: &mut RoadNetwork) -> TrafficResult<usize> {
///         let all: Vec<_> = network.segments().collect();
///         for &s in &all {
///             network.update_congestion(s, 10.0)?;
///         }
///         Ok(all.len())
///     }
/// }
/// ```
pub trait CongestionStrategy: Send {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Apply one update.  Returns the number of segments whose factor changed.
    fn tick(&mut self, clock: &SimClock, network: &mut RoadNetwork) -> TrafficResult<usize>;

    /// Rewind run state (RNG stream, active incidents) for a new run.
    ///
    /// Default: nothing to rewind.
    fn reset(&mut self) {}
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Serializable description of a strategy.
///
/// ```json
/// { "kind": "random_walk", "sample_rate": 0.3, "volatility": 0.4 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyKind {
    RandomWalk(RandomWalkParams),
    Incident(IncidentParams),
    TimeOfDay(TimeOfDayParams),
    Resample,
    Frozen,
}

impl Default for StrategyKind {
    fn default() -> Self {
        StrategyKind::RandomWalk(RandomWalkParams::default())
    }
}

impl StrategyKind {
    /// All names accepted by [`from_name`](Self::from_name).
    pub const NAMES: [&'static str; 5] = ["random-walk", "incident", "time-of-day", "resample", "frozen"];

    /// The variant called `name`, with default parameters.
    ///
    /// Accepts `-` or `_` as the word separator.
    pub fn from_name(name: &str) -> TrafficResult<StrategyKind> {
        match name.trim().replace('_', "-").as_str() {
            "random-walk" => Ok(StrategyKind::RandomWalk(RandomWalkParams::default())),
            "incident" => Ok(StrategyKind::Incident(IncidentParams::default())),
            "time-of-day" => Ok(StrategyKind::TimeOfDay(TimeOfDayParams::default())),
            "resample" => Ok(StrategyKind::Resample),
            "frozen" => Ok(StrategyKind::Frozen),
            other => Err(TrafficError::Config(format!(
                "unknown congestion strategy {other:?}; expected one of {}",
                Self::NAMES.join(", ")
            ))),
        }
    }
}

/// Construct a boxed strategy from configuration.
///
/// `segment_count` is the size of the network the strategy will drive;
/// scripted incidents on segments outside it are rejected here rather than
/// mid-run.
pub fn build_strategy(
    kind: &StrategyKind,
    bounds: CongestionBounds,
    seed: u64,
    segment_count: usize,
) -> TrafficResult<Box<dyn CongestionStrategy>> {
    bounds.validate()?;
    let strategy: Box<dyn CongestionStrategy> = match kind {
        StrategyKind::RandomWalk(params) => Box::new(RandomWalk::new(bounds, params.clone(), seed)?),
        StrategyKind::Incident(params) => {
            if let Some(bad) = params
                .scripted
                .iter()
                .find(|i| i.segment.index() >= segment_count)
            {
                return Err(TrafficError::Config(format!(
                    "scripted incident targets {} but the network has {segment_count} segments",
                    bad.segment
                )));
            }
            Box::new(IncidentModel::new(bounds, params.clone(), seed)?)
        }
        StrategyKind::TimeOfDay(params) => {
            Box::new(TimeOfDay::new(bounds, params.clone(), seed, segment_count)?)
        }
        StrategyKind::Resample => Box::new(Resample::new(bounds, seed)),
        StrategyKind::Frozen => Box::new(Frozen),
    };
    log::debug!("congestion strategy {} built (seed {seed})", strategy.name());
    Ok(strategy)
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Replace the network's factors with `next` in one all-or-nothing write.
/// Returns the number of segments whose factor changed.
pub(crate) fn apply_factors(network: &mut RoadNetwork, next: &[f64]) -> TrafficResult<usize> {
    let changed = network
        .congestion_factors()
        .iter()
        .zip(next)
        .filter(|(old, new)| old != new)
        .count();
    network.set_congestion_factors(next)?;
    Ok(changed)
}

/// Reject a parameter outside `[lo, hi]`.
pub(crate) fn check_range(name: &str, value: f64, lo: f64, hi: f64) -> TrafficResult<()> {
    if value.is_finite() && (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(TrafficError::Config(format!("{name} must be in [{lo}, {hi}], got {value}")))
    }
}
