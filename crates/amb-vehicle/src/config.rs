//! Ambulance tuning parameters.

use crate::{VehicleError, VehicleResult};

/// Fastest accepted ambulance speed, in length units per second.
pub const MAX_SPEED: f64 = 200.0;

/// Per-ambulance configuration.
///
/// Typically loaded from the application's JSON config alongside
/// `SimConfig`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AmbulanceConfig {
    /// Map length units travelled per simulated second.  In `(0, MAX_SPEED]`.
    pub speed: f64,

    /// Minimum relative improvement a fresh route needs before it replaces
    /// the current one: replace when `fresh < remaining * (1 - threshold)`.
    /// In `[0, 1)`; 0 takes any strictly cheaper route.
    pub reroute_threshold: f64,

    /// Re-query the path finder at most once per this many ticks, and only
    /// while standing at a junction.  At least 1.
    pub reroute_interval_ticks: u64,
}

impl Default for AmbulanceConfig {
    fn default() -> Self {
        Self {
            speed:                  10.0,
            reroute_threshold:      0.1,
            reroute_interval_ticks: 1,
        }
    }
}

impl AmbulanceConfig {
    pub fn with_speed(speed: f64) -> Self {
        Self { speed, ..Self::default() }
    }

    pub fn validate(&self) -> VehicleResult<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 || self.speed > MAX_SPEED {
            return Err(VehicleError::InvalidConfig(format!(
                "speed must be in (0, {MAX_SPEED}], got {}",
                self.speed
            )));
        }
        if !self.reroute_threshold.is_finite() || !(0.0..1.0).contains(&self.reroute_threshold) {
            return Err(VehicleError::InvalidConfig(format!(
                "reroute_threshold must be in [0, 1), got {}",
                self.reroute_threshold
            )));
        }
        if self.reroute_interval_ticks == 0 {
            return Err(VehicleError::InvalidConfig("reroute_interval_ticks must be at least 1".into()));
        }
        Ok(())
    }
}
