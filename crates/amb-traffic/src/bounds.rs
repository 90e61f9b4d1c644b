//! The factor range every strategy clamps to.

use serde::{Deserialize, Serialize};

use amb_spatial::MIN_CONGESTION;

use crate::{TrafficError, TrafficResult};

/// Inclusive `[min, max]` range for congestion factors.
///
/// `min` may not go below [`MIN_CONGESTION`]; strategies decay and revert
/// toward `min`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CongestionBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for CongestionBounds {
    fn default() -> Self {
        Self { min: MIN_CONGESTION, max: 5.0 }
    }
}

impl CongestionBounds {
    pub fn new(min: f64, max: f64) -> TrafficResult<Self> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> TrafficResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(TrafficError::Config(format!(
                "congestion bounds must be finite, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min < MIN_CONGESTION {
            return Err(TrafficError::Config(format!(
                "congestion lower bound {} is below {MIN_CONGESTION}",
                self.min
            )));
        }
        if self.max < self.min {
            return Err(TrafficError::Config(format!(
                "congestion upper bound {} is below lower bound {}",
                self.max, self.min
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn clamp(&self, factor: f64) -> f64 {
        factor.clamp(self.min, self.max)
    }

    /// `true` if `factor` lies inside the range.
    #[inline]
    pub fn contains(&self, factor: f64) -> bool {
        (self.min..=self.max).contains(&factor)
    }

    /// Width of the range, `max - min`.
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Map `t` in `[0, 1]` linearly onto the range.
    #[inline]
    pub fn lerp(&self, t: f64) -> f64 {
        self.clamp(self.min + self.span() * t)
    }
}
