//! Optional JSON run configuration.
//!
//! Every section may be omitted:
//!
//! ```json
//! {
//!   "sim":       { "tick_duration_secs": 1, "max_ticks": 7200, "seed": 7 },
//!   "ambulance": { "speed": 12.5, "reroute_threshold": 0.15 },
//!   "strategy":  { "kind": "incident", "probability": 0.02, "decay": 0.95, "scripted": [] },
//!   "bounds":    { "min": 1.0, "max": 4.0 }
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use amb_core::SimConfig;
use amb_traffic::{CongestionBounds, StrategyKind};
use amb_vehicle::AmbulanceConfig;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    pub sim:       SimConfig,
    pub ambulance: AmbulanceConfig,
    pub strategy:  StrategyKind,
    pub bounds:    CongestionBounds,
}

impl DemoConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
