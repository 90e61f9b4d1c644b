//! `amb-core`: foundational types for the ambulance routing simulator.
//!
//! This crate is a dependency of every other `amb-*` crate.  It has no
//! `amb-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `JunctionId`, `SegmentId`                             |
//! | [`geo`]     | `Point`, Euclidean distance and interpolation         |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]     | `SimRng` (seeded, deterministic)                      |
//! | [`error`]   | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{JunctionId, SegmentId};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
