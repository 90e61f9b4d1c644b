//! `amb-traffic`: congestion strategies that mutate live segment costs.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`strategy`]    | `CongestionStrategy` trait, `StrategyKind`, `build_strategy` |
//! | [`bounds`]      | `CongestionBounds`: the `[min, max]` factor range        |
//! | [`random_walk`] | `RandomWalk`: mean-reverting bounded random walk         |
//! | [`incident`]    | `IncidentModel`: scripted and random incidents that decay |
//! | [`time_of_day`] | `TimeOfDay`: hourly rush-hour curve per segment          |
//! | [`resample`]    | `Resample`: i.i.d. traffic level redrawn every update    |
//! | [`frozen`]      | `Frozen`: never changes anything                         |
//! | [`error`]       | `TrafficError`, `TrafficResult<T>`                        |
//!
//! # Design notes
//!
//! A strategy owns its RNG stream, seeded once at construction.  It only
//! writes through `RoadNetwork::update_congestion`, so the network's
//! `factor >= 1.0` invariant holds no matter which strategy is plugged in.
//! Every strategy clamps to its [`CongestionBounds`] and either reverts to
//! a baseline or decays, so factors never drift without bound.

pub mod bounds;
pub mod error;
pub mod frozen;
pub mod incident;
pub mod random_walk;
pub mod resample;
pub mod strategy;
pub mod time_of_day;


pub use bounds::CongestionBounds;
pub use error::{TrafficError, TrafficResult};
pub use frozen::Frozen;
pub use incident::{IncidentModel, IncidentParams, ScriptedIncident};
pub use random_walk::{RandomWalk, RandomWalkParams};
pub use resample::Resample;
pub use strategy::{build_strategy, CongestionStrategy, StrategyKind};
pub use time_of_day::{TimeOfDay, TimeOfDayParams};
