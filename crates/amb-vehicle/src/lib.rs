//! `amb-vehicle`: the ambulance state machine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`ambulance`] | `Ambulance`: dispatch, per-tick advance, views            |
//! | [`state`]     | `AmbulanceState` lifecycle enum, `Position` on the network |
//! | [`event`]     | `AmbulanceEvent` emitted by each advance                   |
//! | [`config`]    | `AmbulanceConfig`, `MAX_SPEED`                             |
//! | [`error`]     | `VehicleError`, `VehicleResult<T>`                         |
//!
//! # Movement model
//!
//! Each tick the ambulance covers `speed * tick_duration_secs` length units
//! along its route, but never passes more than one junction: whatever is
//! left of the step on reaching a junction is dropped.  Junctions are the
//! only places a route can change.  There, on its re-evaluation cadence,
//! the ambulance asks the [`PathFinder`](amb_spatial::PathFinder) for a
//! fresh route under current congestion and switches if the new one beats
//! the remaining cost by more than `reroute_threshold`.  A switch costs the
//! tick: the ambulance holds at the junction and moves again next tick.

pub mod ambulance;
pub mod config;
pub mod error;
pub mod event;
pub mod state;


pub use ambulance::Ambulance;
pub use config::{AmbulanceConfig, MAX_SPEED};
pub use error::{VehicleError, VehicleResult};
pub use event::AmbulanceEvent;
pub use state::{AmbulanceState, Position};
