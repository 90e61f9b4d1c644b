//! `amb-sim`: tick loop driver for the ambulance routing simulator.
//!
//! # Tick loop
//!
//! ```text
//! loop (until arrived / failed / stop requested / max_ticks):
//!   ① Clock     : advance one tick.
//!   ② Congestion: every congestion_interval_ticks: strategy.tick(network).
//!   ③ Ambulance : plan the route, re-evaluate at junctions, or move.
//!   ④ Observe   : on_event for each ambulance event, then on_tick_end
//!                  with a SimSnapshot.
//! ```
//!
//! # Threading
//!
//! The loop is single-threaded.  A UI on another thread holds a
//! [`StopHandle`] to end a run between ticks and reads the latest
//! [`SimSnapshot`] through a [`SharedSnapshot`] filled by
//! [`SnapshotPublisher`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use amb_core::SimConfig;
//! use amb_sim::{NoopObserver, SimBuilder};
//! use amb_spatial::DijkstraPathFinder;
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), network, DijkstraPathFinder)
//!     .route(source, destination)
//!     .build()?;
//! let outcome = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod control;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;


pub use builder::SimBuilder;
pub use control::StopHandle;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, SnapshotPublisher};
pub use sim::{RunOutcome, Sim};
pub use snapshot::{latest, shared_snapshot, SharedSnapshot, SimSnapshot};
