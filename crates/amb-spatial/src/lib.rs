//! `amb-spatial`: road network, live congestion costs, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (CSR + R-tree + congestion), `RoadNetworkBuilder` |
//! | [`router`]  | `PathFinder` trait, `Route`, `DijkstraPathFinder`, `AStarPathFinder` |
//! | [`loader`]  | `JunctionRecord`/`SegmentRecord`, CSV table loading           |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `amb-core` types.       |

pub mod error;
pub mod loader;
pub mod network;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use loader::{load_network_csv, load_network_readers, JunctionRecord, SegmentRecord};
pub use network::{Incidence, RoadNetwork, RoadNetworkBuilder, MIN_CONGESTION};
pub use router::{AStarPathFinder, DijkstraPathFinder, PathFinder, Route};
