//! Events emitted by [`Ambulance::advance`](crate::Ambulance::advance).

use amb_core::JunctionId;
use amb_spatial::Route;

#[derive(Clone, Debug, PartialEq)]
pub enum AmbulanceEvent {
    /// The first route of a dispatch was computed.
    RouteComputed { route: Route },

    /// A cheaper route replaced the current one at junction `at`.
    /// `previous_cost` is the live cost of the abandoned remainder.
    Rerouted {
        at:            JunctionId,
        previous_cost: f64,
        new_route:     Route,
    },

    /// The ambulance reached `junction` on its route.
    JunctionReached { junction: JunctionId },

    /// The destination was reached; `path_taken` lists every junction
    /// visited, starting junction first.
    Arrived { path_taken: Vec<JunctionId> },

    /// No route from `from` to `to` exists under current costs.
    Failed { from: JunctionId, to: JunctionId },
}
