//! The ambulance state machine.

use amb_core::{JunctionId, Point, SimClock};
use amb_spatial::{PathFinder, RoadNetwork, Route, SpatialError, SpatialResult};

use crate::{AmbulanceConfig, AmbulanceEvent, AmbulanceState, Position, VehicleError, VehicleResult};

/// One ambulance travelling over a [`RoadNetwork`].
///
/// The ambulance does not own the network or the path finder; the caller
/// passes both to [`advance`](Self::advance) once per tick, after the
/// congestion strategy has run.
///
/// # Route bookkeeping
///
/// `route` always starts at the last junction the ambulance stood on.  While
/// on a segment, `route.segments[0]` is that segment; on reaching its far
/// end the first leg is dropped.
#[derive(Debug)]
pub struct Ambulance {
    config:      AmbulanceConfig,
    state:       AmbulanceState,
    position:    Position,
    destination: Option<JunctionId>,
    route:       Option<Route>,
    path_taken:  Vec<JunctionId>,
    failure:     Option<SpatialError>,
    /// Ticks spent moving since the last route evaluation.
    since_check: u64,
}

impl Ambulance {
    /// A new, idle ambulance standing at `start`.
    pub fn new(start: JunctionId, config: AmbulanceConfig) -> VehicleResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state:       AmbulanceState::Idle,
            position:    Position::AtJunction(start),
            destination: None,
            route:       None,
            path_taken:  vec![start],
            failure:     None,
            since_check: 0,
        })
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Send the ambulance to `destination`.  The route is planned on the
    /// next [`advance`](Self::advance).
    ///
    /// Allowed from `Idle`, `Arrived`, and `Failed`; the ambulance departs
    /// from wherever it stands.
    pub fn dispatch(&mut self, destination: JunctionId, network: &RoadNetwork) -> VehicleResult<()> {
        if self.state.is_active() {
            return Err(VehicleError::AlreadyDispatched(self.state));
        }
        // Idle and terminal states always stand on a junction.
        let Position::AtJunction(here) = self.position else {
            return Err(VehicleError::AlreadyDispatched(self.state));
        };
        if !network.contains(here) {
            return Err(SpatialError::UnknownJunction(here).into());
        }
        if !network.contains(destination) {
            return Err(SpatialError::UnknownJunction(destination).into());
        }

        self.state = AmbulanceState::RoutePlanning;
        self.destination = Some(destination);
        self.route = None;
        self.path_taken = vec![here];
        self.failure = None;
        self.since_check = 0;
        log::debug!("dispatched from {} to {}", network.label(here), network.label(destination));
        Ok(())
    }

    /// Return to `Idle` at `start`, dropping any dispatch in progress.
    pub fn reset(&mut self, start: JunctionId) {
        self.state = AmbulanceState::Idle;
        self.position = Position::AtJunction(start);
        self.destination = None;
        self.route = None;
        self.path_taken = vec![start];
        self.failure = None;
        self.since_check = 0;
    }

    /// Run one tick of the state machine.
    ///
    /// Never fails: a path-finding error moves the ambulance to `Failed` and
    /// is reported as an [`AmbulanceEvent::Failed`] event.
    pub fn advance<F>(&mut self, clock: &SimClock, network: &RoadNetwork, finder: &F) -> Vec<AmbulanceEvent>
    where
        F: PathFinder + ?Sized,
    {
        let mut events = Vec::new();
        match self.state {
            AmbulanceState::Idle | AmbulanceState::Arrived | AmbulanceState::Failed => {}
            AmbulanceState::RoutePlanning => self.plan(network, finder, &mut events),
            AmbulanceState::Traveling => {
                self.since_check += 1;
                let due = self.since_check >= self.config.reroute_interval_ticks;
                if let (true, Some(here)) = (due, self.position.junction()) {
                    self.since_check = 0;
                    if self.reevaluate(here, network, finder, &mut events) {
                        return events;
                    }
                }
                self.travel(clock, network, &mut events);
            }
            AmbulanceState::Rerouting => {
                self.since_check += 1;
                self.state = AmbulanceState::Traveling;
                self.travel(clock, network, &mut events);
            }
        }
        events
    }

    // ── Views ─────────────────────────────────────────────────────────────

    pub fn state(&self) -> AmbulanceState {
        self.state
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn destination(&self) -> Option<JunctionId> {
        self.destination
    }

    pub fn config(&self) -> &AmbulanceConfig {
        &self.config
    }

    /// Remaining part of the current route, if one has been computed.
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Junctions visited so far this dispatch, starting junction first.
    pub fn path_taken(&self) -> &[JunctionId] {
        &self.path_taken
    }

    /// The error behind the `Failed` state.
    pub fn failure(&self) -> Option<&SpatialError> {
        self.failure.as_ref()
    }

    /// Move the failure out, leaving the state untouched.
    pub fn take_failure(&mut self) -> Option<SpatialError> {
        self.failure.take()
    }

    /// Live cost of the rest of the journey: the uncovered part of the
    /// current segment plus every later leg.  0 without a route.
    pub fn remaining_cost(&self, network: &RoadNetwork) -> f64 {
        let Some(route) = &self.route else { return 0.0 };
        match self.position {
            Position::AtJunction(_) => route.current_cost(network),
            Position::OnSegment { segment, .. } => {
                let rest = route.segments.get(1..).unwrap_or(&[]);
                network.current_cost(segment) * (1.0 - self.position.progress()) + network.path_cost(rest)
            }
        }
    }

    /// Map coordinate, interpolated along the current segment.
    pub fn coordinate(&self, network: &RoadNetwork) -> SpatialResult<Point> {
        match self.position {
            Position::AtJunction(j) => network.junction_point(j),
            Position::OnSegment { from, to, .. } => {
                let a = network.junction_point(from)?;
                let b = network.junction_point(to)?;
                Ok(a.lerp(b, self.position.progress()))
            }
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn plan<F>(&mut self, network: &RoadNetwork, finder: &F, events: &mut Vec<AmbulanceEvent>)
    where
        F: PathFinder + ?Sized,
    {
        let (Some(here), Some(dest)) = (self.position.junction(), self.destination) else {
            self.state = AmbulanceState::Idle;
            return;
        };
        match finder.find_shortest_path(network, here, dest) {
            Ok(route) => {
                log::info!("route computed: {}", describe(network, &route));
                let trivial = route.is_trivial();
                self.route = Some(route.clone());
                self.state = AmbulanceState::Traveling;
                events.push(AmbulanceEvent::RouteComputed { route });
                if trivial {
                    self.arrive(network, events);
                }
            }
            Err(err) => self.fail(here, dest, err, network, events),
        }
    }

    /// Query a fresh route from `here`.  Returns `true` when the ambulance
    /// switched routes (and so holds position this tick) or failed.
    fn reevaluate<F>(
        &mut self,
        here: JunctionId,
        network: &RoadNetwork,
        finder: &F,
        events: &mut Vec<AmbulanceEvent>,
    ) -> bool
    where
        F: PathFinder + ?Sized,
    {
        let Some(dest) = self.destination else { return false };
        let fresh = match finder.find_shortest_path(network, here, dest) {
            Ok(route) => route,
            Err(err) => {
                self.fail(here, dest, err, network, events);
                return true;
            }
        };

        let remaining = self.remaining_cost(network);
        let same_path = self.route.as_ref().is_some_and(|r| r.junctions == fresh.junctions);
        if same_path || fresh.cost >= remaining * (1.0 - self.config.reroute_threshold) {
            log::debug!(
                "at {}: keeping route (remaining {remaining:.2}, best {:.2})",
                network.label(here),
                fresh.cost
            );
            return false;
        }

        log::info!(
            "rerouting at {}: {remaining:.2} -> {}",
            network.label(here),
            describe(network, &fresh)
        );
        self.route = Some(fresh.clone());
        self.state = AmbulanceState::Rerouting;
        events.push(AmbulanceEvent::Rerouted { at: here, previous_cost: remaining, new_route: fresh });
        true
    }

    /// Move `speed * tick_duration` along the route, stopping at the next
    /// junction even if some of the step is left over.
    fn travel(&mut self, clock: &SimClock, network: &RoadNetwork, events: &mut Vec<AmbulanceEvent>) {
        let step = self.config.speed * clock.tick_duration_secs as f64;

        let (segment, from, to, travelled, length) = match self.position {
            Position::OnSegment { segment, from, to, travelled, length } => (segment, from, to, travelled, length),
            Position::AtJunction(_) => {
                let Some((from, segment, to)) = self.route.as_ref().and_then(|r| r.legs().next()) else {
                    // Nothing left to drive: the route ends here.
                    self.arrive(network, events);
                    return;
                };
                (segment, from, to, 0.0, network.length(segment))
            }
        };

        let travelled = travelled + step;
        if travelled < length {
            self.position = Position::OnSegment { segment, from, to, travelled, length };
            return;
        }

        self.position = Position::AtJunction(to);
        self.path_taken.push(to);
        self.route = self.route.as_ref().map(|r| r.suffix(1, network));
        events.push(AmbulanceEvent::JunctionReached { junction: to });
        log::debug!("{}: reached {}", clock.current_tick, network.label(to));

        if Some(to) == self.destination {
            self.arrive(network, events);
        }
    }

    fn arrive(&mut self, network: &RoadNetwork, events: &mut Vec<AmbulanceEvent>) {
        self.state = AmbulanceState::Arrived;
        let labels: Vec<String> = self.path_taken.iter().map(|&j| network.label(j)).collect();
        log::info!("journey complete, path taken: {}", labels.join(" -> "));
        events.push(AmbulanceEvent::Arrived { path_taken: self.path_taken.clone() });
    }

    fn fail(
        &mut self,
        from: JunctionId,
        to: JunctionId,
        err: SpatialError,
        network: &RoadNetwork,
        events: &mut Vec<AmbulanceEvent>,
    ) {
        log::warn!("no route from {} to {}: {err}", network.label(from), network.label(to));
        self.state = AmbulanceState::Failed;
        self.failure = Some(err);
        events.push(AmbulanceEvent::Failed { from, to });
    }
}

fn describe(network: &RoadNetwork, route: &Route) -> String {
    let labels: Vec<String> = route.junctions.iter().map(|&j| network.label(j)).collect();
    format!("{} (cost {:.2})", labels.join(" -> "), route.cost)
}
