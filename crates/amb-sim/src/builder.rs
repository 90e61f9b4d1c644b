//! Fluent builder for constructing a [`Sim`].

use amb_core::{JunctionId, SimConfig};
use amb_spatial::{PathFinder, RoadNetwork, SpatialError};
use amb_traffic::{build_strategy, CongestionBounds, CongestionStrategy, StrategyKind};
use amb_vehicle::{Ambulance, AmbulanceConfig};

use crate::{Sim, SimError, SimResult, StopHandle};

/// Fluent builder for [`Sim<F>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: tick duration, tick limit, seed, congestion cadence
/// - [`RoadNetwork`]: from a `RoadNetworkBuilder` or the CSV loader; its
///   congestion factors at build time are where every run starts
/// - `F: PathFinder`: the routing algorithm (e.g. [`amb_spatial::DijkstraPathFinder`])
/// - `.route(source, destination)`: where the ambulance starts and goes
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                                  |
/// |-------------------------|------------------------------------------|
/// | `.ambulance(c)`         | `AmbulanceConfig::default()`             |
/// | `.strategy_kind(k)`     | `StrategyKind::default()` (random walk)  |
/// | `.bounds(b)`            | `CongestionBounds::default()`            |
/// | `.strategy(s)`          | built from kind + bounds + `config.seed` |
/// | `.stop_handle(h)`       | a fresh handle                           |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, network, AStarPathFinder)
///     .route(source, destination)
///     .strategy_kind(StrategyKind::from_name("incident")?)
///     .build()?;
/// let outcome = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<F: PathFinder> {
    config:    SimConfig,
    network:   RoadNetwork,
    finder:    F,
    route:     Option<(JunctionId, JunctionId)>,
    ambulance: AmbulanceConfig,
    kind:      StrategyKind,
    bounds:    CongestionBounds,
    strategy:  Option<Box<dyn CongestionStrategy>>,
    stop:      Option<StopHandle>,
}

impl<F: PathFinder> SimBuilder<F> {
    /// Create a builder with the required inputs.
    pub fn new(config: SimConfig, network: RoadNetwork, finder: F) -> Self {
        Self {
            config,
            network,
            finder,
            route:     None,
            ambulance: AmbulanceConfig::default(),
            kind:      StrategyKind::default(),
            bounds:    CongestionBounds::default(),
            strategy:  None,
            stop:      None,
        }
    }

    /// Source and destination junctions of the first run.
    pub fn route(mut self, source: JunctionId, destination: JunctionId) -> Self {
        self.route = Some((source, destination));
        self
    }

    pub fn ambulance(mut self, config: AmbulanceConfig) -> Self {
        self.ambulance = config;
        self
    }

    /// Which congestion strategy to build.  Ignored if
    /// [`strategy`](Self::strategy) supplies one directly.
    pub fn strategy_kind(mut self, kind: StrategyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn bounds(mut self, bounds: CongestionBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Supply a ready-made strategy (e.g. a custom implementation).
    pub fn strategy(mut self, strategy: Box<dyn CongestionStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Share an existing stop handle (e.g. one a UI already holds).
    pub fn stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Validate inputs, build the strategy and ambulance, dispatch, and return
    /// a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<F>> {
        self.config.validate().map_err(|e| SimError::Config(e.to_string()))?;

        let (source, destination) = self
            .route
            .ok_or_else(|| SimError::Config("no route given; call .route(source, destination)".into()))?;
        for j in [source, destination] {
            if !self.network.contains(j) {
                return Err(SpatialError::UnknownJunction(j).into());
            }
        }

        let strategy = match self.strategy {
            Some(s) => s,
            None => build_strategy(&self.kind, self.bounds, self.config.seed, self.network.segment_count())?,
        };
        let ambulance = Ambulance::new(source, self.ambulance)?;

        let mut sim = Sim {
            clock: self.config.make_clock(),
            config: self.config,
            initial_congestion: self.network.congestion_factors(),
            network: self.network,
            strategy,
            ambulance,
            finder: self.finder,
            source,
            destination,
            stop: self.stop.unwrap_or_default(),
        };
        sim.start(source, destination)?;
        Ok(sim)
    }
}
