//! The `Sim` struct and its tick loop.

use amb_core::{JunctionId, SimClock, SimConfig, Tick};
use amb_spatial::{PathFinder, RoadNetwork, SpatialError};
use amb_traffic::CongestionStrategy;
use amb_vehicle::{Ambulance, AmbulanceEvent, AmbulanceState};

use crate::{SimError, SimObserver, SimResult, SimSnapshot, StopHandle};

// ── RunOutcome ────────────────────────────────────────────────────────────────

/// Why [`Sim::run`] returned.
#[derive(Debug)]
pub enum RunOutcome {
    /// The ambulance reached its destination at `tick`.
    Arrived { tick: Tick, path_taken: Vec<JunctionId> },
    /// No route to the destination exists.
    Failed(SpatialError),
    /// A [`StopHandle`] asked the loop to stop; resumable with another `run`
    /// once the request is cleared.
    Stopped { tick: Tick },
    /// `config.max_ticks` elapsed first.
    TickLimitReached { tick: Tick },
}

impl RunOutcome {
    pub fn is_arrived(&self) -> bool {
        matches!(self, RunOutcome::Arrived { .. })
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<F>` owns the network, the congestion strategy and the ambulance, and
/// drives them one tick at a time:
///
/// 1. **Clock**: advance to the next tick.
/// 2. **Congestion**: on every `congestion_interval_ticks`-th tick the
///    strategy updates segment factors.
/// 3. **Ambulance**: plan, re-evaluate, or move (see [`Ambulance::advance`]).
/// 4. **Observe**: forward events, then hand the observer a snapshot.
///
/// A tick is never observed half-done: observers and stop requests only see
/// the state between ticks.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<F: PathFinder> {
    /// Run configuration (tick duration, limit, seed, cadence).
    pub config: SimConfig,

    /// Simulation clock: tracks the current tick and maps to wall time.
    pub clock: SimClock,

    /// Road network.  Only congestion changes during a run.
    pub network: RoadNetwork,

    /// Congestion factors every run starts from: the network's factors as
    /// handed to the builder.
    pub initial_congestion: Vec<f64>,

    /// The congestion strategy.
    pub strategy: Box<dyn CongestionStrategy>,

    pub ambulance: Ambulance,

    /// The routing algorithm.
    pub finder: F,

    pub(crate) source:      JunctionId,
    pub(crate) destination: JunctionId,
    pub(crate) stop:        StopHandle,
}

impl<F: PathFinder> Sim<F> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the ambulance arrives or fails, a stop is requested, or
    /// `config.max_ticks` is reached.
    ///
    /// Errors only on a broken invariant (a strategy writing an invalid
    /// factor) or when nothing has been dispatched; an unreachable
    /// destination is the [`RunOutcome::Failed`] outcome, not an error.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunOutcome> {
        if self.ambulance.state() == AmbulanceState::Idle {
            return Err(SimError::Config("no dispatch in progress; call start first".into()));
        }

        observer.on_run_start(&self.clock, self.source, self.destination);
        log::info!(
            "run from {} to {} starting at {}",
            self.network.label(self.source),
            self.network.label(self.destination),
            self.clock
        );

        let outcome = loop {
            let now = self.clock.current_tick;
            match self.ambulance.state() {
                AmbulanceState::Arrived => {
                    break RunOutcome::Arrived { tick: now, path_taken: self.ambulance.path_taken().to_vec() };
                }
                AmbulanceState::Failed => {
                    // Routing fails at a junction, so the position names where.
                    let error = self.ambulance.take_failure().unwrap_or(SpatialError::NoPath {
                        from: self.ambulance.position().junction().unwrap_or(self.source),
                        to:   self.ambulance.destination().unwrap_or(self.destination),
                    });
                    break RunOutcome::Failed(error);
                }
                _ => {}
            }
            if self.stop.is_stop_requested() {
                break RunOutcome::Stopped { tick: now };
            }
            if now >= self.config.end_tick() {
                break RunOutcome::TickLimitReached { tick: now };
            }
            self.step(observer)?;
        };

        match &outcome {
            RunOutcome::Failed(err) => log::warn!("run failed at {}: {err}", self.clock),
            other => log::info!("run ended at {}: {other:?}", self.clock),
        }
        observer.on_run_end(&outcome);
        Ok(outcome)
    }

    /// Advance exactly one tick.  Returns the ambulance events of the tick.
    ///
    /// If the congestion strategy fails, the clock stays on the previous
    /// tick and the ambulance does not move.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Vec<AmbulanceEvent>> {
        let mut next = self.clock.clone();
        next.advance();
        let now = next.current_tick;

        if next.is_due(self.config.congestion_interval_ticks) {
            let changed = self.strategy.tick(&next, &mut self.network)?;
            log::debug!("{now}: {} changed {changed} segments", self.strategy.name());
        }
        self.clock = next;

        let events = self.ambulance.advance(&self.clock, &self.network, &self.finder);
        for event in &events {
            observer.on_event(now, event);
        }
        observer.on_tick_end(&self.snapshot());
        Ok(events)
    }

    /// Begin a new run from `source` to `destination`.
    ///
    /// Rewinds the clock, restores [`initial_congestion`](Self::initial_congestion),
    /// replays the strategy's random stream from its seed and dispatches the
    /// ambulance.  A pending stop request stays pending.
    pub fn start(&mut self, source: JunctionId, destination: JunctionId) -> SimResult<()> {
        for j in [source, destination] {
            if !self.network.contains(j) {
                return Err(SpatialError::UnknownJunction(j).into());
            }
        }
        self.source = source;
        self.destination = destination;
        self.rewind()?;
        self.ambulance.dispatch(destination, &self.network)?;
        Ok(())
    }

    /// Rewind everything to tick 0 with the ambulance idle at the source,
    /// and clear any stop request.
    pub fn reset(&mut self) -> SimResult<()> {
        self.rewind()?;
        self.stop.clear();
        Ok(())
    }

    /// A handle another thread can use to stop [`run`](Self::run).
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn source(&self) -> JunctionId {
        self.source
    }

    pub fn destination(&self) -> JunctionId {
        self.destination
    }

    fn rewind(&mut self) -> SimResult<()> {
        self.network.set_congestion_factors(&self.initial_congestion)?;
        self.clock.reset();
        self.strategy.reset();
        self.ambulance.reset(self.source);
        Ok(())
    }

    /// Consistent copy of the current state.
    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            tick:           self.clock.current_tick,
            elapsed_secs:   self.clock.elapsed_secs(),
            congestion:     self.network.congestion_factors(),
            state:          self.ambulance.state(),
            position:       self.ambulance.position(),
            coordinate:     self.ambulance.coordinate(&self.network).ok(),
            route:          self.ambulance.route().cloned(),
            remaining_cost: self.ambulance.remaining_cost(&self.network),
        }
    }
}
