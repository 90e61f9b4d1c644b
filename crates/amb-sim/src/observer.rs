//! Simulation observer trait for visualisation and logging.

use amb_core::{JunctionId, SimClock, Tick};
use amb_vehicle::AmbulanceEvent;

use crate::{RunOutcome, SharedSnapshot, SimSnapshot};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] and
/// [`Sim::step`][crate::Sim::step].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: arrival printer
///
/// ```rust,ignore
/// struct ArrivalPrinter;
///
/// impl SimObserver for ArrivalPrinter {
///     fn on_event(&mut self, tick: Tick, event: &AmbulanceEvent) {
///         if let AmbulanceEvent::Arrived { path_taken } = event {
///             println!("{tick}: arrived via {path_taken:?}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once when `run` begins, before the first tick.
    fn on_run_start(&mut self, _clock: &SimClock, _source: JunctionId, _destination: JunctionId) {}

    /// Called for every ambulance event, in emission order.
    fn on_event(&mut self, _tick: Tick, _event: &AmbulanceEvent) {}

    /// Called at the end of every tick with a consistent snapshot.
    fn on_tick_end(&mut self, _snapshot: &SimSnapshot) {}

    /// Called once when `run` returns an outcome.
    fn on_run_end(&mut self, _outcome: &RunOutcome) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Publishes each tick's snapshot into a [`SharedSnapshot`].
///
/// The write lock is held only for the swap.  A poisoned lock is recovered
/// rather than propagated, since the snapshot is replaced wholesale.
pub struct SnapshotPublisher {
    shared: SharedSnapshot,
}

impl SnapshotPublisher {
    pub fn new(shared: SharedSnapshot) -> Self {
        Self { shared }
    }

    pub fn shared(&self) -> SharedSnapshot {
        self.shared.clone()
    }
}

impl SimObserver for SnapshotPublisher {
    fn on_tick_end(&mut self, snapshot: &SimSnapshot) {
        let fresh = Some(snapshot.clone());
        match self.shared.write() {
            Ok(mut guard) => *guard = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
    }
}

/// Fan out to two observers, first `.0` then `.1`.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_run_start(&mut self, clock: &SimClock, source: JunctionId, destination: JunctionId) {
        self.0.on_run_start(clock, source, destination);
        self.1.on_run_start(clock, source, destination);
    }

    fn on_event(&mut self, tick: Tick, event: &AmbulanceEvent) {
        self.0.on_event(tick, event);
        self.1.on_event(tick, event);
    }

    fn on_tick_end(&mut self, snapshot: &SimSnapshot) {
        self.0.on_tick_end(snapshot);
        self.1.on_tick_end(snapshot);
    }

    fn on_run_end(&mut self, outcome: &RunOutcome) {
        self.0.on_run_end(outcome);
        self.1.on_run_end(outcome);
    }
}
