//! Console observer for the demo run.

use amb_core::{JunctionId, SimClock, Tick};
use amb_sim::{RunOutcome, SimObserver, SimSnapshot};
use amb_vehicle::AmbulanceEvent;

/// Logs run progress and keeps a few counters for the closing summary.
pub struct LoggingObserver {
    progress_every: u64,
    pub reroutes:          usize,
    pub junctions_reached: usize,
    pub peak_congestion:   f64,
    pub last_tick:         Tick,
}

impl LoggingObserver {
    /// Log a progress line every `progress_every` ticks (0 disables it).
    pub fn new(progress_every: u64) -> Self {
        Self {
            progress_every,
            reroutes:          0,
            junctions_reached: 0,
            peak_congestion:   1.0,
            last_tick:         Tick::ZERO,
        }
    }
}

impl SimObserver for LoggingObserver {
    fn on_run_start(&mut self, clock: &SimClock, source: JunctionId, destination: JunctionId) {
        log::info!("dispatch {source} -> {destination} at {clock}");
    }

    fn on_event(&mut self, tick: Tick, event: &AmbulanceEvent) {
        match event {
            AmbulanceEvent::RouteComputed { route } => log::debug!("{tick}: planned {route}"),
            AmbulanceEvent::Rerouted { at, previous_cost, new_route } => {
                self.reroutes += 1;
                log::debug!("{tick}: rerouted at {at} ({previous_cost:.1} -> {new_route})");
            }
            AmbulanceEvent::JunctionReached { junction } => {
                self.junctions_reached += 1;
                log::debug!("{tick}: at {junction}");
            }
            AmbulanceEvent::Arrived { .. } => log::debug!("{tick}: arrived"),
            AmbulanceEvent::Failed { from, to } => log::debug!("{tick}: no route {from} -> {to}"),
        }
    }

    fn on_tick_end(&mut self, snapshot: &SimSnapshot) {
        self.last_tick = snapshot.tick;
        let peak = snapshot.congestion.iter().copied().fold(1.0, f64::max);
        self.peak_congestion = self.peak_congestion.max(peak);

        if self.progress_every > 0 && snapshot.tick.0.is_multiple_of(self.progress_every) {
            let at = snapshot
                .coordinate
                .map(|p| format!("({:.0}, {:.0})", p.x, p.y))
                .unwrap_or_else(|| "?".into());
            log::info!(
                "{}: {:?} at {at}, {} | {:.0} cost units to go, worst segment x{peak:.2}",
                snapshot.tick,
                snapshot.state,
                snapshot.position,
                snapshot.remaining_cost,
            );
        }
    }

    fn on_run_end(&mut self, outcome: &RunOutcome) {
        match outcome {
            RunOutcome::Failed(err) => log::warn!("run failed: {err}"),
            other => log::info!("run finished: {other:?}"),
        }
    }
}
