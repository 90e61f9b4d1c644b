//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  The mapping to
//! wall-clock time is held in `SimClock`:
//!
//!   wall_time = start_unix_secs + tick * tick_duration_secs
//!
//! Using an integer tick as the canonical time unit keeps cadence checks
//! ("every N ticks") exact and comparisons O(1).
//!
//! The default tick duration is 1 s; ambulance speed is expressed in map
//! length units per second, so one tick moves `speed * tick_duration_secs`.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self` (saturating at zero).
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Discrete simulation clock.
///
/// `SimClock` holds no heap data and is cheap to clone; observers receive it
/// by reference each tick.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: i64,
    /// How many simulated seconds one tick represents.
    pub tick_duration_secs: u32,
    /// The current tick: advanced by [`SimClock::advance`] each step.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock at tick 0 with the given resolution.
    pub fn new(start_unix_secs: i64, tick_duration_secs: u32) -> Self {
        Self {
            start_unix_secs,
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Rewind to tick 0 for a new run.
    #[inline]
    pub fn reset(&mut self) {
        self.current_tick = Tick::ZERO;
    }

    /// `true` when the current tick falls on an `interval`-tick cadence.
    ///
    /// An interval of 0 or 1 is due on every tick.
    #[inline]
    pub fn is_due(&self, interval_ticks: u64) -> bool {
        interval_ticks <= 1 || self.current_tick.0.is_multiple_of(interval_ticks)
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> i64 {
        self.current_tick.0 as i64 * self.tick_duration_secs as i64
    }

    /// Current Unix timestamp corresponding to `current_tick`.
    #[inline]
    pub fn current_unix_secs(&self) -> i64 {
        self.start_unix_secs + self.elapsed_secs()
    }

    /// Hour of day (0–23, UTC) of the current tick.
    #[inline]
    pub fn hour_of_day(&self) -> u32 {
        (self.current_unix_secs().rem_euclid(86_400) / 3_600) as u32
    }

    /// Break elapsed time into (hour, minute, second) components from start.
    pub fn elapsed_hms(&self) -> (u64, u32, u32) {
        let total_secs = self.elapsed_secs().max(0) as u64;
        let hours = total_secs / 3_600;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        let seconds = (total_secs % 60) as u32;
        (hours, minutes, seconds)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.elapsed_hms();
        write!(f, "{} (+{:02}:{:02}:{:02})", self.current_tick, h, m, s)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Unix timestamp for tick 0.  Time-of-day congestion reads the hour from
    /// this, so pick a morning start to see rush-hour traffic.
    pub start_unix_secs: i64,

    /// Seconds per tick.  Default: 1.
    pub tick_duration_secs: u32,

    /// Safety limit: a run that has neither arrived nor failed after this many
    /// ticks stops with `TickLimitReached`.
    pub max_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Run the congestion strategy every N ticks.  1 = every tick.
    pub congestion_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_unix_secs:           0,
            tick_duration_secs:        1,
            max_ticks:                 100_000,
            seed:                      42,
            congestion_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// The tick at which the run gives up (inclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.max_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs, self.tick_duration_secs)
    }

    /// Reject configurations the tick loop cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_secs == 0 {
            return Err(CoreError::Config("tick_duration_secs must be at least 1".into()));
        }
        if self.max_ticks == 0 {
            return Err(CoreError::Config("max_ticks must be at least 1".into()));
        }
        if self.congestion_interval_ticks == 0 {
            return Err(CoreError::Config("congestion_interval_ticks must be at least 1".into()));
        }
        Ok(())
    }
}
