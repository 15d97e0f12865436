//! # Simulation Tick Loop
//!
//! Fixed-timestep loop, 30 Hz by default, decoupled from any render cadence.
//!
//! ## Design
//!
//! The tick loop must:
//! - Fire at a constant rate regardless of per-tick processing time
//! - Never allocate
//! - Report when ticks run over budget

use std::time::{Duration, Instant};

/// Default simulation tick rate in Hz.
pub const SIM_TICK_RATE: u32 = 30;

/// Fixed-timestep tick scheduler.
///
/// Accumulates wall-clock time and releases one tick per fixed interval.
/// Consecutive `tick_due` calls after a long stall release the backlog one
/// tick at a time, keeping simulated time consistent.
pub struct TickLoop {
    /// Target interval between ticks.
    interval: Duration,
    /// Wall-clock time of the last accumulator update.
    last_update: Instant,
    /// Unspent wall-clock time.
    accumulator: Duration,
    /// Ticks released so far.
    ticks: u64,
    /// Timing statistics.
    stats: TickStats,
}

/// Tick timing statistics.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickStats {
    /// Shortest observed tick, in microseconds.
    pub min_us: u64,
    /// Longest observed tick, in microseconds.
    pub max_us: u64,
    /// Rolling average tick duration, in microseconds.
    pub avg_us: u64,
    /// Ticks that ran past their budget.
    pub late: u64,
    /// Ticks measured.
    pub measured: u64,
}

impl TickLoop {
    /// Creates a tick loop firing `rate` times per second.
    ///
    /// # Panics
    ///
    /// Panics if `rate` is zero.
    #[must_use]
    pub fn new(rate: u32) -> Self {
        assert!(rate > 0, "Tick rate must be greater than zero");
        let interval = Duration::from_micros(1_000_000 / u64::from(rate));

        Self {
            interval,
            last_update: Instant::now(),
            accumulator: Duration::ZERO,
            ticks: 0,
            stats: TickStats {
                min_us: u64::MAX,
                ..TickStats::default()
            },
        }
    }

    /// Creates the standard 30 Hz simulation loop.
    #[must_use]
    pub fn simulation() -> Self {
        Self::new(SIM_TICK_RATE)
    }

    /// Returns true when enough time has accumulated for the next tick.
    ///
    /// Call in a loop until it returns false to drain a backlog.
    #[must_use]
    pub fn tick_due(&mut self) -> bool {
        let now = Instant::now();
        self.accumulator += now.duration_since(self.last_update);
        self.last_update = now;

        self.accumulator >= self.interval
    }

    /// Consumes one interval from the accumulator and starts a tick.
    ///
    /// Returns the start instant, to be handed back to [`Self::complete`].
    #[must_use]
    pub fn begin(&mut self) -> Instant {
        self.accumulator = self.accumulator.saturating_sub(self.interval);
        self.ticks += 1;
        Instant::now()
    }

    /// Ends a tick started with [`Self::begin`] and records its duration.
    pub fn complete(&mut self, started: Instant) {
        let elapsed = started.elapsed();
        let elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);

        self.stats.measured += 1;
        self.stats.min_us = self.stats.min_us.min(elapsed_us);
        self.stats.max_us = self.stats.max_us.max(elapsed_us);
        self.stats.avg_us = (self.stats.avg_us * 7 + elapsed_us) / 8;

        if elapsed > self.interval {
            self.stats.late += 1;
        }
    }

    /// Sleeps until the next tick is due.
    ///
    /// Wakes slightly early and lets `tick_due` absorb the remainder; the
    /// simulation tolerates sub-millisecond jitter at 30 Hz.
    pub fn idle_until_due(&self) {
        let elapsed = Instant::now().duration_since(self.last_update);
        let pending = self.interval.saturating_sub(self.accumulator);

        if elapsed < pending {
            let remaining = pending - elapsed;
            if remaining > Duration::from_micros(500) {
                std::thread::sleep(remaining - Duration::from_micros(250));
            }
        }
    }

    /// Seconds of simulated time per tick.
    #[must_use]
    pub fn dt(&self) -> f32 {
        self.interval.as_secs_f32()
    }

    /// Ticks released so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Timing statistics.
    #[must_use]
    pub const fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Target interval between ticks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for TickLoop {
    fn default() -> Self {
        Self::simulation()
    }
}
