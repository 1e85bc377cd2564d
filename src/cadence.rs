//! Cooperative task pacing.
//!
//! Every subsystem that runs slower than the main loop keeps its own
//! [`Cadence`]: a last-run timestamp compared against the monotonic clock
//! sampled once per tick. The interval can change at runtime, which matters
//! for patterns whose frame interval follows the tempo.

use embassy_time::{Duration, Instant};

/// Interval of the shared hue rotation used by several patterns.
pub const HUE_ROTATION_INTERVAL: Duration = Duration::from_millis(20);

/// Fires at most once per `interval`.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    interval: Duration,
    last_run: Option<Instant>,
}

impl Cadence {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the interval; the next run is measured from the last one.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Forget the last run, so the next `is_due` fires immediately
    pub fn reset(&mut self) {
        self.last_run = None;
    }

    /// Returns true (and records the run) if the interval has elapsed.
    ///
    /// The first call always fires.
    pub fn is_due(&mut self, now: Instant) -> bool {
        let due = match self.last_run {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if due {
            self.last_run = Some(now);
        }
        due
    }

    /// Earliest instant at which `is_due` will fire again
    pub fn next_due(&self, now: Instant) -> Instant {
        match self.last_run {
            None => now,
            Some(last) => {
                let next = last + self.interval;
                if next < now { now } else { next }
            }
        }
    }
}

/// Rotating "base color" shared by the hue-cycling patterns
#[derive(Debug, Clone, Copy)]
pub struct HueRotation {
    hue: u8,
    cadence: Cadence,
}

impl Default for HueRotation {
    fn default() -> Self {
        Self::new()
    }
}

impl HueRotation {
    pub const fn new() -> Self {
        Self {
            hue: 0,
            cadence: Cadence::new(HUE_ROTATION_INTERVAL),
        }
    }

    pub const fn hue(&self) -> u8 {
        self.hue
    }

    /// Step the hue by one if the rotation interval has elapsed
    pub fn advance(&mut self, now: Instant) -> u8 {
        if self.cadence.is_due(now) {
            self.hue = self.hue.wrapping_add(1);
        }
        self.hue
    }

    pub fn reset(&mut self) {
        self.hue = 0;
        self.cadence.reset();
    }
}
