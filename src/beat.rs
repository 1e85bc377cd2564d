//! Musical beat input
//!
//! The animation engine only consumes a [`BeatPhase`] each tick. Where it
//! comes from is up to the [`BeatSource`]; [`TapTempo`] derives it from a
//! tap button.

use embassy_time::{Duration, Instant};
use heapless::Deque;

use crate::error::ConfigError;

/// Number of tap intervals averaged into the tempo
const TAP_HISTORY: usize = 8;

/// Progress below which a beat counts as "just started"
pub const BEAT_START_WINDOW: f32 = 0.1;

/// Snapshot of the beat clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatPhase {
    pub bpm: f32,
    /// True on the first tick of a new beat
    pub on_beat: bool,
    /// Fractional progress through the current beat, `[0, 1)`
    pub progress: f32,
}

impl Default for BeatPhase {
    fn default() -> Self {
        Self {
            bpm: 60.0,
            on_beat: false,
            progress: 0.0,
        }
    }
}

impl BeatPhase {
    /// Whether the beat has just (re)started
    pub fn is_beat_start(&self) -> bool {
        self.within(BEAT_START_WINDOW)
    }

    /// Whether the beat is still in its first `window` (fraction of a beat)
    pub fn within(&self, window: f32) -> bool {
        self.on_beat || self.progress < window
    }

    /// Rounded bpm, never below 1
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn bpm_u16(&self) -> u16 {
        let bpm = libm::roundf(self.bpm);
        if bpm.is_nan() || bpm < 1.0 {
            1
        } else {
            bpm as u16
        }
    }
}

/// Producer of beat phase information
pub trait BeatSource {
    /// Register a tap of the beat button
    fn tap(&mut self, now: Instant);

    /// Current beat phase; `on_beat` reports each beat once
    fn phase(&mut self, now: Instant) -> BeatPhase;
}

/// Configuration for [`TapTempo`]
#[derive(Debug, Clone)]
pub struct TapTempoConfig {
    /// Tempo used before any taps
    pub default_bpm: u16,
    pub min_bpm: u16,
    pub max_bpm: u16,
    /// Taps further apart than this start a new tap sequence
    pub chain_timeout: Duration,
}

impl Default for TapTempoConfig {
    fn default() -> Self {
        Self {
            default_bpm: 60,
            min_bpm: 40,
            max_bpm: 180,
            chain_timeout: Duration::from_millis(2_000),
        }
    }
}

impl TapTempoConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_bpm == 0 || self.min_bpm > self.max_bpm {
            return Err(ConfigError::InvalidBpmRange {
                min: self.min_bpm,
                max: self.max_bpm,
            });
        }
        Ok(())
    }
}

/// Tap tempo detector
///
/// Every tap restarts the beat so the phase lines up with the taps. The
/// tempo is the mean of the most recent tap intervals of the current chain.
#[derive(Debug, Clone)]
pub struct TapTempo {
    config: TapTempoConfig,
    intervals: Deque<u64, TAP_HISTORY>,
    last_tap: Option<Instant>,
    beat_start: Instant,
    beat_length_ms: u64,
    last_beat_index: Option<u64>,
}

impl Default for TapTempo {
    fn default() -> Self {
        Self::new(TapTempoConfig::default())
    }
}

impl TapTempo {
    pub fn new(config: TapTempoConfig) -> Self {
        let bpm = config.default_bpm.max(config.min_bpm).min(config.max_bpm);
        Self {
            config,
            intervals: Deque::new(),
            last_tap: None,
            beat_start: Instant::from_millis(0),
            beat_length_ms: 60_000 / u64::from(bpm.max(1)),
            last_beat_index: None,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn bpm(&self) -> f32 {
        60_000.0 / self.beat_length_ms as f32
    }

    pub const fn beat_length(&self) -> Duration {
        Duration::from_millis(self.beat_length_ms)
    }

    fn shortest_beat_ms(&self) -> u64 {
        60_000 / u64::from(self.config.max_bpm.max(1))
    }

    fn longest_beat_ms(&self) -> u64 {
        60_000 / u64::from(self.config.min_bpm.max(1))
    }
}

impl BeatSource for TapTempo {
    fn tap(&mut self, now: Instant) {
        if let Some(last) = self.last_tap {
            let interval = now.saturating_duration_since(last);
            if interval > self.config.chain_timeout {
                self.intervals.clear();
            } else {
                if self.intervals.is_full() {
                    self.intervals.pop_front();
                }
                let _ = self.intervals.push_back(interval.as_millis());
            }
        }

        if !self.intervals.is_empty() {
            let total: u64 = self.intervals.iter().sum();
            let mean = total / self.intervals.len() as u64;
            self.beat_length_ms = mean.max(self.shortest_beat_ms()).min(self.longest_beat_ms());
        }

        self.last_tap = Some(now);
        self.beat_start = now;
        self.last_beat_index = None;
    }

    #[allow(clippy::cast_precision_loss)]
    fn phase(&mut self, now: Instant) -> BeatPhase {
        let length = self.beat_length_ms.max(1);
        let elapsed = now.saturating_duration_since(self.beat_start).as_millis();
        let beat_index = elapsed / length;
        let on_beat = self.last_beat_index != Some(beat_index);
        self.last_beat_index = Some(beat_index);

        BeatPhase {
            bpm: self.bpm(),
            on_beat,
            progress: (elapsed % length) as f32 / length as f32,
        }
    }
}
