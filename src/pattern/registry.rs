//! Ordered pattern list with a current selection
//!
//! The registry owns the per-tick pattern inputs and lends the channels to
//! the active pattern for one render call at a time. It never keeps
//! channels itself.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use super::{Pattern, PatternId, PatternInputs, PatternSlot};
use crate::{
    beat::BeatPhase, error::ConfigError, heartbeat::HeartbeatConfig,
    render_channel::RenderChannel,
};

/// Returned when pushing onto a full registry, hands the pattern back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryFull<P>(pub P);

#[derive(Debug, Clone)]
pub struct PatternRegistry<P, const N: usize> {
    patterns: Vec<P, N>,
    current: usize,
    inputs: PatternInputs,
}

impl<P: Pattern, const N: usize> Default for PatternRegistry<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Pattern, const N: usize> PatternRegistry<P, N> {
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
            current: 0,
            inputs: PatternInputs::default(),
        }
    }

    /// Append a pattern; the first one pushed becomes current
    pub fn push(&mut self, pattern: P) -> Result<(), RegistryFull<P>> {
        self.patterns.push(pattern).map_err(RegistryFull)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub const fn index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&P> {
        self.patterns.get(self.current)
    }

    pub fn current_mut(&mut self) -> Option<&mut P> {
        self.patterns.get_mut(self.current)
    }

    /// Switch to the following pattern and set it up
    ///
    /// With a single pattern this re-runs its setup.
    pub fn next(&mut self) -> usize {
        if self.patterns.is_empty() {
            return 0;
        }
        self.current = (self.current + 1) % self.patterns.len();
        self.setup();
        self.current
    }

    /// Switch to the pattern at `index`; out of range leaves the selection alone
    pub fn select(&mut self, index: usize) -> Option<&mut P> {
        if index >= self.patterns.len() {
            return None;
        }
        self.current = index;
        let pattern = self.patterns.get_mut(index)?;
        pattern.setup();
        Some(pattern)
    }

    /// Switch to a randomly chosen pattern and set it up
    pub fn random(&mut self, rng: &mut fastrand::Rng) -> usize {
        if self.patterns.is_empty() {
            return 0;
        }
        self.current = rng.usize(..self.patterns.len());
        self.setup();
        self.current
    }

    /// Set up the current pattern
    pub fn setup(&mut self) {
        if let Some(pattern) = self.current_mut() {
            pattern.setup();
        }
    }

    pub const fn inputs(&self) -> &PatternInputs {
        &self.inputs
    }

    pub fn set_bpm(&mut self, bpm: f32) {
        self.inputs.beat.bpm = bpm;
    }

    pub fn set_on_beat(&mut self, on_beat: bool) {
        self.inputs.beat.on_beat = on_beat;
    }

    pub fn set_beat_progress(&mut self, progress: f32) {
        self.inputs.beat.progress = progress.clamp(0.0, 1.0);
    }

    pub fn set_dropping(&mut self, is_dropping: bool) {
        self.inputs.is_dropping = is_dropping;
    }

    pub fn set_beat(&mut self, beat: BeatPhase) {
        self.set_bpm(beat.bpm);
        self.set_on_beat(beat.on_beat);
        self.set_beat_progress(beat.progress);
    }

    pub fn set_magnitude(&mut self, magnitude: i32) {
        self.inputs.magnitude = magnitude;
    }

    /// Frame interval for patterns that don't pace themselves
    pub fn set_default_interval(&mut self, interval: Duration) {
        self.inputs.default_interval = interval;
    }

    /// Frame interval wanted by the current pattern for the current inputs
    pub fn frame_interval(&self) -> Duration {
        self.current()
            .map_or(self.inputs.default_interval, |pattern| {
                pattern.frame_interval(&self.inputs)
            })
    }

    /// Tick the current pattern once and draw it onto every channel
    ///
    /// Channels are addressed by position. Returns `false` when there is no
    /// pattern to draw.
    pub fn render<const MAX_LEDS: usize>(
        &mut self,
        channels: &mut [RenderChannel<MAX_LEDS>],
        now: Instant,
        fade: u8,
    ) -> bool {
        let inputs = self.inputs;
        let Some(pattern) = self.patterns.get_mut(self.current) else {
            return false;
        };

        pattern.tick(now, &inputs);
        for (index, channel) in channels.iter_mut().enumerate() {
            let mut frame = channel.frame(index, now);
            pattern.render(&mut frame, &inputs, fade);
        }
        true
    }
}

impl<const N: usize> PatternRegistry<PatternSlot, N> {
    /// Build a registry from pattern ids, in order
    pub fn from_ids(ids: &[PatternId], heartbeat: &HeartbeatConfig) -> Result<Self, ConfigError> {
        if ids.is_empty() {
            return Err(ConfigError::NoPatterns);
        }
        let mut registry = Self::new();
        for id in ids {
            registry
                .push(id.to_slot(heartbeat))
                .map_err(|_| ConfigError::TooManyPatterns { capacity: N })?;
        }
        Ok(registry)
    }

    /// Select the first pattern with the given id
    pub fn select_id(&mut self, id: PatternId) -> Option<usize> {
        let index = self.patterns.iter().position(|pattern| pattern.id() == id)?;
        self.select(index)?;
        Some(index)
    }

    pub fn current_id(&self) -> Option<PatternId> {
        self.current().map(PatternSlot::id)
    }
}
