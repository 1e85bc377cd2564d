//! Animation engine state
//!
//! [`EngineContext`] holds everything that changes while the wearable runs:
//! the channel buffers, the pattern registry, palettes, the motion envelope,
//! output brightness and the cadences that pace them. Nothing lives in
//! globals; the scheduler owns one context and drives it tick by tick.

use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    beat::BeatPhase,
    brightness::{BrightnessConfig, BrightnessControl},
    cadence::Cadence,
    error::ConfigError,
    heartbeat::HeartbeatConfig,
    motion::{MotionConfig, MotionSensor, MotionTracker, sample_magnitude},
    palette::{DEFAULT_PALETTES, Palette, PaletteList},
    pattern::{
        DEFAULT_FRAME_INTERVAL, DEFAULT_PATTERNS, MAX_PATTERNS, PatternId, PatternRegistry,
        PatternSlot,
    },
    persistence::ModePersistence,
    render_channel::RenderChannel,
    transition::Fade,
};

/// Time between motion tracking steps
pub const DEFAULT_MOTION_INTERVAL: Duration = Duration::from_millis(100);

/// Fade-in of a newly selected pattern
pub const DEFAULT_PATTERN_FADE_IN: Duration = Duration::from_millis(250);

/// Everything tunable about the engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub motion: MotionConfig,
    pub heartbeat: HeartbeatConfig,
    pub brightness: BrightnessConfig,
    /// Patterns in switching order
    pub patterns: &'static [PatternId],
    /// Palettes in switching order
    pub palettes: &'static [Palette],
    pub initial_pattern: usize,
    pub initial_palette: usize,
    /// Frame interval of patterns without their own pacing
    pub frame_interval: Duration,
    pub motion_interval: Duration,
    pub pattern_fade_in: Duration,
    /// How the pattern selection survives a reboot
    pub persistence: ModePersistence,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            motion: MotionConfig::default(),
            heartbeat: HeartbeatConfig::default(),
            brightness: BrightnessConfig::default(),
            patterns: &DEFAULT_PATTERNS,
            palettes: &DEFAULT_PALETTES,
            initial_pattern: 0,
            initial_palette: 0,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            motion_interval: DEFAULT_MOTION_INTERVAL,
            pattern_fade_in: DEFAULT_PATTERN_FADE_IN,
            persistence: ModePersistence::Disabled,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.motion.validate()?;
        self.heartbeat_config().validate()?;
        self.brightness.validate()?;
        if self.patterns.is_empty() {
            return Err(ConfigError::NoPatterns);
        }
        if self.patterns.len() > MAX_PATTERNS {
            return Err(ConfigError::TooManyPatterns {
                capacity: MAX_PATTERNS,
            });
        }
        // Checks stop counts as well
        PaletteList::new(self.palettes)?;
        Ok(())
    }

    /// Heartbeat settings over the motion tracker's magnitude range
    ///
    /// The tint maps the tracker's adjusted value over this range.
    pub fn heartbeat_config(&self) -> HeartbeatConfig {
        HeartbeatConfig {
            min_magnitude: self.motion.min_magnitude,
            max_magnitude: self.motion.max_magnitude,
            ..self.heartbeat.clone()
        }
    }
}

/// A channel could not be bound at `index`; hands the channel back
#[derive(Debug, Clone)]
pub struct ChannelSlotError<T> {
    pub index: usize,
    pub channel: T,
}

/// Engine state for `CHANNELS` strips of up to `MAX_LEDS` LEDs each
pub struct EngineContext<const MAX_LEDS: usize, const CHANNELS: usize> {
    channels: Vec<RenderChannel<MAX_LEDS>, CHANNELS>,
    registry: PatternRegistry<PatternSlot, MAX_PATTERNS>,
    palettes: PaletteList,
    motion: MotionTracker,
    brightness: BrightnessControl,
    render_cadence: Cadence,
    motion_cadence: Cadence,
    fade: Fade,
    fade_in: Duration,
    persistence: ModePersistence,
}

impl<const MAX_LEDS: usize, const CHANNELS: usize> EngineContext<MAX_LEDS, CHANNELS> {
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        if let Err(error) = config.validate() {
            #[cfg(feature = "esp32-log")]
            println!("[engine] rejected config: {}", error);
            return Err(error);
        }

        let mut registry = PatternRegistry::from_ids(config.patterns, &config.heartbeat_config())?;
        registry.set_default_interval(config.frame_interval);
        registry.select(config.initial_pattern % registry.len());

        let mut palettes = PaletteList::new(config.palettes)?;
        palettes.select(config.initial_palette % palettes.len());

        Ok(Self {
            channels: Vec::new(),
            render_cadence: Cadence::new(registry.frame_interval()),
            registry,
            palettes,
            motion: MotionTracker::new(config.motion.clone()),
            brightness: BrightnessControl::new(&config.brightness)?,
            motion_cadence: Cadence::new(config.motion_interval),
            fade: Fade::new(u8::MAX),
            fade_in: config.pattern_fade_in,
            persistence: config.persistence,
        })
    }

    /// Bind `channel` to position `index`
    ///
    /// Replaces a channel already bound there, or appends when `index` is
    /// the next free position. The channel takes the current palette.
    pub fn set_channel(
        &mut self,
        index: usize,
        mut channel: RenderChannel<MAX_LEDS>,
    ) -> Result<(), ChannelSlotError<RenderChannel<MAX_LEDS>>> {
        channel.set_palette(self.palettes.current());
        if let Some(slot) = self.channels.get_mut(index) {
            *slot = channel;
            return Ok(());
        }
        if index != self.channels.len() {
            return Err(ChannelSlotError { index, channel });
        }
        self.channels
            .push(channel)
            .map_err(|channel| ChannelSlotError { index, channel })
    }

    pub fn channels(&self) -> &[RenderChannel<MAX_LEDS>] {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut [RenderChannel<MAX_LEDS>] {
        &mut self.channels
    }

    pub const fn registry(&self) -> &PatternRegistry<PatternSlot, MAX_PATTERNS> {
        &self.registry
    }

    pub const fn palettes(&self) -> &PaletteList {
        &self.palettes
    }

    pub const fn motion(&self) -> &MotionTracker {
        &self.motion
    }

    pub const fn persistence(&self) -> ModePersistence {
        self.persistence
    }

    pub fn pattern_index(&self) -> usize {
        self.registry.index()
    }

    pub fn pattern_id(&self) -> Option<PatternId> {
        self.registry.current_id()
    }

    /// Output brightness for this frame
    pub const fn brightness(&self) -> u8 {
        self.brightness.current()
    }

    pub const fn brightness_index(&self) -> usize {
        self.brightness.index()
    }

    /// Current frame interval of the active pattern
    pub const fn frame_interval(&self) -> Duration {
        self.render_cadence.interval()
    }

    /// Refresh the pattern inputs; call on every tick, rendered or not
    pub fn poll(&mut self, now: Instant, beat: BeatPhase) {
        self.registry.set_beat(beat);
        self.registry.set_magnitude(self.motion.adjusted());
        self.render_cadence.set_interval(self.registry.frame_interval());
        self.brightness.tick(now);
    }

    /// Step the motion envelope with one denoised reading
    pub fn track_motion(&mut self, reading: i32) -> i32 {
        let adjusted = self.motion.step(reading);
        self.registry.set_magnitude(adjusted);
        adjusted
    }

    /// Sample the sensor and step the envelope if the motion cadence is due
    pub fn update_motion<S: MotionSensor>(&mut self, sensor: &mut S, now: Instant) -> Option<i32> {
        if !self.motion_cadence.is_due(now) {
            return None;
        }
        let reading = sample_magnitude(sensor, self.motion.config().sample_size);
        Some(self.track_motion(reading))
    }

    /// Render a frame if the active pattern's frame interval has elapsed
    pub fn render_due(&mut self, now: Instant) -> bool {
        if !self.render_cadence.is_due(now) {
            return false;
        }
        let fade = self.fade.tick(now);
        self.registry.render(&mut self.channels, now, fade)
    }

    /// When the next frame is due
    pub fn next_render(&self, now: Instant) -> Instant {
        self.render_cadence.next_due(now)
    }

    /// When the next motion step is due
    pub fn next_motion(&self, now: Instant) -> Instant {
        self.motion_cadence.next_due(now)
    }

    /// Switch to the next pattern and fade it in; returns its index
    pub fn next_pattern(&mut self, now: Instant) -> usize {
        let index = self.registry.next();
        self.pattern_changed(now);
        index
    }

    /// Switch to the pattern at `index`; unknown indices are ignored
    pub fn select_pattern(&mut self, index: usize, now: Instant) -> Option<usize> {
        self.registry.select(index)?;
        self.pattern_changed(now);
        Some(index)
    }

    /// Switch to a randomly chosen pattern and fade it in; returns its index
    pub fn random_pattern(&mut self, rng: &mut fastrand::Rng, now: Instant) -> usize {
        let index = self.registry.random(rng);
        self.pattern_changed(now);
        index
    }

    fn pattern_changed(&mut self, now: Instant) {
        self.fade.restart(0, u8::MAX, self.fade_in, now);
        self.render_cadence.set_interval(self.registry.frame_interval());
        // Draw the new pattern right away
        self.render_cadence.reset();

        #[cfg(feature = "esp32-log")]
        {
            if let Some(id) = self.registry.current_id() {
                println!("[engine] pattern {} ({})", self.registry.index(), id.as_str());
            }
        }
    }

    /// Switch every channel to the next palette; returns its index
    pub fn next_palette(&mut self) -> usize {
        let index = self.palettes.next();
        self.apply_palette();
        index
    }

    /// Switch to the palette at `index`; unknown indices are ignored
    pub fn select_palette(&mut self, index: usize) -> Option<usize> {
        self.palettes.select(index)?;
        self.apply_palette();
        Some(index)
    }

    fn apply_palette(&mut self) {
        let palette = self.palettes.current();
        for channel in &mut self.channels {
            channel.set_palette(palette);
        }

        #[cfg(feature = "esp32-log")]
        println!("[engine] palette {} ({})", self.palettes.index(), palette.name());
    }

    /// Step to the next brightness level; returns its index
    pub fn cycle_brightness(&mut self, now: Instant) -> usize {
        let index = self.brightness.cycle(now);

        #[cfg(feature = "esp32-log")]
        println!("[engine] brightness {} ({})", index, self.brightness.level());

        index
    }

    pub fn set_dropping(&mut self, is_dropping: bool) {
        self.registry.set_dropping(is_dropping);
    }

    pub fn is_dropping(&self) -> bool {
        self.registry.inputs().is_dropping
    }
}
