//! Pattern system with compile-time known pattern variants
//!
//! All patterns are stored in an enum to avoid heap allocations.
//! Each pattern implements the `Pattern` trait.

mod bpm;
mod confetti;
mod heartbeat;
mod juggle;
mod plasma;
mod rainbow;
mod registry;
mod sinelon;

use embassy_time::{Duration, Instant};

pub use bpm::BpmPattern;
pub use confetti::ConfettiPattern;
pub use heartbeat::HeartbeatPattern;
pub use juggle::JugglePattern;
pub use plasma::PlasmaPattern;
pub use rainbow::RainbowPattern;
pub use registry::{PatternRegistry, RegistryFull};
pub use sinelon::SinelonPattern;

use crate::{beat::BeatPhase, heartbeat::HeartbeatConfig, render_channel::Frame};

/// Default target frame rate (30 FPS).
pub const DEFAULT_FPS: u64 = 30;

/// Frame interval of patterns without their own pacing.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(1000 / DEFAULT_FPS);

const PATTERN_NAME_HEARTBEAT: &str = "heartbeat";
const PATTERN_NAME_CONFETTI: &str = "confetti";
const PATTERN_NAME_SINELON: &str = "sinelon";
const PATTERN_NAME_JUGGLE: &str = "juggle";
const PATTERN_NAME_PLASMA: &str = "plasma";
const PATTERN_NAME_BPM: &str = "bpm";
const PATTERN_NAME_RAINBOW: &str = "rainbow";
const PATTERN_NAME_RAINBOW_GLITTER: &str = "rainbow_glitter";

const PATTERN_ID_HEARTBEAT: u8 = 0;
const PATTERN_ID_CONFETTI: u8 = 1;
const PATTERN_ID_SINELON: u8 = 2;
const PATTERN_ID_JUGGLE: u8 = 3;
const PATTERN_ID_PLASMA: u8 = 4;
const PATTERN_ID_BPM: u8 = 5;
const PATTERN_ID_RAINBOW: u8 = 6;
const PATTERN_ID_RAINBOW_GLITTER: u8 = 7;

/// Patterns a registry built from ids can hold
pub const MAX_PATTERNS: usize = 8;

/// Inputs refreshed on every polling tick, whether or not a frame renders
#[derive(Debug, Clone, Copy)]
pub struct PatternInputs {
    pub beat: BeatPhase,
    /// The drop control is held
    pub is_dropping: bool,
    /// Smoothed motion intensity
    pub magnitude: i32,
    /// Frame interval of patterns without their own pacing
    pub default_interval: Duration,
}

impl Default for PatternInputs {
    fn default() -> Self {
        Self {
            beat: BeatPhase::default(),
            is_dropping: false,
            magnitude: 0,
            default_interval: DEFAULT_FRAME_INTERVAL,
        }
    }
}

pub trait Pattern {
    /// Prepare the pattern to start running.
    ///
    /// Called every time the pattern is (re-)selected.
    fn setup(&mut self) {}

    /// Advance per-frame state, once before the channels are drawn
    fn tick(&mut self, _now: Instant, _inputs: &PatternInputs) {}

    /// Draw one frame onto one channel
    ///
    /// `fade` is the activation level of the pattern (255 = fully on).
    fn render(&mut self, frame: &mut Frame<'_>, inputs: &PatternInputs, fade: u8);

    /// Preferred time between frames
    fn frame_interval(&self, inputs: &PatternInputs) -> Duration {
        inputs.default_interval
    }
}

/// Pattern slot - enum containing all possible patterns
#[derive(Debug, Clone)]
pub enum PatternSlot {
    /// ECG pulse reacting to motion
    Heartbeat(HeartbeatPattern),
    /// Random speckles that blink in and fade
    Confetti(ConfettiPattern),
    /// A dot sweeping back and forth with a trail
    Sinelon(SinelonPattern),
    /// Eight dots weaving in and out of sync
    Juggle(JugglePattern),
    /// Palette sine wave travelling along the strip
    Plasma(PlasmaPattern),
    /// Palette stripes pulsing to the beat
    Bpm(BpmPattern),
    /// Rotating rainbow, optionally with glitter
    Rainbow(RainbowPattern),
}

/// Known pattern ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PatternId {
    Heartbeat = PATTERN_ID_HEARTBEAT,
    Confetti = PATTERN_ID_CONFETTI,
    Sinelon = PATTERN_ID_SINELON,
    Juggle = PATTERN_ID_JUGGLE,
    Plasma = PATTERN_ID_PLASMA,
    Bpm = PATTERN_ID_BPM,
    Rainbow = PATTERN_ID_RAINBOW,
    RainbowGlitter = PATTERN_ID_RAINBOW_GLITTER,
}

/// Patterns in their default switching order
pub const DEFAULT_PATTERNS: [PatternId; 8] = [
    PatternId::Heartbeat,
    PatternId::Confetti,
    PatternId::Sinelon,
    PatternId::Juggle,
    PatternId::Plasma,
    PatternId::Bpm,
    PatternId::Rainbow,
    PatternId::RainbowGlitter,
];

impl PatternId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            PATTERN_ID_HEARTBEAT => Self::Heartbeat,
            PATTERN_ID_CONFETTI => Self::Confetti,
            PATTERN_ID_SINELON => Self::Sinelon,
            PATTERN_ID_JUGGLE => Self::Juggle,
            PATTERN_ID_PLASMA => Self::Plasma,
            PATTERN_ID_BPM => Self::Bpm,
            PATTERN_ID_RAINBOW => Self::Rainbow,
            PATTERN_ID_RAINBOW_GLITTER => Self::RainbowGlitter,
            _ => return None,
        })
    }

    pub fn to_slot(self, heartbeat: &HeartbeatConfig) -> PatternSlot {
        match self {
            Self::Heartbeat => PatternSlot::Heartbeat(HeartbeatPattern::new(heartbeat.clone())),
            Self::Confetti => PatternSlot::Confetti(ConfettiPattern::default()),
            Self::Sinelon => PatternSlot::Sinelon(SinelonPattern::default()),
            Self::Juggle => PatternSlot::Juggle(JugglePattern),
            Self::Plasma => PatternSlot::Plasma(PlasmaPattern),
            Self::Bpm => PatternSlot::Bpm(BpmPattern::default()),
            Self::Rainbow => PatternSlot::Rainbow(RainbowPattern::new()),
            Self::RainbowGlitter => PatternSlot::Rainbow(RainbowPattern::new().with_glitter()),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heartbeat => PATTERN_NAME_HEARTBEAT,
            Self::Confetti => PATTERN_NAME_CONFETTI,
            Self::Sinelon => PATTERN_NAME_SINELON,
            Self::Juggle => PATTERN_NAME_JUGGLE,
            Self::Plasma => PATTERN_NAME_PLASMA,
            Self::Bpm => PATTERN_NAME_BPM,
            Self::Rainbow => PATTERN_NAME_RAINBOW,
            Self::RainbowGlitter => PATTERN_NAME_RAINBOW_GLITTER,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            PATTERN_NAME_HEARTBEAT => Some(Self::Heartbeat),
            PATTERN_NAME_CONFETTI => Some(Self::Confetti),
            PATTERN_NAME_SINELON => Some(Self::Sinelon),
            PATTERN_NAME_JUGGLE => Some(Self::Juggle),
            PATTERN_NAME_PLASMA => Some(Self::Plasma),
            PATTERN_NAME_BPM => Some(Self::Bpm),
            PATTERN_NAME_RAINBOW => Some(Self::Rainbow),
            PATTERN_NAME_RAINBOW_GLITTER => Some(Self::RainbowGlitter),
            _ => None,
        }
    }
}

impl PatternSlot {
    /// Get the pattern ID for external observation
    pub fn id(&self) -> PatternId {
        match self {
            Self::Heartbeat(_) => PatternId::Heartbeat,
            Self::Confetti(_) => PatternId::Confetti,
            Self::Sinelon(_) => PatternId::Sinelon,
            Self::Juggle(_) => PatternId::Juggle,
            Self::Plasma(_) => PatternId::Plasma,
            Self::Bpm(_) => PatternId::Bpm,
            Self::Rainbow(pattern) if pattern.has_glitter() => PatternId::RainbowGlitter,
            Self::Rainbow(_) => PatternId::Rainbow,
        }
    }
}

impl Pattern for PatternSlot {
    fn setup(&mut self) {
        match self {
            Self::Heartbeat(pattern) => pattern.setup(),
            Self::Confetti(pattern) => pattern.setup(),
            Self::Sinelon(pattern) => pattern.setup(),
            Self::Juggle(pattern) => pattern.setup(),
            Self::Plasma(pattern) => pattern.setup(),
            Self::Bpm(pattern) => pattern.setup(),
            Self::Rainbow(pattern) => pattern.setup(),
        }
    }

    fn tick(&mut self, now: Instant, inputs: &PatternInputs) {
        match self {
            Self::Heartbeat(pattern) => pattern.tick(now, inputs),
            Self::Confetti(pattern) => pattern.tick(now, inputs),
            Self::Sinelon(pattern) => pattern.tick(now, inputs),
            Self::Juggle(pattern) => pattern.tick(now, inputs),
            Self::Plasma(pattern) => pattern.tick(now, inputs),
            Self::Bpm(pattern) => pattern.tick(now, inputs),
            Self::Rainbow(pattern) => pattern.tick(now, inputs),
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>, inputs: &PatternInputs, fade: u8) {
        match self {
            Self::Heartbeat(pattern) => pattern.render(frame, inputs, fade),
            Self::Confetti(pattern) => pattern.render(frame, inputs, fade),
            Self::Sinelon(pattern) => pattern.render(frame, inputs, fade),
            Self::Juggle(pattern) => pattern.render(frame, inputs, fade),
            Self::Plasma(pattern) => pattern.render(frame, inputs, fade),
            Self::Bpm(pattern) => pattern.render(frame, inputs, fade),
            Self::Rainbow(pattern) => pattern.render(frame, inputs, fade),
        }
    }

    fn frame_interval(&self, inputs: &PatternInputs) -> Duration {
        match self {
            Self::Heartbeat(pattern) => pattern.frame_interval(inputs),
            Self::Confetti(pattern) => pattern.frame_interval(inputs),
            Self::Sinelon(pattern) => pattern.frame_interval(inputs),
            Self::Juggle(pattern) => pattern.frame_interval(inputs),
            Self::Plasma(pattern) => pattern.frame_interval(inputs),
            Self::Bpm(pattern) => pattern.frame_interval(inputs),
            Self::Rainbow(pattern) => pattern.frame_interval(inputs),
        }
    }
}
