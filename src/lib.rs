#![no_std]

pub mod beat;
pub mod brightness;
pub mod cadence;
pub mod channel;
pub mod color;
pub mod control;
pub mod engine;
pub mod error;
pub mod frame_scheduler;
pub mod heartbeat;
pub mod input;
pub mod math8;
pub mod motion;
pub mod palette;
pub mod pattern;
pub mod persistence;
pub mod render_channel;
pub mod transition;

pub use beat::{BeatPhase, BeatSource, TapTempo, TapTempoConfig};
pub use brightness::{BrightnessConfig, BrightnessControl};
pub use cadence::{Cadence, HueRotation};
pub use channel::{EventChannel, TryReceiveError, TrySendError};
pub use control::{
    ControlChannel, ControlEffects, ControlEvent, ControlProcessor, ControlReceiver,
    ControlSender,
};
pub use engine::{ChannelSlotError, EngineConfig, EngineContext};
pub use error::ConfigError;
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use heartbeat::{HeartbeatConfig, HeartbeatMode, HeartbeatWaveform, Tint};
pub use input::{ButtonEdge, ButtonLevels, ButtonTracker, Controls};
pub use motion::{IntensityEnvelope, MotionConfig, MotionSensor, MotionTracker};
pub use palette::{Palette, PaletteList};
pub use pattern::{Pattern, PatternId, PatternInputs, PatternRegistry, PatternSlot};
pub use persistence::{MemoryStore, ModePersistence, ModeStore, NoStore};
pub use render_channel::{ChannelSizeError, Frame, RenderChannel};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The scheduler is generic over this trait.
pub trait OutputDriver {
    /// Stage the colors of one strip, to be shown at `brightness`
    ///
    /// Drivers usually apply the brightness with `smart_leds::brightness`.
    fn write(&mut self, channel: usize, colors: &[Rgb], brightness: u8);

    /// Transmit every staged strip at once
    fn show(&mut self);
}
