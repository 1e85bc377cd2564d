//! ECG-shaped pulse waveform
//!
//! A short reference trace of a heartbeat is replayed sample by sample. Each
//! sample is pushed into the middle of a per-LED intensity buffer which
//! shifts outwards, so the pulse starts at the centre of the strip (worn
//! centred on the body) and travels to both ends.

use crate::{
    error::ConfigError,
    math8::{constrain, map_range},
};

/// One ECG beat, shaped after a normal 12-lead trace
pub const REFERENCE_CURVE: [u8; 22] = [
    2, 2, 2, 2, 3, 4, 3, 2, 1, 0, 10, 2, 2, 3, 4, 6, 8, 5, 3, 3, 3, 3,
];

/// Largest value in [`REFERENCE_CURVE`]
pub const REFERENCE_MAX_INTENSITY: u16 = 10;

/// Channels with an individually configurable heartbeat mode
pub const MAX_HEARTBEAT_CHANNELS: usize = 4;

/// How a channel displays the pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatMode {
    /// The pulse travels from the centre to both ends
    Full,
    /// The whole channel shows the intensity at the centre
    Split,
}

/// Mapping from motion to color for the heartbeat pattern
#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    /// Hue at rest (cool)
    pub min_hue: u8,
    /// Hue under strong motion (warm)
    pub max_hue: u8,
    /// Brightness divisor under strong motion, in hundredths (lower = brighter)
    pub min_brightness_divisor: u16,
    /// Brightness divisor at rest, in hundredths (higher = dimmer)
    pub max_brightness_divisor: u16,
    pub min_magnitude: i32,
    pub max_magnitude: i32,
    /// Mode per channel position; channels beyond the list use `Full`
    pub channel_modes: [HeartbeatMode; MAX_HEARTBEAT_CHANNELS],
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            min_hue: 160,
            max_hue: 255,
            min_brightness_divisor: 150,
            max_brightness_divisor: 300,
            min_magnitude: 0,
            max_magnitude: 50,
            channel_modes: [
                HeartbeatMode::Full,
                HeartbeatMode::Split,
                HeartbeatMode::Full,
                HeartbeatMode::Full,
            ],
        }
    }
}

impl HeartbeatConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_magnitude >= self.max_magnitude {
            return Err(ConfigError::InvalidMagnitudeRange {
                min: self.min_magnitude,
                max: self.max_magnitude,
            });
        }
        if self.min_hue > self.max_hue {
            return Err(ConfigError::InvalidHueRange {
                min: self.min_hue,
                max: self.max_hue,
            });
        }
        if self.min_brightness_divisor == 0
            || self.min_brightness_divisor > self.max_brightness_divisor
        {
            return Err(ConfigError::InvalidBrightnessDivisor {
                min: self.min_brightness_divisor,
                max: self.max_brightness_divisor,
            });
        }
        Ok(())
    }

    /// Display mode of the channel at `index`
    pub fn mode_for(&self, index: usize) -> HeartbeatMode {
        self.channel_modes
            .get(index)
            .copied()
            .unwrap_or(HeartbeatMode::Full)
    }

    /// Hue and brightness divisor for a motion intensity
    ///
    /// Low motion gives a dim, cool pulse; high motion a bright, warm one.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn tint(&self, magnitude: i32) -> Tint {
        let magnitude = constrain(magnitude, self.min_magnitude, self.max_magnitude);
        let hue = map_range(
            magnitude,
            self.min_magnitude,
            self.max_magnitude,
            i32::from(self.min_hue),
            i32::from(self.max_hue),
        );
        let divisor = map_range(
            magnitude,
            self.min_magnitude,
            self.max_magnitude,
            i32::from(self.max_brightness_divisor),
            i32::from(self.min_brightness_divisor),
        );

        Tint {
            hue: constrain(hue, 0, 255) as u8,
            divisor: constrain(divisor, 1, i32::from(u16::MAX)) as u16,
        }
    }
}

/// Color parameters derived from motion intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tint {
    pub hue: u8,
    /// Brightness divisor in hundredths
    pub divisor: u16,
}

impl Tint {
    /// Dim an intensity byte by the whole part of the divisor
    ///
    /// Divisors below 100 would truncate to zero and are treated as 1.
    #[allow(clippy::cast_possible_truncation)]
    pub fn dim(self, intensity: u8) -> u8 {
        let divisor = (self.divisor / 100).max(1);
        (u16::from(intensity) / divisor) as u8
    }
}

/// Cyclic replay of [`REFERENCE_CURVE`]
#[derive(Debug, Clone, Default)]
pub struct HeartbeatWaveform {
    offset: usize,
}

impl HeartbeatWaveform {
    pub const fn new() -> Self {
        Self { offset: 0 }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Step to the next reference sample; returns its intensity (0-255)
    #[allow(clippy::cast_possible_truncation)]
    pub fn advance(&mut self) -> u8 {
        self.offset = (self.offset + 1) % REFERENCE_CURVE.len();
        Self::intensity_at(self.offset)
    }

    /// Intensity of reference sample `offset`, scaled to 0-255
    #[allow(clippy::cast_possible_truncation)]
    pub fn intensity_at(offset: usize) -> u8 {
        let sample = u16::from(REFERENCE_CURVE[offset % REFERENCE_CURVE.len()]);
        (sample * 255 / REFERENCE_MAX_INTENSITY).min(255) as u8
    }
}

/// Push `sample` into the middle of `buffer`, shifting both halves outwards
///
/// The left half moves towards index 0 and the right half towards the end;
/// the oldest value on each side falls off.
pub fn shift_outward(buffer: &mut [u8], sample: u8) {
    let len = buffer.len();
    if len == 0 {
        return;
    }
    let mid = len / 2;

    if mid > 0 {
        buffer.copy_within(1..mid, 0);
        buffer[mid - 1] = sample;
    }

    if len - mid > 1 {
        buffer.copy_within(mid..len - 1, mid + 1);
    }
    buffer[mid] = sample;
}
