//! Motion intensity tracking
//!
//! Turns raw accelerometer readings into a bounded, smoothed "how much is
//! the wearer moving" value. Two time constants shape it: `gain_rate`
//! pulls the adjusted value towards the target quickly, `decay_rate` lets
//! the target itself sink back to rest slowly.
//!
//! The upper bound depends on the sensor and how it is mounted; some sensors
//! report far larger swings for the same motion.

use crate::{error::ConfigError, math8::constrain};

/// Raw triaxial accelerometer
pub trait MotionSensor {
    /// One instantaneous X/Y/Z sample in raw ADC units
    fn read_axes(&mut self) -> [u16; 3];
}

/// Motion tracker tuning
#[derive(Debug, Clone)]
pub struct MotionConfig {
    pub min_magnitude: i32,
    /// Largest difference between two readings that still registers
    pub max_magnitude: i32,
    /// Step towards the target per tracking cycle
    pub gain_rate: i32,
    /// Step of the target back towards `min_magnitude` per tracking cycle
    pub decay_rate: i32,
    /// Instantaneous samples averaged into one reading
    pub sample_size: u8,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            min_magnitude: 0,
            max_magnitude: 50,
            gain_rate: 6,
            decay_rate: 2,
            sample_size: 8,
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_magnitude >= self.max_magnitude {
            return Err(ConfigError::InvalidMagnitudeRange {
                min: self.min_magnitude,
                max: self.max_magnitude,
            });
        }
        if self.sample_size == 0 {
            return Err(ConfigError::EmptySampleSize);
        }
        Ok(())
    }
}

/// Motion envelope state
///
/// `target` and `adjusted` stay within the configured magnitude range.
/// `current` is the previous raw reading and serves only as the baseline
/// for the next difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntensityEnvelope {
    pub current: i32,
    pub target: i32,
    pub adjusted: i32,
}

/// Average `sample_size` Euclidean norms of the sensor's axes
#[allow(clippy::cast_possible_truncation)]
pub fn sample_magnitude<S: MotionSensor>(sensor: &mut S, sample_size: u8) -> i32 {
    let samples = sample_size.max(1);
    let mut total = 0.0_f32;
    for _ in 0..samples {
        let [x, y, z] = sensor.read_axes().map(f32::from);
        total += libm::sqrtf(x * x + y * y + z * z);
    }
    (total / f32::from(samples)) as i32
}

/// Smoothed motion intensity
#[derive(Debug, Clone)]
pub struct MotionTracker {
    config: MotionConfig,
    envelope: IntensityEnvelope,
}

impl MotionTracker {
    /// Start fully excited, so the wearable wakes up bright and settles down
    pub fn new(config: MotionConfig) -> Self {
        let envelope = IntensityEnvelope {
            current: 0,
            target: config.max_magnitude,
            adjusted: config.max_magnitude,
        };
        Self { config, envelope }
    }

    pub const fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub const fn envelope(&self) -> IntensityEnvelope {
        self.envelope
    }

    pub const fn adjusted(&self) -> i32 {
        self.envelope.adjusted
    }

    /// Replace the envelope, clamping the bounded parts into range
    pub fn set_envelope(&mut self, envelope: IntensityEnvelope) {
        self.envelope = IntensityEnvelope {
            current: envelope.current,
            target: self.clamp(envelope.target),
            adjusted: self.clamp(envelope.adjusted),
        };
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    fn clamp(&self, value: i32) -> i32 {
        constrain(value, self.config.min_magnitude, self.config.max_magnitude)
    }

    /// Feed one denoised reading and advance the envelope by one cycle
    pub fn step(&mut self, reading: i32) -> i32 {
        let gain = self.config.gain_rate;
        let envelope = &mut self.envelope;
        let diff = i32::try_from(envelope.current.abs_diff(reading)).unwrap_or(i32::MAX);
        let diff = constrain(
            diff,
            self.config.min_magnitude,
            self.config.max_magnitude,
        );

        // A fresh spike can raise the target, a calm reading can't lower it
        let target = diff.max(envelope.target);

        let adjusted = if envelope.adjusted <= target {
            target.saturating_add(gain)
        } else {
            target.saturating_sub(gain)
        };
        envelope.adjusted = constrain(
            adjusted,
            self.config.min_magnitude,
            self.config.max_magnitude,
        );

        envelope.target = constrain(
            target.saturating_sub(self.config.decay_rate),
            self.config.min_magnitude,
            self.config.max_magnitude,
        );
        envelope.current = reading;

        envelope.adjusted
    }

    /// Sample the sensor and step the envelope
    pub fn update<S: MotionSensor>(&mut self, sensor: &mut S) -> i32 {
        let reading = sample_magnitude(sensor, self.config.sample_size);
        self.step(reading)
    }
}
