//! Global output brightness
//!
//! The level is handed to the output driver with every frame and never
//! written into channel cells, which trail patterns read back.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::{error::ConfigError, transition::Fade};

/// Most levels a brightness button can cycle through
pub const MAX_BRIGHTNESS_LEVELS: usize = 8;

#[derive(Debug, Clone)]
pub struct BrightnessConfig {
    /// Levels in button order (0-255)
    pub levels: Vec<u8, MAX_BRIGHTNESS_LEVELS>,
    /// Index of the level used at power on
    pub initial: usize,
    /// Time to fade from one level to the next
    pub fade: Duration,
}

impl Default for BrightnessConfig {
    fn default() -> Self {
        Self {
            levels: Vec::from_slice(&[20, 40, 60]).unwrap_or_default(),
            initial: 0,
            fade: Duration::from_millis(150),
        }
    }
}

impl BrightnessConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::NoBrightnessLevels);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct BrightnessControl {
    levels: Vec<u8, MAX_BRIGHTNESS_LEVELS>,
    index: usize,
    fade_duration: Duration,
    fade: Fade,
}

impl BrightnessControl {
    pub fn new(config: &BrightnessConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let index = config.initial % config.levels.len();
        let level = config.levels[index];
        Ok(Self {
            levels: config.levels.clone(),
            index,
            fade_duration: config.fade,
            fade: Fade::new(level),
        })
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    /// Level the control is set to, ignoring any fade in progress
    pub fn level(&self) -> u8 {
        self.levels.get(self.index).copied().unwrap_or(0)
    }

    /// Brightness to show right now
    pub const fn current(&self) -> u8 {
        self.fade.current()
    }

    /// Step to the next level, wrapping around; returns the new index
    pub fn cycle(&mut self, now: Instant) -> usize {
        if self.levels.is_empty() {
            return 0;
        }
        self.index = (self.index + 1) % self.levels.len();
        self.fade.set(self.level(), self.fade_duration, now);
        self.index
    }

    /// Advance the fade; returns the brightness to show
    pub fn tick(&mut self, now: Instant) -> u8 {
        self.fade.tick(now)
    }
}
