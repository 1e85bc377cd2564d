//! Heartbeat pulse reacting to motion
//!
//! Each channel keeps its own copy of the travelling pulse in its scratch
//! bytes, so channels of different lengths never share a buffer.

use embassy_time::{Duration, Instant};

use super::{Pattern, PatternInputs};
use crate::{
    color::{Hsv, Rgb, hsv2rgb},
    heartbeat::{HeartbeatConfig, HeartbeatMode, HeartbeatWaveform, Tint, shift_outward},
    math8::scale8,
    render_channel::Frame,
};

#[derive(Debug, Clone)]
pub struct HeartbeatPattern {
    config: HeartbeatConfig,
    waveform: HeartbeatWaveform,
    /// Intensity injected at the centre this frame
    sample: u8,
    tint: Tint,
}

impl Default for HeartbeatPattern {
    fn default() -> Self {
        Self::new(HeartbeatConfig::default())
    }
}

impl HeartbeatPattern {
    pub fn new(config: HeartbeatConfig) -> Self {
        let tint = config.tint(config.min_magnitude);
        Self {
            config,
            waveform: HeartbeatWaveform::new(),
            sample: 0,
            tint,
        }
    }

    pub const fn tint(&self) -> Tint {
        self.tint
    }

    pub const fn waveform(&self) -> &HeartbeatWaveform {
        &self.waveform
    }

    fn color(&self, intensity: u8, fade: u8) -> Rgb {
        hsv2rgb(Hsv {
            hue: self.tint.hue,
            sat: intensity,
            val: scale8(self.tint.dim(intensity), fade),
        })
    }
}

impl Pattern for HeartbeatPattern {
    fn setup(&mut self) {
        self.waveform.reset();
        self.sample = 0;
    }

    fn tick(&mut self, _now: Instant, inputs: &PatternInputs) {
        self.sample = self.waveform.advance();
        self.tint = self.config.tint(inputs.magnitude);
    }

    fn render(&mut self, frame: &mut Frame<'_>, _inputs: &PatternInputs, fade: u8) {
        match self.config.mode_for(frame.index) {
            HeartbeatMode::Full => {
                shift_outward(frame.scratch, self.sample);
                for (cell, &intensity) in frame.cells.iter_mut().zip(frame.scratch.iter()) {
                    *cell = self.color(intensity, fade);
                }
            }
            HeartbeatMode::Split => {
                let color = self.color(self.sample, fade);
                frame.cells.fill(color);
            }
        }
    }

    /// Half of one `1000 / bpm` millisecond step, never below 1 ms
    fn frame_interval(&self, inputs: &PatternInputs) -> Duration {
        let bpm = u64::from(inputs.beat.bpm_u16());
        Duration::from_millis((1000 / bpm / 2).max(1))
    }
}
