//! Colored stripes pulsing at the tapped tempo
//!
//! The stripes are mirrored around the centre of the strip. While the drop
//! control is held the stripes give way to a strobe on the start of every
//! beat.

use embassy_time::Instant;

use super::{Pattern, PatternInputs};
use crate::{
    cadence::HueRotation,
    color::{BLACK, WHITE, scale_color},
    math8::beat8,
    render_channel::Frame,
};

const BPM_SEED: u64 = 0x0B0B_B0B0;

/// LEDs per glitter "frame"; smaller frames mean more glitter
const GLITTER_FRAME: usize = 20;
/// Part of the beat that gets glitter
const GLITTER_WINDOW: f32 = 0.15;
/// Part of the beat that flashes while dropping
const FLASH_WINDOW: f32 = 0.25;

#[derive(Debug, Clone)]
pub struct BpmPattern {
    rotation: HueRotation,
    rng: fastrand::Rng,
}

impl Default for BpmPattern {
    fn default() -> Self {
        Self::with_seed(BPM_SEED)
    }
}

impl BpmPattern {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rotation: HueRotation::new(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_stripes(&mut self, frame: &mut Frame<'_>, inputs: &PatternInputs, fade: u8) {
        let len = frame.cells.len();
        let hue = self.rotation.hue();
        let beat = beat8(inputs.beat.bpm_u16(), frame.now);

        for i in 0..=len / 2 {
            let mirrored = len - i - 1;
            // Only the low byte matters for the palette index and brightness
            let step = i as u8;
            let index = hue.wrapping_add(step.wrapping_mul(2));
            let brightness = beat.wrapping_sub(hue).wrapping_add(step.wrapping_mul(10));
            let color = scale_color(frame.palette.color_at(index, brightness), fade);
            if let Some(cell) = frame.cells.get_mut(i) {
                *cell = color;
            }
            frame.cells[mirrored.min(len - 1)] = color;
        }

        // Sparkle on the first part of the beat
        if inputs.beat.within(GLITTER_WINDOW) {
            let glitter = scale_color(WHITE, fade);
            for j in 0..len / GLITTER_FRAME {
                let min = GLITTER_FRAME * j;
                let max = (GLITTER_FRAME * (j + 1)).min(len - 1);
                if min < max {
                    frame.cells[self.rng.usize(min..max)] = glitter;
                }
            }
        }
    }

    fn render_drop(&mut self, frame: &mut Frame<'_>, inputs: &PatternInputs, fade: u8) {
        if inputs.beat.within(FLASH_WINDOW) {
            let flash = scale_color(WHITE, fade);
            for cell in frame.cells.iter_mut() {
                // One in three chance of lighting up
                *cell = if self.rng.u8(..3) == 0 { flash } else { BLACK };
            }
        } else {
            frame.cells.fill(BLACK);
        }
    }
}

impl Pattern for BpmPattern {
    fn setup(&mut self) {
        self.rotation.reset();
    }

    fn tick(&mut self, now: Instant, _inputs: &PatternInputs) {
        self.rotation.advance(now);
    }

    fn render(&mut self, frame: &mut Frame<'_>, inputs: &PatternInputs, fade: u8) {
        if frame.cells.is_empty() {
            return;
        }
        if inputs.is_dropping {
            self.render_drop(frame, inputs, fade);
        } else {
            self.render_stripes(frame, inputs, fade);
        }
    }
}
