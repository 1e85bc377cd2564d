//! Random colored speckles that blink in and fade smoothly

use embassy_time::Instant;

use super::{Pattern, PatternInputs};
use crate::{
    cadence::HueRotation,
    color::{Hsv, add_saturating, fade_to_black_by, hsv2rgb},
    render_channel::Frame,
};

const CONFETTI_SEED: u64 = 0x00C0_FFEE;
const TRAIL_FADE: u8 = 10;
/// Spread of speckle hues around the rotating base hue
const HUE_SPREAD: u8 = 64;

#[derive(Debug, Clone)]
pub struct ConfettiPattern {
    rotation: HueRotation,
    rng: fastrand::Rng,
}

impl Default for ConfettiPattern {
    fn default() -> Self {
        Self::with_seed(CONFETTI_SEED)
    }
}

impl ConfettiPattern {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rotation: HueRotation::new(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Pattern for ConfettiPattern {
    fn setup(&mut self) {
        self.rotation.reset();
    }

    fn tick(&mut self, now: Instant, _inputs: &PatternInputs) {
        self.rotation.advance(now);
    }

    fn render(&mut self, frame: &mut Frame<'_>, _inputs: &PatternInputs, fade: u8) {
        let len = frame.cells.len();
        if len == 0 {
            return;
        }
        fade_to_black_by(frame.cells, TRAIL_FADE);

        let pos = self.rng.usize(..len);
        let color = hsv2rgb(Hsv {
            hue: self
                .rotation
                .hue()
                .wrapping_add(self.rng.u8(..HUE_SPREAD)),
            sat: 200,
            val: fade,
        });
        frame.cells[pos] = add_saturating(frame.cells[pos], color);
    }
}
