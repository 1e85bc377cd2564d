//! Rotating rainbow, optionally sprinkled with white glitter

use embassy_time::Instant;

use super::{Pattern, PatternInputs};
use crate::{
    cadence::HueRotation,
    color::{Hsv, WHITE, add_saturating, hsv2rgb, scale_color},
    render_channel::Frame,
};

const RAINBOW_SEED: u64 = 0x5EED_0007;
/// Hue step between neighbouring LEDs
const HUE_DELTA: u8 = 7;
/// Chance of glitter per frame, out of 256
const GLITTER_CHANCE: u8 = 80;

#[derive(Debug, Clone)]
pub struct RainbowPattern {
    rotation: HueRotation,
    glitter: bool,
    rng: fastrand::Rng,
}

impl Default for RainbowPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl RainbowPattern {
    pub fn new() -> Self {
        Self {
            rotation: HueRotation::new(),
            glitter: false,
            rng: fastrand::Rng::with_seed(RAINBOW_SEED),
        }
    }

    /// Add random white sparkles on top of the rainbow
    #[must_use]
    pub fn with_glitter(mut self) -> Self {
        self.glitter = true;
        self
    }

    pub const fn has_glitter(&self) -> bool {
        self.glitter
    }
}

impl Pattern for RainbowPattern {
    fn setup(&mut self) {
        self.rotation.reset();
    }

    fn tick(&mut self, now: Instant, _inputs: &PatternInputs) {
        self.rotation.advance(now);
    }

    fn render(&mut self, frame: &mut Frame<'_>, _inputs: &PatternInputs, fade: u8) {
        let mut hue = self.rotation.hue();
        for cell in frame.cells.iter_mut() {
            *cell = hsv2rgb(Hsv {
                hue,
                sat: 255,
                val: fade,
            });
            hue = hue.wrapping_add(HUE_DELTA);
        }

        if self.glitter && !frame.cells.is_empty() && self.rng.u8(..) < GLITTER_CHANCE {
            let pos = self.rng.usize(..frame.cells.len());
            frame.cells[pos] = add_saturating(frame.cells[pos], scale_color(WHITE, fade));
        }
    }
}
