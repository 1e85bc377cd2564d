//! Single-factor plasma: a palette sine wave travelling up the strip

use super::{Pattern, PatternInputs};
use crate::{
    math8::{scale8, sin8},
    render_channel::Frame,
};

/// Spatial frequency of the wave, in sine steps per LED
const WAVE_STEP: u64 = 30;

#[derive(Debug, Clone, Copy, Default)]
pub struct PlasmaPattern;

impl Pattern for PlasmaPattern {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, frame: &mut Frame<'_>, _inputs: &PatternInputs, fade: u8) {
        let drift = frame.now.as_millis() / 2;
        for (i, cell) in frame.cells.iter_mut().enumerate() {
            let theta = (i as u64).wrapping_mul(WAVE_STEP).wrapping_sub(drift) as u8;
            let index = scale8(sin8(theta), 200);
            *cell = frame.palette.color_at(index, fade);
        }
    }
}
