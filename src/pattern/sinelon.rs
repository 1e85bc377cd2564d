//! A colored dot sweeping back and forth, with fading trails

use embassy_time::Instant;

use super::{Pattern, PatternInputs};
use crate::{
    cadence::HueRotation,
    color::{Hsv, add_saturating, fade_to_black_by, hsv2rgb},
    math8::{beatsin16, scale8},
    render_channel::Frame,
};

const SWEEP_BPM: u16 = 13;
const TRAIL_FADE: u8 = 20;
const DOT_VALUE: u8 = 192;

#[derive(Debug, Clone, Default)]
pub struct SinelonPattern {
    rotation: HueRotation,
}

impl Pattern for SinelonPattern {
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

        let span = u16::try_from(len).unwrap_or(u16::MAX);
        let pos = usize::from(beatsin16(SWEEP_BPM, frame.now, 0, span)).min(len - 1);
        let color = hsv2rgb(Hsv {
            hue: self.rotation.hue(),
            sat: 255,
            val: scale8(DOT_VALUE, fade),
        });
        frame.cells[pos] = add_saturating(frame.cells[pos], color);
    }
}
