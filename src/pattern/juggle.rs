//! Eight colored dots, weaving in and out of sync with each other

use super::{Pattern, PatternInputs};
use crate::{
    color::{Hsv, fade_to_black_by, hsv2rgb, max_components},
    math8::beatsin16,
    render_channel::Frame,
};

const DOTS: u16 = 8;
const TRAIL_FADE: u8 = 20;
const HUE_STEP: u8 = 32;

#[derive(Debug, Clone, Copy, Default)]
pub struct JugglePattern;

impl Pattern for JugglePattern {
    fn render(&mut self, frame: &mut Frame<'_>, _inputs: &PatternInputs, fade: u8) {
        let len = frame.cells.len();
        if len == 0 {
            return;
        }
        fade_to_black_by(frame.cells, TRAIL_FADE);

        let span = u16::try_from(len).unwrap_or(u16::MAX);
        let mut hue: u8 = 0;
        for dot in 0..DOTS {
            let pos = usize::from(beatsin16(dot + 7, frame.now, 0, span)).min(len - 1);
            let color = hsv2rgb(Hsv {
                hue,
                sat: 200,
                val: fade,
            });
            frame.cells[pos] = max_components(frame.cells[pos], color);
            hue = hue.wrapping_add(HUE_STEP);
        }
    }
}
