mod utils;

use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{
    add_saturating, blend_colors, fade_to_black_by, hsv2rgb, max_components, rgb_from_u32,
    scale_color,
};

pub type Rgb = RGB8;
pub type Hsv = HSV;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
