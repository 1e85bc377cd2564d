//! Cyclic color palettes
//!
//! A palette is an ordered ring of color stops addressed by an 8-bit index.
//! Index 0 is the first stop; as the index grows the color blends towards
//! each following stop and finally back towards the first one.

use crate::{
    color::{BLACK, Rgb, blend_colors, rgb_from_u32, scale_color},
    error::ConfigError,
};

/// Create an array of stops from hex colors (0xRRGGBB format)
macro_rules! hex_stops {
    ($($color:expr),* $(,)?) => {
        [
            $(rgb_from_u32($color)),*
        ]
    };
}

/// Immutable ring of color stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    name: &'static str,
    stops: &'static [Rgb],
}

impl Palette {
    pub const fn new(name: &'static str, stops: &'static [Rgb]) -> Self {
        Self { name, stops }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn stops(&self) -> &'static [Rgb] {
        self.stops
    }

    /// Color at `index` (0-255 around the ring), scaled by `brightness`
    #[allow(clippy::cast_possible_truncation)]
    pub fn color_at(&self, index: u8, brightness: u8) -> Rgb {
        let color = match self.stops {
            [] => return BLACK,
            [only] => *only,
            stops => {
                let count = stops.len();
                // count <= 255 stops keeps this in u32 and the segment in range
                let scaled = u32::from(index) * count as u32;
                let segment = (scaled >> 8) as usize;
                let local = (scaled & 0xFF) as u8;
                let next = (segment + 1) % count;
                blend_colors(stops[segment], stops[next], local)
            }
        };

        if brightness == 255 {
            color
        } else {
            scale_color(color, brightness)
        }
    }
}

#[allow(clippy::unreadable_literal)]
const RAINBOW_STOPS: [Rgb; 16] = hex_stops![
    0xFF0000, 0xD52A00, 0xAB5500, 0xAB7F00, 0xABAB00, 0x56D500, 0x00FF00, 0x00D52A,
    0x00AB55, 0x0056AA, 0x0000FF, 0x2A00D5, 0x5500AB, 0x7F0081, 0xAB0055, 0xD5002B,
];
pub const RAINBOW: Palette = Palette::new("rainbow", &RAINBOW_STOPS);

#[allow(clippy::unreadable_literal)]
const PARTY_STOPS: [Rgb; 16] = hex_stops![
    0x5500AB, 0x84007C, 0xB5004B, 0xE5001B, 0xE81700, 0xB84700, 0xAB7700, 0xABAB00,
    0xAB5500, 0xDD2200, 0xF2000E, 0xC2003E, 0x8F0071, 0x5F00A1, 0x2F00D0, 0x0007F9,
];
pub const PARTY: Palette = Palette::new("party", &PARTY_STOPS);

#[allow(clippy::unreadable_literal)]
const OCEAN_STOPS: [Rgb; 16] = hex_stops![
    0x191970, 0x00008B, 0x191970, 0x000080, 0x00008B, 0x0000CD, 0x2E8B57, 0x008080,
    0x5F9EA0, 0x0000FF, 0x008B8B, 0x6495ED, 0x7FFFD4, 0x2E8B57, 0x00FFFF, 0x87CEFA,
];
pub const OCEAN: Palette = Palette::new("ocean", &OCEAN_STOPS);

#[allow(clippy::unreadable_literal)]
const LAVA_STOPS: [Rgb; 16] = hex_stops![
    0x000000, 0x800000, 0x000000, 0x800000, 0x8B0000, 0x8B0000, 0x800000, 0x8B0000,
    0x8B0000, 0x8B0000, 0xFF0000, 0xFFA500, 0xFFFFFF, 0xFFA500, 0xFF0000, 0x8B0000,
];
pub const LAVA: Palette = Palette::new("lava", &LAVA_STOPS);

#[allow(clippy::unreadable_literal)]
const FOREST_STOPS: [Rgb; 16] = hex_stops![
    0x006400, 0x006400, 0x556B2F, 0x006400, 0x008000, 0x228B22, 0x6B8E23, 0x008000,
    0x2E8B57, 0x66CDAA, 0x32CD32, 0x9ACD32, 0x90EE90, 0x7CFC00, 0x66CDAA, 0x228B22,
];
pub const FOREST: Palette = Palette::new("forest", &FOREST_STOPS);

#[allow(clippy::unreadable_literal)]
const HEAT_STOPS: [Rgb; 16] = hex_stops![
    0x000000, 0x330000, 0x660000, 0x990000, 0xCC0000, 0xFF0000, 0xFF3300, 0xFF6600,
    0xFF9900, 0xFFCC00, 0xFFFF00, 0xFFFF33, 0xFFFF66, 0xFFFF99, 0xFFFFCC, 0xFFFFFF,
];
pub const HEAT: Palette = Palette::new("heat", &HEAT_STOPS);

/// Palettes available out of the box, in switching order
pub static DEFAULT_PALETTES: [Palette; 6] = [RAINBOW, PARTY, OCEAN, LAVA, FOREST, HEAT];

/// Ordered list of palettes with a current selection
#[derive(Debug, Clone)]
pub struct PaletteList {
    palettes: &'static [Palette],
    current: usize,
}

impl PaletteList {
    /// Create a list starting at the first palette
    pub fn new(palettes: &'static [Palette]) -> Result<Self, ConfigError> {
        if palettes.is_empty() {
            return Err(ConfigError::NoPalettes);
        }
        if let Some(index) = palettes.iter().position(|p| p.stops.len() < 2) {
            return Err(ConfigError::PaletteTooShort { index });
        }
        Ok(Self {
            palettes,
            current: 0,
        })
    }

    pub const fn len(&self) -> usize {
        self.palettes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    pub const fn index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &'static Palette {
        &self.palettes[self.current]
    }

    /// Switch to the next palette, wrapping around; returns the new index
    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1) % self.palettes.len();
        self.current
    }

    /// Switch to the palette at `index`
    ///
    /// Unknown indices leave the selection untouched.
    pub fn select(&mut self, index: usize) -> Option<&'static Palette> {
        let palette = self.palettes.get(index)?;
        self.current = index;
        Some(palette)
    }

    /// Switch to a random palette
    pub fn random(&mut self, rng: &mut fastrand::Rng) -> usize {
        self.current = rng.usize(..self.palettes.len());
        self.current
    }
}
