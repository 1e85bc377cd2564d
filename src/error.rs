use core::fmt;

/// Rejected configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `min` must be strictly below `max`
    InvalidMagnitudeRange { min: i32, max: i32 },
    /// `min_hue` must not exceed `max_hue`
    InvalidHueRange { min: u8, max: u8 },
    /// Brightness divisors must be positive and ordered
    InvalidBrightnessDivisor { min: u16, max: u16 },
    /// Motion samples per reading must be at least one
    EmptySampleSize,
    /// A palette needs at least two color stops
    PaletteTooShort { index: usize },
    /// Palette list is empty
    NoPalettes,
    /// Pattern list is empty
    NoPatterns,
    /// More patterns than the registry can hold
    TooManyPatterns { capacity: usize },
    /// Brightness level list is empty
    NoBrightnessLevels,
    /// Tap tempo bpm bounds are inverted or zero
    InvalidBpmRange { min: u16, max: u16 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMagnitudeRange { min, max } => {
                write!(f, "invalid magnitude range {min}..{max}")
            }
            Self::InvalidHueRange { min, max } => write!(f, "invalid hue range {min}..{max}"),
            Self::InvalidBrightnessDivisor { min, max } => {
                write!(f, "invalid brightness divisors {min}..{max}")
            }
            Self::EmptySampleSize => f.write_str("sample size must be at least 1"),
            Self::PaletteTooShort { index } => {
                write!(f, "palette {index} has fewer than two stops")
            }
            Self::NoPalettes => f.write_str("no palettes configured"),
            Self::NoPatterns => f.write_str("no patterns configured"),
            Self::TooManyPatterns { capacity } => {
                write!(f, "more than {capacity} patterns configured")
            }
            Self::NoBrightnessLevels => f.write_str("no brightness levels configured"),
            Self::InvalidBpmRange { min, max } => write!(f, "invalid bpm range {min}..{max}"),
        }
    }
}
