//! Per-strip render target.
//!
//! One [`RenderChannel`] exists per physical strip for the whole lifetime of
//! the program. Every pattern draws into the same buffers, so switching
//! patterns never allocates. Cells are never cleared between frames: trail
//! effects fade whatever the previous frame left behind.

use embassy_time::Instant;

use crate::{
    color::{BLACK, Rgb},
    palette::Palette,
};

/// Requested channel size is zero or exceeds the buffer capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSizeError {
    pub size: usize,
    pub capacity: usize,
}

/// Fixed-size LED buffer with its palette and per-LED scratch bytes
#[derive(Debug, Clone)]
pub struct RenderChannel<const MAX_LEDS: usize> {
    cells: [Rgb; MAX_LEDS],
    /// Per-LED "activation" bytes, free for the active pattern to use
    scratch: [u8; MAX_LEDS],
    size: usize,
    palette: &'static Palette,
}

/// Borrowed view of a channel handed to a pattern for one render call
pub struct Frame<'a> {
    /// Position of the channel in the engine
    pub index: usize,
    pub now: Instant,
    pub cells: &'a mut [Rgb],
    pub scratch: &'a mut [u8],
    pub palette: &'a Palette,
}

impl<const MAX_LEDS: usize> RenderChannel<MAX_LEDS> {
    /// Create a channel driving `size` LEDs, all black
    pub const fn new(size: usize, palette: &'static Palette) -> Result<Self, ChannelSizeError> {
        if size == 0 || size > MAX_LEDS {
            return Err(ChannelSizeError {
                size,
                capacity: MAX_LEDS,
            });
        }
        Ok(Self {
            cells: [BLACK; MAX_LEDS],
            scratch: [0; MAX_LEDS],
            size,
            palette,
        })
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Rgb] {
        &self.cells[..self.size]
    }

    pub fn activation(&self) -> &[u8] {
        &self.scratch[..self.size]
    }

    pub const fn palette(&self) -> &'static Palette {
        self.palette
    }

    pub fn set_palette(&mut self, palette: &'static Palette) {
        self.palette = palette;
    }

    /// Blank the cells and scratch bytes
    pub fn clear(&mut self) {
        self.cells[..self.size].fill(BLACK);
        self.scratch[..self.size].fill(0);
    }

    /// Lend the buffers to a single render call
    pub fn frame(&mut self, index: usize, now: Instant) -> Frame<'_> {
        Frame {
            index,
            now,
            cells: &mut self.cells[..self.size],
            scratch: &mut self.scratch[..self.size],
            palette: self.palette,
        }
    }
}
