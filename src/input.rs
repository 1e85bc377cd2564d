//! Button edge tracking
//!
//! Debouncing happens outside the crate; the trackers here only see a clean
//! pressed/released level on every tick and turn level changes into edges
//! and [`ControlEvent`]s.

use embassy_time::{Duration, Instant};

use crate::control::ControlEvent;

/// Presses held at least this long count as long presses
pub const LONG_PRESS: Duration = Duration::from_millis(1_000);

/// Level change of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEdge {
    /// The button went down
    Pressed,
    /// The button came back up
    Released { long: bool },
}

/// Edge detector with long-press timing for one button
#[derive(Debug, Clone)]
pub struct ButtonTracker {
    long_press: Duration,
    pressed: bool,
    pressed_at: Option<Instant>,
    was_long_press: bool,
}

impl Default for ButtonTracker {
    fn default() -> Self {
        Self::new(LONG_PRESS)
    }
}

impl ButtonTracker {
    pub const fn new(long_press: Duration) -> Self {
        Self {
            long_press,
            pressed: false,
            pressed_at: None,
            was_long_press: false,
        }
    }

    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Whether the last completed press was a long one
    pub const fn was_long_press(&self) -> bool {
        self.was_long_press
    }

    /// Feed the debounced level; returns the edge, if any
    pub fn update(&mut self, pressed: bool, now: Instant) -> Option<ButtonEdge> {
        if pressed == self.pressed {
            return None;
        }
        self.pressed = pressed;

        if pressed {
            self.pressed_at = Some(now);
            return Some(ButtonEdge::Pressed);
        }

        let held = self
            .pressed_at
            .take()
            .map_or(Duration::from_millis(0), |at| now.saturating_duration_since(at));
        self.was_long_press = held > self.long_press;
        Some(ButtonEdge::Released {
            long: self.was_long_press,
        })
    }
}

/// Debounced button levels sampled on one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonLevels {
    pub mode: bool,
    pub brightness: bool,
    pub beat: bool,
    pub drop: bool,
}

/// The wearable's four buttons
#[derive(Debug, Clone, Default)]
pub struct Controls {
    mode: ButtonTracker,
    brightness: ButtonTracker,
    beat: ButtonTracker,
    drop: ButtonTracker,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate level changes into control events, in button order
    ///
    /// The mode button acts on release so the press length is known: short
    /// selects the next pattern, long the next palette.
    pub fn update(&mut self, levels: ButtonLevels, now: Instant) -> heapless::Vec<ControlEvent, 4> {
        let mut events = heapless::Vec::new();

        let mode = match self.mode.update(levels.mode, now) {
            Some(ButtonEdge::Released { long: true }) => Some(ControlEvent::NextPalette),
            Some(ButtonEdge::Released { long: false }) => Some(ControlEvent::NextPattern),
            _ => None,
        };
        let brightness = match self.brightness.update(levels.brightness, now) {
            Some(ButtonEdge::Pressed) => Some(ControlEvent::CycleBrightness),
            _ => None,
        };
        let beat = match self.beat.update(levels.beat, now) {
            Some(ButtonEdge::Pressed) => Some(ControlEvent::BeatTap(now)),
            _ => None,
        };
        let drop = match self.drop.update(levels.drop, now) {
            Some(ButtonEdge::Pressed) => Some(ControlEvent::Drop(true)),
            Some(ButtonEdge::Released { .. }) => Some(ControlEvent::Drop(false)),
            None => None,
        };

        // At most one event per button, so the vector never overflows
        for event in [mode, brightness, beat, drop].into_iter().flatten() {
            let _ = events.push(event);
        }
        events
    }
}
