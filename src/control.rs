//! Control event processing
//!
//! Turns queued button events into engine changes. Beat taps go straight to
//! the beat source with their original timestamps; everything else is
//! folded into a [`ControlEffects`] summary the scheduler applies.

use embassy_time::Instant;

use crate::{
    beat::BeatSource,
    channel::{EventChannel, Receiver, Sender},
};

/// Something the wearer asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    NextPattern,
    NextPalette,
    CycleBrightness,
    /// The beat button was tapped at this time
    BeatTap(Instant),
    /// Drop mode on or off
    Drop(bool),
}

/// Accumulated changes from one batch of events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlEffects {
    /// Pattern switches requested
    pub pattern_steps: u8,
    /// Palette switches requested
    pub palette_steps: u8,
    /// Brightness level steps requested
    pub brightness_steps: u8,
    /// Last requested drop state
    pub dropping: Option<bool>,
    pub taps: u8,
}

impl ControlEffects {
    pub const fn has_effects(&self) -> bool {
        self.pattern_steps > 0
            || self.palette_steps > 0
            || self.brightness_steps > 0
            || self.dropping.is_some()
    }
}

pub type ControlSender<'a, const SIZE: usize> = Sender<'a, ControlEvent, SIZE>;

pub type ControlReceiver<'a, const SIZE: usize> = Receiver<'a, ControlEvent, SIZE>;

pub type ControlChannel<const SIZE: usize> = EventChannel<ControlEvent, SIZE>;

/// Drains control events once per tick
pub struct ControlProcessor<'a, const SIZE: usize> {
    events: ControlReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> ControlProcessor<'a, SIZE> {
    pub const fn new(events: ControlReceiver<'a, SIZE>) -> Self {
        Self { events }
    }

    /// Process every pending event without blocking
    pub fn process_pending<B: BeatSource + ?Sized>(&mut self, beat: &mut B) -> ControlEffects {
        let mut effects = ControlEffects::default();
        for event in self.events.drain() {
            Self::apply(&mut effects, beat, event);
        }
        effects
    }

    fn apply<B: BeatSource + ?Sized>(effects: &mut ControlEffects, beat: &mut B, event: ControlEvent) {
        match event {
            ControlEvent::NextPattern => {
                effects.pattern_steps = effects.pattern_steps.saturating_add(1);
            }
            ControlEvent::NextPalette => {
                effects.palette_steps = effects.palette_steps.saturating_add(1);
            }
            ControlEvent::CycleBrightness => {
                effects.brightness_steps = effects.brightness_steps.saturating_add(1);
            }
            ControlEvent::BeatTap(at) => {
                beat.tap(at);
                effects.taps = effects.taps.saturating_add(1);
            }
            ControlEvent::Drop(on) => effects.dropping = Some(on),
        }
    }
}
