//! Cooperative main loop.
//!
//! Portable tick function without async/await or platform timers: the
//! caller samples the clock, calls [`FrameScheduler::tick`] and sleeps for
//! the returned duration.

use embassy_time::{Duration, Instant};

use crate::{
    OutputDriver,
    beat::BeatSource,
    control::{ControlEffects, ControlProcessor, ControlReceiver},
    engine::EngineContext,
    motion::MotionSensor,
    persistence::{ModeStore, boot_index},
};

/// Result of a scheduler tick.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// When the next subsystem is due.
    pub next_deadline: Instant,
    /// How long to wait until then (zero if already due).
    pub sleep_duration: Duration,
    /// Whether this tick rendered and showed a frame.
    pub rendered: bool,
}

/// Drives the engine and its collaborators.
///
/// Each tick:
/// - drains the control mailbox
/// - refreshes the beat phase and pattern inputs
/// - steps motion tracking on its own cadence
/// - renders and shows a frame when the active pattern wants one
///
/// # Usage
///
/// ```ignore
/// let engine = EngineContext::new(&EngineConfig { persistence: ModePersistence::CycleOnBoot, ..config })?;
/// let tap_tempo = TapTempo::new(tap_tempo_config);
/// let mut scheduler = FrameScheduler::new(engine, controls.receiver(), driver, accel, tap_tempo, eeprom);
/// scheduler.boot(Instant::now());
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     Timer::after(result.sleep_duration).await;
/// }
/// ```
pub struct FrameScheduler<
    'a,
    O: OutputDriver,
    M: MotionSensor,
    B: BeatSource,
    S: ModeStore,
    const MAX_LEDS: usize,
    const CHANNELS: usize,
    const EVENTS: usize,
> {
    engine: EngineContext<MAX_LEDS, CHANNELS>,
    controls: ControlProcessor<'a, EVENTS>,
    output: O,
    motion: M,
    beat: B,
    store: S,
}

impl<
    'a,
    O: OutputDriver,
    M: MotionSensor,
    B: BeatSource,
    S: ModeStore,
    const MAX_LEDS: usize,
    const CHANNELS: usize,
    const EVENTS: usize,
> FrameScheduler<'a, O, M, B, S, MAX_LEDS, CHANNELS, EVENTS>
{
    pub fn new(
        engine: EngineContext<MAX_LEDS, CHANNELS>,
        events: ControlReceiver<'a, EVENTS>,
        output: O,
        motion: M,
        beat: B,
        store: S,
    ) -> Self {
        Self {
            engine,
            controls: ControlProcessor::new(events),
            output,
            motion,
            beat,
            store,
        }
    }

    /// Pick the boot pattern according to the engine's persistence policy.
    pub fn boot(&mut self, now: Instant) -> usize {
        let count = self.engine.registry().len();
        let initial = self.engine.pattern_index();
        let policy = self.engine.persistence();
        let index = boot_index(policy, &mut self.store, initial, count);
        self.engine.select_pattern(index, now);
        self.engine.pattern_index()
    }

    /// Run one cooperative tick and return timing information.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let effects = self.controls.process_pending(&mut self.beat);
        self.apply_effects(&effects, now);

        let phase = self.beat.phase(now);
        self.engine.poll(now, phase);
        self.engine.update_motion(&mut self.motion, now);

        let rendered = self.engine.render_due(now);
        if rendered {
            self.show();
        }

        let next_deadline = self
            .engine
            .next_render(now)
            .min(self.engine.next_motion(now));

        FrameResult {
            next_deadline,
            sleep_duration: next_deadline.saturating_duration_since(now),
            rendered,
        }
    }

    fn apply_effects(&mut self, effects: &ControlEffects, now: Instant) {
        for _ in 0..effects.pattern_steps {
            let index = self.engine.next_pattern(now);
            if self.engine.persistence().remembers_selection()
                && let Ok(index) = u8::try_from(index)
            {
                self.store.store(index);
            }
        }
        for _ in 0..effects.palette_steps {
            self.engine.next_palette();
        }
        for _ in 0..effects.brightness_steps {
            self.engine.cycle_brightness(now);
        }
        if let Some(dropping) = effects.dropping {
            self.engine.set_dropping(dropping);
        }
    }

    fn show(&mut self) {
        let brightness = self.engine.brightness();
        for (index, channel) in self.engine.channels().iter().enumerate() {
            self.output.write(index, channel.cells(), brightness);
        }
        self.output.show();
    }

    pub const fn engine(&self) -> &EngineContext<MAX_LEDS, CHANNELS> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut EngineContext<MAX_LEDS, CHANNELS> {
        &mut self.engine
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    pub const fn beat(&self) -> &B {
        &self.beat
    }

    pub const fn store(&self) -> &S {
        &self.store
    }
}
