use embassy_time::{Duration, Instant};

use crate::math8::{blend8, progress8};

/// Timed fade of one byte, used for brightness steps and pattern fade-in
#[derive(Debug, Clone)]
pub struct Fade {
    current: u8,
    source: u8,
    /// None when settled
    target: Option<u8>,
    duration: Duration,
    start_time: Instant,
}

impl Fade {
    pub const fn new(initial: u8) -> Self {
        Self {
            current: initial,
            source: initial,
            target: None,
            duration: Duration::from_millis(0),
            start_time: Instant::from_millis(0),
        }
    }

    pub const fn current(&self) -> u8 {
        self.current
    }

    /// Value the fade is heading to
    pub fn target(&self) -> u8 {
        self.target.unwrap_or(self.current)
    }

    pub const fn is_transitioning(&self) -> bool {
        self.target.is_some()
    }

    /// Head to `value`, starting at `start_time`; zero duration jumps
    pub fn set(&mut self, value: u8, duration: Duration, start_time: Instant) {
        self.start_time = start_time;
        if duration.as_millis() == 0 {
            self.current = value;
            self.source = value;
            self.target = None;
            self.duration = duration;
        } else {
            self.source = self.current;
            self.target = Some(value);
            self.duration = duration;
        }
    }

    /// Restart from `from` towards `to`
    pub fn restart(&mut self, from: u8, to: u8, duration: Duration, start_time: Instant) {
        self.current = from;
        self.target = None;
        self.set(to, duration, start_time);
    }

    pub fn tick(&mut self, now: Instant) -> u8 {
        let Some(target) = self.target else {
            return self.current;
        };

        let elapsed = now.saturating_duration_since(self.start_time);
        if elapsed >= self.duration {
            self.current = target;
            self.source = target;
            self.target = None;
            return self.current;
        }

        self.current = blend8(self.source, target, progress8(elapsed, self.duration));
        self.current
    }
}
