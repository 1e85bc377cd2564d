use core::f32::consts::TAU;

use embassy_time::{Duration, Instant};

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Blend two 8-bit values
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16; // a * 65536
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    ); // (b - a) * amount_of_b * 257
    partial = partial.wrapping_add(0x8000); // + 32768 for rounding

    (partial >> 16) as u8
}

/// Calculate progress (0-255) based on elapsed time and duration
#[allow(clippy::cast_possible_truncation)]
#[inline]
pub const fn progress8(elapsed: Duration, duration: Duration) -> u8 {
    if duration.as_millis() == 0 {
        return 255;
    }
    if elapsed.as_millis() >= duration.as_millis() {
        return 255;
    }

    ((elapsed.as_millis() * 255) / duration.as_millis()) as u8
}

/// 8-bit sine: a full period over 0-255, centered on 128
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sin8(theta: u8) -> u8 {
    let angle = f32::from(theta) * (TAU / 256.0);
    ((libm::sinf(angle) + 1.0) * 127.5) as u8
}

/// 16-bit signed sine: a full period over 0-65535
#[allow(clippy::cast_possible_truncation)]
pub fn sin16(theta: u16) -> i16 {
    let angle = f32::from(theta) * (TAU / 65536.0);
    (libm::sinf(angle) * 32767.0) as i16
}

/// Sawtooth rising from 0 to 65535 `bpm` times per minute
#[allow(clippy::cast_possible_truncation)]
pub fn beat16(bpm: u16, now: Instant) -> u16 {
    // bpm in 8.8 fixed point; 280/65536 ~ 1/234 converts ms to 1/65536 beats
    let bpm88 = u64::from(bpm) << 8;
    ((now.as_millis().wrapping_mul(bpm88).wrapping_mul(280)) >> 16) as u16
}

/// Sawtooth rising from 0 to 255 `bpm` times per minute
#[allow(clippy::cast_possible_truncation)]
pub fn beat8(bpm: u16, now: Instant) -> u8 {
    (beat16(bpm, now) >> 8) as u8
}

/// Sine wave oscillating between `low` (inclusive) and `high` (exclusive)
/// `bpm` times per minute
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn beatsin16(bpm: u16, now: Instant, low: u16, high: u16) -> u16 {
    if high <= low {
        return low;
    }
    let wave = (i32::from(sin16(beat16(bpm, now))) + 32768) as u32;
    let range = u32::from(high - low);
    low + ((wave * range) >> 16) as u16
}

/// Clamp without panicking on an inverted range (the lower bound wins)
#[inline]
pub const fn constrain(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Linearly re-map `value` from one integer range to another
///
/// Integer arithmetic truncates toward zero. A zero-width input range maps
/// everything to `out_min`.
pub const fn map_range(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}
