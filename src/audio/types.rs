//! Audio-related small types and helpers.
//!
//! This module defines the looping mode, the gain limits shared by every
//! session and the time conversions used by the track adapter.

use std::time::Duration;

/// Loudest gain a session accepts, in decibels.
pub const MAX_VOLUME: f32 = 6.0206;
/// Quietest gain a session accepts, in decibels.
pub const MIN_VOLUME: f32 = -80.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Play each track once.
    #[default]
    NoLoop,
    /// Repeat the current track when it ends.
    LoopOne,
    /// Move on to the next track when one ends, wrapping around.
    LoopAll,
}

/// Clamp a requested gain to `[MIN_VOLUME, MAX_VOLUME]`.
pub fn clamp_volume(db: f32) -> f32 {
    db.clamp(MIN_VOLUME, MAX_VOLUME)
}

/// Convert a gain in decibels to a linear amplitude factor.
pub fn db_to_amplitude(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

pub fn frames_to_micros(frames: u64, sample_rate: u32) -> u64 {
    if sample_rate == 0 {
        return 0;
    }
    (frames as u128 * 1_000_000 / sample_rate as u128) as u64
}

pub fn micros_to_frames(micros: u64, sample_rate: u32) -> u64 {
    (micros as u128 * sample_rate as u128 / 1_000_000) as u64
}

/// Fold a play head that ran past `length` back into the clip (looping sources).
pub fn wrap_position(pos: Duration, length: Duration) -> Duration {
    if length.is_zero() {
        return pos;
    }
    let wrapped = pos.as_nanos() % length.as_nanos();
    Duration::from_nanos(wrapped as u64)
}

/// Format a microsecond count as `m:ss`.
pub fn format_timestamp(micros: u64) -> String {
    let minutes = micros / 60_000_000;
    let seconds = (micros / 1_000_000) % 60;
    format!("{minutes}:{seconds:02}")
}
