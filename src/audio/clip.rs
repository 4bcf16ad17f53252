//! The capability boundary between playback state and the audio device.
//!
//! A [`Clip`] is one opened, fully-seekable audio resource. The session and
//! track adapter only ever talk to this trait, so any backend that can start,
//! stop, seek and attenuate a source can drive them.

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipError {
    /// The file was read but its format cannot be decoded.
    #[error("unsupported audio format")]
    Unsupported,
    /// Any other failure acquiring the resource.
    #[error("{0}")]
    Open(String),
}

pub trait Clip: Send + 'static {
    /// Start playing from the current position. `loop_forever` repeats the
    /// whole clip until [`Clip::set_repeat`] or [`Clip::stop`] is called.
    fn start(&mut self, loop_forever: bool);
    fn stop(&mut self);
    fn is_running(&self) -> bool;

    fn position_micros(&self) -> u64;
    fn set_position_micros(&mut self, micros: u64);
    fn length_micros(&self) -> u64;
    fn sample_rate(&self) -> u32;

    /// Change the repeat mode of a live clip without moving its play head.
    fn set_repeat(&mut self, loop_forever: bool);

    /// `(min, max)` gain in decibels this clip accepts.
    fn gain_range(&self) -> (f32, f32);
    fn gain_db(&self) -> f32;
    fn set_gain_db(&mut self, db: f32);

    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;
}

/// Opens clips for a path.
pub trait ClipBackend {
    type Clip: Clip;

    fn open(&self, path: &Path) -> Result<Self::Clip, ClipError>;
}
