//! Time-driven stand-in for a real audio device, used by tests.
//!
//! A fake clip "plays" by measuring wall-clock time since it was started, so
//! tracks end on their own once `length` has elapsed.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::clip::{Clip, ClipBackend, ClipError};
use super::types::{MAX_VOLUME, MIN_VOLUME, wrap_position};

#[derive(Clone)]
pub(crate) struct FakeBackend {
    length: Duration,
    starts: Arc<Mutex<Vec<String>>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::with_length(Duration::from_secs(60))
    }

    pub(crate) fn with_length(length: Duration) -> Self {
        Self {
            length,
            starts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sources in the order their clips were started.
    pub(crate) fn starts(&self) -> Vec<String> {
        self.starts.lock().unwrap().clone()
    }
}

impl ClipBackend for FakeBackend {
    type Clip = FakeClip;

    fn open(&self, path: &Path) -> Result<FakeClip, ClipError> {
        let name = path.to_string_lossy().into_owned();
        if name.contains("unsupported") {
            return Err(ClipError::Unsupported);
        }
        if name.contains("broken") {
            return Err(ClipError::Open("device busy".to_string()));
        }
        Ok(FakeClip {
            name,
            length: self.length,
            started_at: None,
            offset: Duration::ZERO,
            repeat: false,
            gain_db: 0.0,
            muted: false,
            starts: self.starts.clone(),
        })
    }
}

pub(crate) struct FakeClip {
    name: String,
    length: Duration,
    started_at: Option<Instant>,
    offset: Duration,
    repeat: bool,
    gain_db: f32,
    muted: bool,
    starts: Arc<Mutex<Vec<String>>>,
}

impl FakeClip {
    fn raw_position(&self) -> Duration {
        self.offset + self.started_at.map_or(Duration::ZERO, |t| t.elapsed())
    }

    fn position(&self) -> Duration {
        let raw = self.raw_position();
        if self.repeat {
            wrap_position(raw, self.length)
        } else {
            raw.min(self.length)
        }
    }
}

impl Clip for FakeClip {
    fn start(&mut self, loop_forever: bool) {
        self.repeat = loop_forever;
        self.started_at = Some(Instant::now());
        self.starts.lock().unwrap().push(self.name.clone());
    }

    fn stop(&mut self) {
        self.offset = self.position();
        self.started_at = None;
    }

    fn is_running(&self) -> bool {
        self.started_at.is_some() && (self.repeat || self.raw_position() < self.length)
    }

    fn position_micros(&self) -> u64 {
        self.position().as_micros() as u64
    }

    fn set_position_micros(&mut self, micros: u64) {
        self.offset = Duration::from_micros(micros);
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
    }

    fn length_micros(&self) -> u64 {
        self.length.as_micros() as u64
    }

    fn sample_rate(&self) -> u32 {
        44_100
    }

    fn set_repeat(&mut self, loop_forever: bool) {
        if self.started_at.is_some() {
            self.offset = self.position();
            self.started_at = Some(Instant::now());
        }
        self.repeat = loop_forever;
    }

    fn gain_range(&self) -> (f32, f32) {
        (MIN_VOLUME, MAX_VOLUME)
    }

    fn gain_db(&self) -> f32 {
        self.gain_db
    }

    fn set_gain_db(&mut self, db: f32) {
        self.gain_db = db;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}
