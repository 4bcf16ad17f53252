//! Single-track adapter over a [`Clip`].
//!
//! The clip does not keep a usable play head once stopped, so the adapter
//! caches it explicitly on [`Track::pause`] and restores it on the next
//! [`Track::play`].

use std::path::Path;

use super::clip::{Clip, ClipBackend, ClipError};
use super::types::{format_timestamp, frames_to_micros, micros_to_frames};

pub struct Track<C: Clip> {
    source: String,
    clip: C,
    length_micros: u64,
    /// Last known play head; only meaningful while `paused`.
    paused_at: u64,
    paused: bool,
    looping: bool,
}

impl<C: Clip> Track<C> {
    /// Open `source` through `backend`.
    pub fn open<B>(backend: &B, source: impl Into<String>) -> Result<Self, ClipError>
    where
        B: ClipBackend<Clip = C> + ?Sized,
    {
        let source = source.into();
        let clip = backend.open(Path::new(&source))?;
        Ok(Self::new(source, clip))
    }

    pub fn new(source: impl Into<String>, clip: C) -> Self {
        let length_micros = clip.length_micros();
        Self {
            source: source.into(),
            clip,
            length_micros,
            paused_at: 0,
            paused: false,
            looping: false,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn path(&self) -> &Path {
        Path::new(&self.source)
    }

    /// Start playback from the beginning, or from where it was paused.
    pub fn play(&mut self) {
        let from = if self.paused { self.paused_at } else { 0 };
        self.clip.set_position_micros(from);
        self.paused_at = 0;
        self.paused = false;
        self.clip.start(self.looping);
    }

    /// Remember the play head, then stop.
    pub fn pause(&mut self) {
        self.paused_at = self.clip.position_micros();
        self.paused = true;
        self.clip.stop();
    }

    pub fn stop(&mut self) {
        self.clip.stop();
    }

    pub fn jump_to(&mut self, micros: u64) {
        self.clip.set_position_micros(micros);
    }

    pub fn jump_to_frame(&mut self, frame: u64) {
        let micros = frames_to_micros(frame, self.clip.sample_rate());
        self.jump_to(micros);
    }

    pub fn is_playing(&self) -> bool {
        self.clip.is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn paused_position(&self) -> u64 {
        self.paused_at
    }

    /// Current play head in microseconds.
    pub fn position_micros(&self) -> u64 {
        self.clip.position_micros()
    }

    pub fn position_frames(&self) -> u64 {
        micros_to_frames(self.position_micros(), self.clip.sample_rate())
    }

    pub fn length_micros(&self) -> u64 {
        self.length_micros
    }

    pub fn length_frames(&self) -> u64 {
        micros_to_frames(self.length_micros, self.clip.sample_rate())
    }

    /// Length formatted as `m:ss`.
    pub fn duration_label(&self) -> String {
        format_timestamp(self.length_micros)
    }

    /// Repeat forever from the next [`Track::play`] on.
    pub fn loop_on(&mut self) {
        self.looping = true;
    }

    /// Stop repeating. A running clip finishes its current pass and ends.
    pub fn no_loop(&mut self) {
        self.looping = false;
        if self.clip.is_running() {
            self.clip.set_repeat(false);
        }
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn volume(&self) -> f32 {
        self.clip.gain_db()
    }

    pub fn set_volume(&mut self, db: f32) {
        let (min, max) = self.clip.gain_range();
        self.clip.set_gain_db(db.clamp(min, max));
    }

    pub fn min_volume(&self) -> f32 {
        self.clip.gain_range().0
    }

    pub fn max_volume(&self) -> f32 {
        self.clip.gain_range().1
    }

    pub fn mute(&mut self) {
        self.clip.set_muted(true);
    }

    pub fn unmute(&mut self) {
        self.clip.set_muted(false);
    }

    pub fn is_muted(&self) -> bool {
        self.clip.is_muted()
    }
}

impl<C: Clip> std::fmt::Debug for Track<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Track")
            .field("source", &self.source)
            .field("length_micros", &self.length_micros)
            .field("paused", &self.paused)
            .field("looping", &self.looping)
            .finish()
    }
}
