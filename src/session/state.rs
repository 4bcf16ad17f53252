use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::audio::{Clip, Track};

/// Playback state shared between the foreground caller and the autoplay driver.
pub(crate) struct PlaybackState<C: Clip> {
    pub(crate) tracks: Vec<Track<C>>,
    pub(crate) last_played: Option<usize>,
    pub(crate) paused: bool,
}

pub(crate) type SharedState<C> = Arc<Mutex<PlaybackState<C>>>;

pub(crate) fn lock<C: Clip>(state: &Mutex<PlaybackState<C>>) -> MutexGuard<'_, PlaybackState<C>> {
    // A panicking holder cannot leave the track list half-updated in a way
    // that matters for playback, so keep going with the inner value.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<C: Clip> PlaybackState<C> {
    pub(crate) fn new() -> Self {
        Self {
            tracks: Vec::new(),
            last_played: None,
            paused: false,
        }
    }

    pub(crate) fn position_of(&self, source: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.source() == source)
    }

    pub(crate) fn index_playing(&self) -> Option<usize> {
        self.tracks.iter().position(|t| t.is_playing())
    }

    pub(crate) fn stop_all(&mut self) {
        for track in &mut self.tracks {
            track.stop();
        }
        self.paused = false;
    }

    /// Stop everything, then play `index`. Keeps at most one track running.
    pub(crate) fn play_index(&mut self, index: usize) {
        self.stop_all();
        self.tracks[index].play();
        self.last_played = Some(index);
    }

    /// Seek the playing (else last played, else first) track, starting it if needed.
    pub(crate) fn jump_to(&mut self, micros: u64) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        let index = self
            .index_playing()
            .or(self.last_played)
            .filter(|&i| i < self.tracks.len())
            .unwrap_or(0);
        if !self.tracks[index].is_playing() {
            self.play_index(index);
        }
        self.tracks[index].jump_to(micros);
        self.last_played = Some(index);
        Some(index)
    }
}
