//! Playback session: an ordered list of tracks plus loop, pause and volume state.
//!
//! A [`Session`] owns its tracks. The track list, last-played index and paused
//! flag sit behind a mutex so the autoplay driver can advance the playlist from
//! its own thread while playlist looping is on.

mod driver;
mod state;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::audio::{ClipBackend, LoopMode, Track, clamp_volume};
use crate::config::PlaybackSettings;
use crate::error::{Error, Result};

use driver::AutoplayDriver;
use state::{PlaybackState, SharedState, lock};

/// Default wait between two autoplay checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

pub struct Session<B: ClipBackend> {
    backend: Arc<B>,
    state: SharedState<B::Clip>,
    driver: Option<AutoplayDriver>,
    poll_interval: Duration,
    volume: f32,
    muted: bool,
    single_looping: bool,
}

impl<B: ClipBackend> Session<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(PlaybackState::new())),
            driver: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            volume: 0.0,
            muted: false,
            single_looping: false,
        }
    }

    /// A session with the configured poll interval, volume and mute state.
    pub fn with_settings(backend: Arc<B>, settings: &PlaybackSettings) -> Self {
        let mut session = Self::new(backend);
        session.poll_interval = settings.poll_interval();
        session.volume = clamp_volume(settings.volume_db);
        session.muted = settings.muted;
        session
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Takes effect the next time playlist looping is enabled.
    pub fn set_poll_interval(&mut self, interval: Duration) {
        self.poll_interval = interval;
    }

    // --- track list -------------------------------------------------------

    /// Open `source` and append it. Duplicates are rejected by exact string match.
    pub fn add(&mut self, source: impl Into<String>) -> Result<()> {
        let source = source.into();
        if lock(&self.state).position_of(&source).is_some() {
            return Err(Error::AlreadyExists(source));
        }

        let mut track =
            Track::open(self.backend.as_ref(), source.as_str()).map_err(|e| Error::from_clip(&source, e))?;
        if self.muted {
            track.mute();
        }
        track.set_volume(self.volume);
        if self.single_looping {
            track.loop_on();
        }

        lock(&self.state).tracks.push(track);
        Ok(())
    }

    /// Stop and drop the track named `source`.
    pub fn remove(&mut self, source: &str) -> Result<()> {
        let mut state = lock(&self.state);
        let index = state
            .position_of(source)
            .ok_or_else(|| Error::TrackNotFound(source.to_string()))?;

        let mut track = state.tracks.remove(index);
        track.stop();
        state.last_played = match state.last_played {
            Some(last) if last > index => Some(last - 1),
            Some(last) if last == index => index.checked_sub(1),
            other => other,
        };
        Ok(())
    }

    /// Stop and release every track and forget playback history.
    pub fn clear(&mut self) {
        self.disable_loop_playlist();
        let mut state = lock(&self.state);
        state.stop_all();
        state.tracks.clear();
        state.last_played = None;
    }

    pub fn len(&self) -> usize {
        lock(&self.state).tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.state).tracks.is_empty()
    }

    pub fn contains(&self, source: &str) -> bool {
        lock(&self.state).position_of(source).is_some()
    }

    /// Track sources in playback order.
    pub fn paths(&self) -> Vec<String> {
        lock(&self.state)
            .tracks
            .iter()
            .map(|t| t.source().to_string())
            .collect()
    }

    /// Track sources joined by newlines.
    pub fn list(&self) -> String {
        self.paths().join("\n")
    }

    /// Run `f` against the track at `index`, if any.
    pub fn with_track<R>(&self, index: usize, f: impl FnOnce(&Track<B::Clip>) -> R) -> Option<R> {
        lock(&self.state).tracks.get(index).map(f)
    }

    // --- transport --------------------------------------------------------

    /// Stop every other track and play `source`, resuming it if it was paused.
    pub fn play(&mut self, source: &str) -> Result<()> {
        let mut state = lock(&self.state);
        state.stop_all();
        let index = state
            .position_of(source)
            .ok_or_else(|| Error::TrackNotFound(source.to_string()))?;
        state.play_index(index);
        Ok(())
    }

    pub fn play_at(&mut self, index: usize) -> Result<()> {
        let mut state = lock(&self.state);
        if index >= state.tracks.len() {
            return Err(Error::TrackNotFound(format!("#{index}")));
        }
        state.play_index(index);
        Ok(())
    }

    /// Play the track after the last played one, wrapping to the first.
    pub fn play_next(&mut self) -> Result<()> {
        let mut state = lock(&self.state);
        if state.tracks.is_empty() {
            return Err(Error::EmptyPlaylist);
        }
        let next = match state.last_played {
            Some(last) if last + 1 < state.tracks.len() => last + 1,
            _ => 0,
        };
        state.play_index(next);
        Ok(())
    }

    /// Play the track before the playing (else last played) one. At the first
    /// track this rewinds it instead.
    pub fn play_prev(&mut self) -> Result<()> {
        let mut state = lock(&self.state);
        if state.tracks.is_empty() {
            return Err(Error::EmptyPlaylist);
        }

        let from = state
            .index_playing()
            .or(state.last_played.filter(|&i| i < state.tracks.len()));
        match from {
            None => state.play_index(0),
            // Starts the first track if it is not running, then rewinds it.
            Some(0) => {
                state.jump_to(0);
            }
            Some(current) => state.play_index(current - 1),
        }
        Ok(())
    }

    /// Pause the running track. Returns `false` if nothing was playing.
    pub fn pause(&mut self) -> bool {
        let mut state = lock(&self.state);
        let Some(index) = state.index_playing() else {
            return false;
        };
        state.tracks[index].pause();
        state.paused = true;
        true
    }

    /// Seek the playing (else last played, else first) track to `micros`.
    pub fn jump_to(&mut self, micros: u64) -> Result<()> {
        lock(&self.state)
            .jump_to(micros)
            .map(|_| ())
            .ok_or(Error::NotPlayable)
    }

    /// Stop every track. The last played index is kept.
    pub fn stop_all(&mut self) {
        lock(&self.state).stop_all();
    }

    pub fn index_playing(&self) -> Option<usize> {
        lock(&self.state).index_playing()
    }

    pub fn last_played(&self) -> Option<usize> {
        lock(&self.state).last_played
    }

    /// Play head of the running track, if one is running.
    pub fn current_position(&self) -> Option<u64> {
        let state = lock(&self.state);
        state
            .index_playing()
            .map(|i| state.tracks[i].position_micros())
    }

    pub fn is_paused(&self) -> bool {
        lock(&self.state).paused
    }

    // --- looping ----------------------------------------------------------

    /// Repeat whichever track is playing. Turns playlist looping off.
    pub fn loop_track(&mut self) {
        self.disable_loop_playlist();
        self.single_looping = true;
        for track in &mut lock(&self.state).tracks {
            track.loop_on();
        }
    }

    pub fn no_loop(&mut self) {
        self.single_looping = false;
        for track in &mut lock(&self.state).tracks {
            track.no_loop();
        }
    }

    /// Keep playing through the list, wrapping around. Turns single-track looping off.
    pub fn loop_playlist(&mut self) {
        self.no_loop();
        if let Some(driver) = self.driver.take() {
            driver.cancel();
        }
        let seed = self.index_playing();
        self.driver = Some(AutoplayDriver::spawn(
            self.state.clone(),
            seed,
            self.poll_interval,
        ));
        tracing::debug!(?seed, "playlist looping enabled");
    }

    /// Stop the autoplay driver. No further auto-advance happens once this returns.
    pub fn disable_loop_playlist(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.cancel();
            tracing::debug!("playlist looping disabled");
        }
    }

    pub fn is_single_looping(&self) -> bool {
        self.single_looping
    }

    pub fn is_playlist_looping(&self) -> bool {
        self.driver.is_some()
    }

    pub fn loop_mode(&self) -> LoopMode {
        if self.is_playlist_looping() {
            LoopMode::LoopAll
        } else if self.single_looping {
            LoopMode::LoopOne
        } else {
            LoopMode::NoLoop
        }
    }

    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        match mode {
            LoopMode::NoLoop => {
                self.disable_loop_playlist();
                self.no_loop();
            }
            LoopMode::LoopOne => self.loop_track(),
            LoopMode::LoopAll => self.loop_playlist(),
        }
    }

    // --- volume -----------------------------------------------------------

    /// Clamp `db` to the session range and apply it to every track.
    /// Returns the value actually applied.
    pub fn set_volume(&mut self, db: f32) -> f32 {
        if db.is_nan() {
            return self.volume;
        }
        self.volume = clamp_volume(db);
        for track in &mut lock(&self.state).tracks {
            track.set_volume(self.volume);
        }
        self.volume
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn mute(&mut self) {
        self.muted = true;
        for track in &mut lock(&self.state).tracks {
            track.mute();
        }
    }

    pub fn unmute(&mut self) {
        self.muted = false;
        for track in &mut lock(&self.state).tracks {
            track.unmute();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl<B: ClipBackend> Drop for Session<B> {
    fn drop(&mut self) {
        self.disable_loop_playlist();
        lock(&self.state).stop_all();
    }
}
