//! Named playlists held side by side, one of which is in focus.
//!
//! The registry always holds [`MAIN`]. Volume and mute apply library-wide and
//! carry over to playlists created or opened later.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::audio::{ClipBackend, clamp_volume};
use crate::config::{PlaybackSettings, Settings};
use crate::error::{Error, Result};
use crate::playlist::{self, Placement, PlaylistFormat, PlaylistWriter};
use crate::session::Session;

/// Name of the playlist that always exists.
pub const MAIN: &str = "main";

pub struct Library<B: ClipBackend> {
    backend: Arc<B>,
    playback: PlaybackSettings,
    writer: PlaylistWriter,
    main: Session<B>,
    others: BTreeMap<String, Session<B>>,
    current: String,
}

impl<B: ClipBackend> Library<B> {
    pub fn new(backend: Arc<B>, settings: &Settings) -> Self {
        let main = Session::with_settings(backend.clone(), &settings.playback);
        Self {
            backend,
            playback: settings.playback.clone(),
            writer: PlaylistWriter::new(&settings.playlists),
            main,
            others: BTreeMap::new(),
            current: MAIN.to_string(),
        }
    }

    fn fresh_session(&self) -> Session<B> {
        Session::with_settings(self.backend.clone(), &self.playback)
    }

    pub fn writer(&self) -> &PlaylistWriter {
        &self.writer
    }

    // --- registry ---------------------------------------------------------

    pub fn current_name(&self) -> &str {
        &self.current
    }

    pub fn current(&self) -> &Session<B> {
        self.others.get(&self.current).unwrap_or(&self.main)
    }

    pub fn current_mut(&mut self) -> &mut Session<B> {
        match self.others.get_mut(&self.current) {
            Some(session) => session,
            None => &mut self.main,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Session<B>> {
        if name == MAIN {
            Some(&self.main)
        } else {
            self.others.get(name)
        }
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Session<B>> {
        if name == MAIN {
            Some(&mut self.main)
        } else {
            self.others.get_mut(name)
        }
    }

    fn contains(&self, name: &str) -> bool {
        name == MAIN || self.others.contains_key(name)
    }

    /// [`MAIN`] first, then the rest in sorted order.
    pub fn names(&self) -> Vec<String> {
        std::iter::once(MAIN.to_string())
            .chain(self.others.keys().cloned())
            .collect()
    }

    /// Number of playlists, [`MAIN`] included.
    pub fn len(&self) -> usize {
        self.others.len() + 1
    }

    fn sessions_mut(&mut self) -> impl Iterator<Item = &mut Session<B>> {
        std::iter::once(&mut self.main).chain(self.others.values_mut())
    }

    /// Create an empty playlist and bring it into focus.
    pub fn make_new(&mut self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::InvalidArgument("playlist name is empty".to_string()));
        }
        if self.contains(name) {
            return Err(Error::AlreadyExists(name.to_string()));
        }
        let session = self.fresh_session();
        self.others.insert(name.to_string(), session);
        self.current = name.to_string();
        tracing::info!(name, "playlist created");
        Ok(())
    }

    pub fn switch_to(&mut self, name: &str) -> Result<()> {
        if !self.contains(name) {
            return Err(Error::PlaylistNotFound(name.to_string()));
        }
        self.current = name.to_string();
        tracing::debug!(name, "playlist in focus");
        Ok(())
    }

    /// Drop a playlist, stopping its tracks. Focus falls back to [`MAIN`].
    pub fn remove(&mut self, name: &str) -> Result<()> {
        if name == MAIN {
            return Err(Error::InvalidArgument(format!(
                "the {MAIN} playlist cannot be removed"
            )));
        }
        if self.others.remove(name).is_none() {
            return Err(Error::PlaylistNotFound(name.to_string()));
        }
        if self.current == name {
            self.current = MAIN.to_string();
        }
        tracing::info!(name, "playlist removed");
        Ok(())
    }

    /// Read a playlist file and register it under its file name.
    ///
    /// A taken name gets a numeric suffix ahead of the extension (`mix1.m3u`,
    /// `mix2.m3u`, ...).
    /// Focus does not change. Returns the registered name.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let mut session = self.fresh_session();
        playlist::read_into(path, &mut session)?;

        let base = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let (stem, ext) = match PlaylistFormat::split_extension(&base) {
            Some((stem, _)) => base.split_at(stem.len()),
            None => (base.as_str(), ""),
        };
        let mut name = base.clone();
        let mut copy = 0u32;
        while self.contains(&name) {
            copy += 1;
            name = format!("{stem}{copy}{ext}");
        }

        tracing::info!(path = %path.display(), name, tracks = session.len(), "playlist opened");
        self.others.insert(name.clone(), session);
        Ok(name)
    }

    // --- persistence ------------------------------------------------------

    /// Save the focused playlist into the default directory under its own name.
    pub fn save(&self) -> Result<PathBuf> {
        self.writer.write(&self.current().paths(), &self.current)
    }

    /// Save every playlist under its own name. Stops at the first failure.
    pub fn save_all(&self) -> Result<Vec<PathBuf>> {
        std::iter::once((MAIN, &self.main))
            .chain(self.others.iter().map(|(name, session)| (name.as_str(), session)))
            .map(|(name, session)| self.writer.write(&session.paths(), name))
            .collect()
    }

    /// Save the focused playlist into the default directory under `name`.
    pub fn save_as(&self, name: &str) -> Result<PathBuf> {
        self.writer.write(&self.current().paths(), name)
    }

    /// Save the focused playlist under its own name in `format`.
    pub fn save_with_format(&self, format: PlaylistFormat) -> Result<PathBuf> {
        self.writer
            .write_as(&self.current().paths(), &self.current, format)
    }

    /// Save the focused playlist to `path` itself rather than the default directory.
    pub fn save_to(&self, path: &str) -> Result<PathBuf> {
        self.writer
            .write_to(&self.current().paths(), path, None, Placement::AsGiven)
    }

    // --- library-wide state -----------------------------------------------

    /// Clamp `db` and apply it to every playlist. Returns the applied value.
    pub fn set_volume(&mut self, db: f32) -> f32 {
        if db.is_nan() {
            return self.playback.volume_db;
        }
        let db = clamp_volume(db);
        self.playback.volume_db = db;
        for session in self.sessions_mut() {
            session.set_volume(db);
        }
        db
    }

    pub fn volume(&self) -> f32 {
        self.playback.volume_db
    }

    pub fn mute(&mut self) {
        self.playback.muted = true;
        for session in self.sessions_mut() {
            session.mute();
        }
    }

    pub fn unmute(&mut self) {
        self.playback.muted = false;
        for session in self.sessions_mut() {
            session.unmute();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.playback.muted
    }

    /// Drop every playlist but [`MAIN`], then empty and unmute it.
    pub fn reset(&mut self) {
        self.others.clear();
        self.current = MAIN.to_string();
        self.playback.muted = false;

        let main = &mut self.main;
        main.disable_loop_playlist();
        main.no_loop();
        main.clear();
        main.unmute();
        tracing::info!("library reset");
    }

    /// Turn off all looping and stop every track in every playlist.
    pub fn cleanup(&mut self) {
        for session in self.sessions_mut() {
            session.no_loop();
            session.disable_loop_playlist();
            session.stop_all();
        }
        tracing::debug!("all playback stopped");
    }
}

#[cfg(test)]
mod tests;
