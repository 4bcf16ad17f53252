//! Recursive playlist reader.
//!
//! Nested playlists are expanded in place. Every read keeps a set of playlist
//! files already visited so self- or mutually-referencing playlists are read
//! once per participant instead of looping forever. Problems with a nested
//! entry are logged and skipped; only the top-level file can fail a read.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::audio::ClipBackend;
use crate::error::{Error, Result};
use crate::session::Session;

use super::format::PlaylistFormat;
use super::pls;

/// Read the playlist at `path` into a new session.
pub fn read<B: ClipBackend>(path: impl AsRef<Path>, backend: Arc<B>) -> Result<Session<B>> {
    let mut session = Session::new(backend);
    read_into(path, &mut session)?;
    Ok(session)
}

/// Append the tracks of the playlist at `path` to `session`.
///
/// Returns how many tracks were added.
pub fn read_into<B: ClipBackend>(path: impl AsRef<Path>, session: &mut Session<B>) -> Result<usize> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let format =
        PlaylistFormat::from_path(path).ok_or_else(|| Error::InvalidFormat(path.to_path_buf()))?;

    let before = session.len();
    let mut reader = Reader::new(session);
    match format {
        PlaylistFormat::M3u => reader.read_m3u(path)?,
        PlaylistFormat::Pls => {
            let contents = fs::read_to_string(path)?;
            if !pls::is_valid(&contents) {
                return Err(Error::InvalidFormat(path.to_path_buf()));
            }
            reader.read_pls_contents(path, &contents);
        }
    }
    let added = session.len() - before;

    tracing::debug!(path = %path.display(), added, "playlist read");
    Ok(added)
}

/// Whether `path` names a PLS file that passes structural validation.
pub fn is_valid_pls(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    Ok(pls::is_valid(&fs::read_to_string(path)?))
}

struct Reader<'a, B: ClipBackend> {
    session: &'a mut Session<B>,
    visited: HashSet<PathBuf>,
}

impl<'a, B: ClipBackend> Reader<'a, B> {
    fn new(session: &'a mut Session<B>) -> Self {
        Self {
            session,
            visited: HashSet::new(),
        }
    }

    /// Mark `path` visited. Returns `false` if it already was.
    fn enter(&mut self, path: &Path) -> bool {
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if self.visited.insert(key) {
            true
        } else {
            tracing::warn!(path = %path.display(), "playlist cycle detected, not reading it again");
            false
        }
    }

    fn read_m3u(&mut self, path: &Path) -> io::Result<()> {
        if !self.enter(path) {
            return Ok(());
        }

        let contents = fs::read_to_string(path)?;
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some(entry) = resolve(line, path) else {
                tracing::warn!(entry = line, playlist = %path.display(), "entry does not exist, skipping");
                continue;
            };
            match PlaylistFormat::from_path(&entry) {
                Some(PlaylistFormat::M3u) => self.nested(&entry, Self::read_m3u),
                Some(PlaylistFormat::Pls) => self.nested(&entry, Self::read_pls),
                None => self.add(&entry),
            }
        }
        Ok(())
    }

    fn read_pls(&mut self, path: &Path) -> io::Result<()> {
        let contents = fs::read_to_string(path)?;
        if !pls::is_valid(&contents) {
            tracing::warn!(path = %path.display(), "nested PLS file is invalid, skipping");
            return Ok(());
        }
        self.read_pls_contents(path, &contents);
        Ok(())
    }

    // PLS entries may reference other PLS files but not M3U ones; anything
    // that is not `.pls` is handed to the session as a track.
    fn read_pls_contents(&mut self, path: &Path, contents: &str) {
        if !self.enter(path) {
            return;
        }

        for value in pls::file_entries(contents) {
            let Some(entry) = resolve(&value, path) else {
                tracing::warn!(entry = value, playlist = %path.display(), "entry does not exist, skipping");
                continue;
            };
            if PlaylistFormat::from_path(&entry) == Some(PlaylistFormat::Pls) {
                self.nested(&entry, Self::read_pls);
            } else {
                self.add(&entry);
            }
        }
    }

    fn nested(&mut self, path: &Path, read: fn(&mut Self, &Path) -> io::Result<()>) {
        if let Err(e) = read(self, path) {
            tracing::warn!(path = %path.display(), error = %e, "could not read nested playlist, skipping");
        }
    }

    fn add(&mut self, entry: &Path) {
        let source = entry.to_string_lossy().into_owned();
        match self.session.add(source.as_str()) {
            Ok(()) => {}
            Err(Error::AlreadyExists(_)) => {
                tracing::debug!(source, "duplicate entry, skipping");
            }
            Err(e) => {
                tracing::warn!(source, error = %e, "could not add entry, skipping");
            }
        }
    }
}

/// Resolve a playlist entry as given, or relative to the playlist that lists it.
fn resolve(entry: &str, playlist: &Path) -> Option<PathBuf> {
    let direct = Path::new(entry);
    if direct.exists() {
        return Some(direct.to_path_buf());
    }
    let relative = playlist
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(entry);
    relative.exists().then_some(relative)
}
