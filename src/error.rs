//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::audio::ClipError;

#[derive(Debug, Error)]
pub enum Error {
    /// The input file (or a file it requires) does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Unrecognized playlist extension, or a PLS file that failed validation.
    #[error("{} is not a valid playlist file", .0.display())]
    InvalidFormat(PathBuf),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The audio backend recognized the file but cannot decode it.
    #[error("unsupported audio format: {0}")]
    Unsupported(String),

    #[error("could not open {path}: {reason}")]
    Open { path: String, reason: String },

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("track not found: {0}")]
    TrackNotFound(String),

    #[error("playlist not found: {0}")]
    PlaylistNotFound(String),

    #[error("playlist is empty")]
    EmptyPlaylist,

    /// Nothing has been played and there is nothing to play.
    #[error("no track is playable")]
    NotPlayable,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn from_clip(source: &str, err: ClipError) -> Self {
        match err {
            ClipError::Unsupported => Self::Unsupported(source.to_string()),
            ClipError::Open(reason) => Self::Open {
                path: source.to_string(),
                reason,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
