//! Playlist playback: read and write M3U/PLS playlists, and play their tracks
//! with single-track or whole-playlist looping.

pub mod audio;
pub mod config;
pub mod error;
pub mod library;
pub mod playlist;
pub mod session;

pub use audio::{Clip, ClipBackend, ClipError, LoopMode, RodioBackend, Track, format_timestamp};
pub use error::{Error, Result};
pub use library::{Library, MAIN};
pub use playlist::{Placement, PlaylistFormat, PlaylistWriter};
pub use session::Session;
