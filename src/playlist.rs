//! Playlist files: reading M3U/PLS into a session and writing track lists back.

mod format;
mod parser;
mod pls;
mod writer;

pub use format::PlaylistFormat;
pub use parser::{is_valid_pls, read, read_into};
pub use writer::{EXTM3U_HEADER, Placement, PlaylistWriter, render_m3u};
