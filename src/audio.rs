//! Audio boundary: the clip capability traits, the rodio backend and the
//! per-track adapter the playback session drives.

mod clip;
mod rodio_backend;
mod track;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use clip::{Clip, ClipBackend, ClipError};
pub use rodio_backend::{RodioBackend, RodioClip};
pub use track::Track;
pub use types::*;
