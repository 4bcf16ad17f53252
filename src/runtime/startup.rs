use reprise::config::{self, LoopModeSetting};
use reprise::{ClipBackend, LoopMode, Session};

pub fn loop_mode(setting: LoopModeSetting) -> LoopMode {
    match setting {
        LoopModeSetting::NoLoop => LoopMode::NoLoop,
        LoopModeSetting::LoopAll => LoopMode::LoopAll,
        LoopModeSetting::LoopOne => LoopMode::LoopOne,
    }
}

/// Apply the configured loop mode and start the first track.
///
/// Playlist looping starts the first track itself through the autoplay driver.
pub fn apply_playback_defaults<B: ClipBackend>(session: &mut Session<B>, settings: &config::Settings) {
    let mode = loop_mode(settings.playback.loop_mode);
    session.set_loop_mode(mode);
    tracing::info!(?mode, tracks = session.len(), "starting playback");
}
