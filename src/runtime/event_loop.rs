use std::thread;

use reprise::{ClipBackend, Session};

/// Play the session's tracks in order until the last one ends.
///
/// With single-track looping the current track never ends, and with playlist
/// looping the autoplay driver keeps playback going; both run until the
/// process is interrupted.
pub fn play_through<B: ClipBackend>(session: &mut Session<B>) -> Result<(), Box<dyn std::error::Error>> {
    if !session.is_playlist_looping() {
        session.play_next()?;
    }

    let interval = session.poll_interval();
    loop {
        thread::sleep(interval);

        if session.is_playlist_looping() || session.index_playing().is_some() {
            continue;
        }

        match session.last_played() {
            Some(i) if i + 1 < session.len() => {
                session.play_at(i + 1)?;
                tracing::debug!(index = i + 1, "next track");
            }
            _ => break,
        }
    }

    tracing::info!("end of playlist");
    Ok(())
}
