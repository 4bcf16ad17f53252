//! Background task that keeps a playlist going while playlist looping is on.
//!
//! The driver polls: whenever nothing is running it plays the track after the
//! one it last started. It never assumes which track stopped, so the caller is
//! free to `play`/`stop`/`remove` concurrently.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::audio::Clip;

use super::state::{SharedState, lock};

pub(crate) struct AutoplayDriver {
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl AutoplayDriver {
    /// `seed` is the index playing when looping was enabled; the first advance
    /// goes to the track after it (or to the first track).
    pub(crate) fn spawn<C: Clip>(
        state: SharedState<C>,
        seed: Option<usize>,
        interval: Duration,
    ) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            let mut cursor = seed;
            loop {
                {
                    let mut state = lock(&state);
                    if !state.tracks.is_empty() && state.index_playing().is_none() {
                        let next = match cursor {
                            Some(i) if i + 1 < state.tracks.len() => i + 1,
                            _ => 0,
                        };
                        state.play_index(next);
                        cursor = Some(next);
                        tracing::debug!(index = next, "autoplay advanced");
                    }
                }

                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            tracing::debug!("autoplay stopped");
        });

        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Wake the driver and wait for it to exit. Once this returns the driver
    /// issues no further plays.
    pub(crate) fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // The driver may already be gone; a failed send is fine.
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("autoplay driver panicked");
            }
        }
    }
}

impl Drop for AutoplayDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
