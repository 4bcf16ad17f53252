//! `rodio` implementation of the clip boundary.
//!
//! Every clip keeps its decoded source buffered so it can be replayed. A play
//! head move rebuilds the sink and skips into the buffered source, the same
//! way scrubbing works elsewhere: `skip_duration` is the seeking primitive.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::decoder::DecoderError;
use rodio::mixer::Mixer;
use rodio::source::Buffered;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::clip::{Clip, ClipBackend, ClipError};
use super::types::{MAX_VOLUME, MIN_VOLUME, db_to_amplitude, wrap_position};

type ClipSource = Buffered<Decoder<BufReader<File>>>;

/// Opens clips on the default output device.
pub struct RodioBackend {
    stream: OutputStream,
}

impl RodioBackend {
    pub fn open_default() -> Result<Self, ClipError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| ClipError::Open(format!("no audio output device: {e}")))?;
        // rodio logs to stderr when the stream is dropped.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl ClipBackend for RodioBackend {
    type Clip = RodioClip;

    fn open(&self, path: &Path) -> Result<RodioClip, ClipError> {
        let file = File::open(path).map_err(|e| ClipError::Open(e.to_string()))?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|e| match e {
            DecoderError::UnrecognizedFormat => ClipError::Unsupported,
            other => ClipError::Open(other.to_string()),
        })?;

        let sample_rate: u32 = decoder.sample_rate().into();
        let length = decoder
            .total_duration()
            .or_else(|| probe_duration(path))
            .unwrap_or(Duration::ZERO);

        Ok(RodioClip {
            mixer: self.stream.mixer().clone(),
            source: decoder.buffered(),
            sink: None,
            length,
            sample_rate,
            cursor: Duration::ZERO,
            repeat: false,
            gain_db: 0.0,
            muted: false,
        })
    }
}

// Some decoders cannot report a length up front; fall back to the tags.
fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
}

pub struct RodioClip {
    mixer: Mixer,
    source: ClipSource,
    /// Live sink while the clip is loaded; `None` once stopped.
    sink: Option<Sink>,
    length: Duration,
    sample_rate: u32,
    /// Offset the loaded sink started from, or the resume point when stopped.
    cursor: Duration,
    repeat: bool,
    gain_db: f32,
    muted: bool,
}

impl RodioClip {
    fn position(&self) -> Duration {
        let Some(sink) = self.sink.as_ref() else {
            return self.cursor;
        };
        let pos = self.cursor + sink.get_pos();
        if self.repeat {
            wrap_position(pos, self.length)
        } else if self.length.is_zero() {
            pos
        } else {
            pos.min(self.length)
        }
    }

    /// Replace the sink with a fresh one playing from `from`.
    fn load(&mut self, from: Duration, repeat: bool) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let sink = Sink::connect_new(&self.mixer);
        sink.pause();
        if repeat {
            sink.append(self.source.clone().repeat_infinite().skip_duration(from));
        } else {
            sink.append(self.source.clone().skip_duration(from));
        }
        sink.set_volume(self.amplitude());
        sink.play();

        self.sink = Some(sink);
        self.cursor = from;
        self.repeat = repeat;
    }

    fn amplitude(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            db_to_amplitude(self.gain_db)
        }
    }
}

impl Clip for RodioClip {
    fn start(&mut self, loop_forever: bool) {
        let from = self.cursor;
        self.load(from, loop_forever);
    }

    fn stop(&mut self) {
        self.cursor = self.position();
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn is_running(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|s| !s.is_paused() && !s.empty())
    }

    fn position_micros(&self) -> u64 {
        self.position().as_micros() as u64
    }

    fn set_position_micros(&mut self, micros: u64) {
        let target = Duration::from_micros(micros);
        if self.is_running() {
            self.load(target, self.repeat);
        } else {
            if let Some(sink) = self.sink.take() {
                sink.stop();
            }
            self.cursor = target;
        }
    }

    fn length_micros(&self) -> u64 {
        self.length.as_micros() as u64
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn set_repeat(&mut self, loop_forever: bool) {
        if loop_forever == self.repeat {
            return;
        }
        if self.is_running() {
            let here = self.position();
            self.load(here, loop_forever);
        } else {
            self.repeat = loop_forever;
        }
    }

    fn gain_range(&self) -> (f32, f32) {
        (MIN_VOLUME, MAX_VOLUME)
    }

    fn gain_db(&self) -> f32 {
        self.gain_db
    }

    fn set_gain_db(&mut self, db: f32) {
        self.gain_db = db;
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.amplitude());
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.amplitude());
        }
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}
