use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/reprise/config.toml` or `~/.config/reprise/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `REPRISE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub playlists: PlaylistSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// How often the autoplay driver checks for a finished track (milliseconds).
    pub poll_interval_ms: u64,
    /// Initial gain in decibels, clamped to [-80, 6.0206].
    pub volume_db: f32,
    /// Whether new sessions start muted.
    pub muted: bool,
    /// Loop mode applied when playback starts.
    pub loop_mode: LoopModeSetting,
}

impl PlaybackSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 200,
            volume_db: 0.0,
            muted: false,
            loop_mode: LoopModeSetting::NoLoop,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopModeSetting {
    #[serde(alias = "no_loop", alias = "noloop", alias = "off")]
    NoLoop,
    #[serde(
        alias = "loopone",
        alias = "loop_one",
        alias = "repeat-one",
        alias = "single"
    )]
    LoopOne,
    #[serde(
        alias = "loopall",
        alias = "loop_all",
        alias = "loop-around",
        alias = "playlist"
    )]
    LoopAll,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Directory playlists are saved into unless an explicit path is given.
    pub default_dir: PathBuf,
    /// Format used when a name carries no recognized extension.
    pub default_format: FormatSetting,
    /// Emit an `#EXTM3U` header line when writing M3U.
    pub extended_m3u: bool,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            default_dir: PathBuf::from("data"),
            default_format: FormatSetting::M3u,
            extended_m3u: false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatSetting {
    #[serde(alias = "m3u8", alias = "extm3u", alias = "ext-m3u")]
    M3u,
    Pls,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}
