use std::{env, path::PathBuf};

use super::schema::Settings;

/// Prefix for overrides such as `REPRISE__PLAYBACK__LOOP_MODE=loop-all`.
const ENV_PREFIX: &str = "REPRISE";
/// Names a config file explicitly, bypassing the XDG lookup.
const CONFIG_PATH_VAR: &str = "REPRISE_CONFIG_PATH";

impl Settings {
    /// Build the `playback`, `playlists` and `logging` sections.
    ///
    /// Each key is taken from a `REPRISE__<SECTION>__<KEY>` variable if set,
    /// else from the config file, else from its default (200 ms polling, 0 dB,
    /// unmuted, no looping, M3U into `data/`, `warn` logging). A missing file
    /// is not an error.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = resolve_config_path() {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Reject values a session cannot run with: a zero autoplay poll interval
    /// would spin the driver, and a non-finite gain cannot be clamped.
    pub fn validate(&self) -> Result<(), String> {
        if self.playback.poll_interval_ms == 0 {
            return Err("playback.poll_interval_ms must be >= 1".to_string());
        }
        if !self.playback.volume_db.is_finite() {
            return Err("playback.volume_db must be a finite number".to_string());
        }
        Ok(())
    }
}

/// The file named by `REPRISE_CONFIG_PATH`, else [`default_config_path`].
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `$XDG_CONFIG_HOME/reprise/config.toml`, or `~/.config/reprise/config.toml`
/// when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|dir| dir.join("reprise").join("config.toml"))
}
