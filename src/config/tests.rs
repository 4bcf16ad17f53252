use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_reprise_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("REPRISE_CONFIG_PATH", "/tmp/reprise-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/reprise-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("reprise")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("reprise")
            .join("config.toml")
    );
}

#[test]
fn defaults_poll_every_200ms_and_save_m3u_into_data() {
    let s = Settings::default();
    assert_eq!(s.playback.poll_interval_ms, 200);
    assert_eq!(s.playback.volume_db, 0.0);
    assert!(!s.playback.muted);
    assert_eq!(s.logging.filter, "warn");
    assert_eq!(s.playback.loop_mode, LoopModeSetting::NoLoop);
    assert_eq!(s.playlists.default_dir, std::path::PathBuf::from("data"));
    assert_eq!(s.playlists.default_format, FormatSetting::M3u);
    assert!(!s.playlists.extended_m3u);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file_and_parse_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
poll_interval_ms = 50
volume_db = -12.5
muted = true
loop_mode = "repeat-one"

[playlists]
default_dir = "/tmp/reprise-playlists"
default_format = "extm3u"
extended_m3u = true

[logging]
filter = "reprise=debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("REPRISE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("REPRISE__PLAYBACK__POLL_INTERVAL_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.poll_interval_ms, 50);
    assert_eq!(s.playback.poll_interval(), std::time::Duration::from_millis(50));
    assert_eq!(s.playback.volume_db, -12.5);
    assert!(s.playback.muted);
    assert_eq!(s.playback.loop_mode, LoopModeSetting::LoopOne);
    assert_eq!(
        s.playlists.default_dir,
        std::path::PathBuf::from("/tmp/reprise-playlists")
    );
    assert_eq!(s.playlists.default_format, FormatSetting::M3u);
    assert!(s.playlists.extended_m3u);
    assert_eq!(s.logging.filter, "reprise=debug");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
poll_interval_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("REPRISE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("REPRISE__PLAYBACK__POLL_INTERVAL_MS", "20");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.poll_interval_ms, 20);
}

#[test]
fn validate_rejects_zero_poll_interval() {
    let mut s = Settings::default();
    s.playback.poll_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.volume_db = f32::NAN;
    assert!(s.validate().is_err());
}

#[test]
fn partial_config_file_keeps_other_sections_at_defaults() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "[logging]\nfilter = \"info\"\n").unwrap();

    let _g1 = EnvGuard::set("REPRISE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("REPRISE__PLAYBACK__POLL_INTERVAL_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.logging.filter, "info");
    assert_eq!(s.playback.poll_interval_ms, 200);
    assert_eq!(s.playlists.default_format, FormatSetting::M3u);
}

#[test]
fn missing_config_file_loads_defaults() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("absent.toml");
    let _g1 = EnvGuard::set("REPRISE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("REPRISE__PLAYBACK__POLL_INTERVAL_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.poll_interval_ms, 200);
    assert!(s.validate().is_ok());
}
