use super::*;
use crate::audio::fake::FakeBackend;
use crate::audio::{MAX_VOLUME, MIN_VOLUME};
use crate::config::PlaylistSettings;
use std::fs;
use tempfile::TempDir;

fn settings_in(dir: &Path) -> Settings {
    Settings {
        playlists: PlaylistSettings {
            default_dir: dir.to_path_buf(),
            ..PlaylistSettings::default()
        },
        ..Settings::default()
    }
}

fn library_in(dir: &Path) -> Library<FakeBackend> {
    Library::new(Arc::new(FakeBackend::new()), &settings_in(dir))
}

fn touch(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, b"").unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn starts_with_main_in_focus() {
    let dir = TempDir::new().unwrap();
    let library = library_in(dir.path());
    assert_eq!(library.names(), vec![MAIN]);
    assert_eq!(library.current_name(), MAIN);
    assert!(library.current().is_empty());
}

#[test]
fn make_new_focuses_and_rejects_duplicates() {
    let dir = TempDir::new().unwrap();
    let mut library = library_in(dir.path());
    library.make_new("road").unwrap();
    assert_eq!(library.current_name(), "road");
    assert!(matches!(library.make_new("road"), Err(Error::AlreadyExists(_))));
    assert!(matches!(library.make_new(MAIN), Err(Error::AlreadyExists(_))));
    assert!(matches!(library.make_new("  "), Err(Error::InvalidArgument(_))));
    assert_eq!(library.len(), 2);
}

#[test]
fn switch_to_unknown_playlist_fails() {
    let dir = TempDir::new().unwrap();
    let mut library = library_in(dir.path());
    library.make_new("road").unwrap();
    library.switch_to(MAIN).unwrap();
    assert_eq!(library.current_name(), MAIN);
    assert!(matches!(library.switch_to("nope"), Err(Error::PlaylistNotFound(_))));
}

#[test]
fn remove_refuses_main_and_refocuses() {
    let dir = TempDir::new().unwrap();
    let mut library = library_in(dir.path());
    assert!(matches!(library.remove(MAIN), Err(Error::InvalidArgument(_))));

    library.make_new("road").unwrap();
    library.current_mut().add("a.wav").unwrap();
    library.current_mut().play("a.wav").unwrap();
    library.remove("road").unwrap();
    assert_eq!(library.current_name(), MAIN);
    assert!(library.get("road").is_none());
    assert!(matches!(library.remove("road"), Err(Error::PlaylistNotFound(_))));
}

#[test]
fn open_registers_under_file_name_with_suffixes() {
    let dir = TempDir::new().unwrap();
    let a = touch(dir.path(), "a.wav");
    let path = dir.path().join("mix.m3u");
    fs::write(&path, format!("{a}\n")).unwrap();

    let mut library = library_in(dir.path());
    assert_eq!(library.open(&path).unwrap(), "mix.m3u");
    assert_eq!(library.open(&path).unwrap(), "mix1.m3u");
    assert_eq!(library.open(&path).unwrap(), "mix2.m3u");
    assert_eq!(library.current_name(), MAIN);
    assert_eq!(library.get("mix1.m3u").unwrap().paths(), vec![a]);

    assert!(matches!(
        library.open(dir.path().join("missing.m3u")),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn save_uses_playlist_name_and_default_format() {
    let dir = TempDir::new().unwrap();
    let mut library = library_in(dir.path());
    library.current_mut().add("a.wav").unwrap();
    let path = library.save().unwrap();
    assert_eq!(path, dir.path().join("main.m3u"));
    assert_eq!(fs::read_to_string(path).unwrap(), "a.wav\n");

    let pls = library.save_with_format(PlaylistFormat::Pls).unwrap();
    assert_eq!(pls, dir.path().join("main.pls"));
}

#[test]
fn save_all_writes_every_playlist() {
    let dir = TempDir::new().unwrap();
    let mut library = library_in(dir.path());
    library.make_new("road.pls").unwrap();
    library.current_mut().add("b.wav").unwrap();

    let written = library.save_all().unwrap();
    assert_eq!(
        written,
        vec![dir.path().join("main.m3u"), dir.path().join("road.pls")]
    );
}

#[test]
fn save_as_and_save_to_pick_their_targets() {
    let dir = TempDir::new().unwrap();
    let mut library = library_in(&dir.path().join("saved"));
    library.current_mut().add("a.wav").unwrap();

    assert_eq!(
        library.save_as("copy.pls").unwrap(),
        dir.path().join("saved").join("copy.pls")
    );
    let explicit = dir.path().join("explicit");
    assert_eq!(
        library.save_to(&explicit.to_string_lossy()).unwrap(),
        dir.path().join("explicit.m3u")
    );
    assert!(matches!(library.save_as(""), Err(Error::InvalidArgument(_))));
}

#[test]
fn volume_and_mute_apply_everywhere_and_carry_over() {
    let dir = TempDir::new().unwrap();
    let mut library = library_in(dir.path());
    library.make_new("road").unwrap();

    assert_eq!(library.set_volume(100.0), MAX_VOLUME);
    assert_eq!(library.set_volume(-500.0), MIN_VOLUME);
    library.mute();
    for name in library.names() {
        let session = library.get(&name).unwrap();
        assert_eq!(session.volume(), MIN_VOLUME);
        assert!(session.is_muted());
    }

    library.make_new("later").unwrap();
    assert!(library.current().is_muted());
    assert_eq!(library.current().volume(), MIN_VOLUME);

    library.unmute();
    assert!(!library.get(MAIN).unwrap().is_muted());
}

#[test]
fn reset_keeps_only_an_empty_unmuted_main() {
    let dir = TempDir::new().unwrap();
    let mut library = library_in(dir.path());
    library.current_mut().add("a.wav").unwrap();
    library.current_mut().loop_playlist();
    library.make_new("road").unwrap();
    library.mute();

    library.reset();
    assert_eq!(library.names(), vec![MAIN]);
    assert_eq!(library.current_name(), MAIN);
    let main = library.current();
    assert!(main.is_empty());
    assert!(!main.is_muted());
    assert!(!main.is_playlist_looping());
    assert!(!library.is_muted());
}

#[test]
fn cleanup_stops_everything() {
    let dir = TempDir::new().unwrap();
    let mut library = library_in(dir.path());
    library.current_mut().add("a.wav").unwrap();
    library.current_mut().loop_track();
    library.current_mut().play("a.wav").unwrap();
    library.make_new("road").unwrap();
    library.current_mut().add("b.wav").unwrap();
    library.current_mut().loop_playlist();

    library.cleanup();
    for name in library.names() {
        let session = library.get(&name).unwrap();
        assert_eq!(session.index_playing(), None);
        assert!(!session.is_playlist_looping());
        assert!(!session.is_single_looping());
    }
}

#[test]
fn saving_a_renamed_copy_keeps_its_format() {
    let dir = TempDir::new().unwrap();
    let a = touch(dir.path(), "a.wav");
    let path = dir.path().join("mix.pls");
    fs::write(
        &path,
        format!("[playlist]\nFile1={a}\nNumberOfEntries=1\nVersion=2\n"),
    )
    .unwrap();

    let saved = dir.path().join("saved");
    let mut library = library_in(&saved);
    library.open(&path).unwrap();
    let copy = library.open(&path).unwrap();
    library.switch_to(&copy).unwrap();

    let written = library.save().unwrap();
    assert_eq!(written, saved.join("mix1.pls"));
    assert!(fs::read_to_string(written).unwrap().starts_with("[playlist]"));
}
