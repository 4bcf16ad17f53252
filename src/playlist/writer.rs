use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use chrono::Local;

use crate::config::PlaylistSettings;
use crate::error::{Error, Result};

use super::format::PlaylistFormat;
use super::pls;

pub const EXTM3U_HEADER: &str = "#EXTM3U";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Where a written playlist lands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Inside the writer's default directory, keeping only the file name.
    DefaultDir,
    /// At the given name, interpreted as a path.
    AsGiven,
}

/// Serializes ordered track lists to M3U or PLS files.
#[derive(Debug, Clone)]
pub struct PlaylistWriter {
    default_dir: PathBuf,
    default_format: PlaylistFormat,
    extended_m3u: bool,
}

impl PlaylistWriter {
    pub fn new(settings: &PlaylistSettings) -> Self {
        Self {
            default_dir: settings.default_dir.clone(),
            default_format: settings.default_format.into(),
            extended_m3u: settings.extended_m3u,
        }
    }

    pub fn default_dir(&self) -> &Path {
        &self.default_dir
    }

    pub fn default_format(&self) -> PlaylistFormat {
        self.default_format
    }

    /// Write under a local-time name such as `2024-05-01_13-45-10.m3u`.
    pub fn write_timestamped<S: AsRef<str>>(&self, tracks: &[S]) -> Result<PathBuf> {
        let name = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.write_to(tracks, &name, None, Placement::DefaultDir)
    }

    /// Write into the default directory; the format follows the name's extension.
    pub fn write<S: AsRef<str>>(&self, tracks: &[S], name: &str) -> Result<PathBuf> {
        self.write_to(tracks, name, None, Placement::DefaultDir)
    }

    /// Write into the default directory in an explicit format.
    pub fn write_as<S: AsRef<str>>(
        &self,
        tracks: &[S],
        name: &str,
        format: PlaylistFormat,
    ) -> Result<PathBuf> {
        self.write_to(tracks, name, Some(format), Placement::DefaultDir)
    }

    /// Validate the target, render `tracks` and write them out.
    ///
    /// Returns the path that was written.
    pub fn write_to<S: AsRef<str>>(
        &self,
        tracks: &[S],
        name: &str,
        format: Option<PlaylistFormat>,
        placement: Placement,
    ) -> Result<PathBuf> {
        let (file_name, format) = self.check_target(name, format)?;

        let target = match placement {
            Placement::DefaultDir => {
                fs::create_dir_all(&self.default_dir)?;
                self.default_dir.join(&file_name)
            }
            Placement::AsGiven => {
                let given = Path::new(name);
                match given.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent.join(&file_name),
                    _ => PathBuf::from(&file_name),
                }
            }
        };

        if target.exists() {
            tracing::warn!(path = %target.display(), "overwriting existing playlist");
        }

        let contents = match format {
            PlaylistFormat::M3u => render_m3u(tracks, self.extended_m3u),
            PlaylistFormat::Pls => pls::render(tracks),
        };
        fs::write(&target, contents)?;

        tracing::info!(path = %target.display(), %format, tracks = tracks.len(), "playlist written");
        Ok(target)
    }

    /// Resolve the final file name and format for `name`.
    fn check_target(
        &self,
        name: &str,
        requested: Option<PlaylistFormat>,
    ) -> Result<(String, PlaylistFormat)> {
        let file_name = name
            .rsplit(['/', MAIN_SEPARATOR])
            .next()
            .unwrap_or_default()
            .trim();
        if file_name.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "playlist name {name:?} is empty"
            )));
        }

        match PlaylistFormat::split_extension(file_name) {
            Some(("", _)) => Err(Error::InvalidArgument(format!(
                "playlist name {file_name:?} has no stem"
            ))),
            Some((_, implied)) => match requested {
                Some(requested) if requested != implied => Err(Error::InvalidArgument(format!(
                    "{file_name:?} is a {implied} name but {requested} was requested"
                ))),
                _ => Ok((file_name.to_string(), implied)),
            },
            None => {
                let format = requested.unwrap_or(self.default_format);
                let with_ext = format!("{file_name}{}", format.extension());
                tracing::warn!(name = file_name, file = with_ext, "no playlist extension, appending one");
                Ok((with_ext, format))
            }
        }
    }
}

impl Default for PlaylistWriter {
    fn default() -> Self {
        Self::new(&PlaylistSettings::default())
    }
}

/// Render `tracks` as M3U, one path per line.
pub fn render_m3u<S: AsRef<str>>(tracks: &[S], extended: bool) -> String {
    let mut out = String::new();
    if extended {
        out.push_str(EXTM3U_HEADER);
        out.push('\n');
    }
    for track in tracks {
        out.push_str(track.as_ref());
        out.push('\n');
    }
    out
}
