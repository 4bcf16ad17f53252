use std::fmt;
use std::path::Path;

use crate::config::FormatSetting;

/// On-disk playlist formats.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaylistFormat {
    /// Extended M3U (`.m3u` / `.m3u8`).
    M3u,
    /// `[playlist]` INI-style PLS, version 2.
    Pls,
}

const M3U_EXTENSIONS: [&str; 2] = [".m3u8", ".m3u"];
const PLS_EXTENSIONS: [&str; 1] = [".pls"];

impl PlaylistFormat {
    /// Format implied by a file name's extension (case-insensitive).
    ///
    /// Works on the raw name rather than `Path::extension` so that a bare
    /// `.m3u` is still recognized.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::split_extension(name).map(|(_, format)| format)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_name(&path.to_string_lossy())
    }

    /// The extension appended when a name carries none.
    pub fn extension(self) -> &'static str {
        match self {
            Self::M3u => ".m3u",
            Self::Pls => ".pls",
        }
    }

    /// Split `name` into its stem and recognized format.
    pub(crate) fn split_extension(name: &str) -> Option<(&str, Self)> {
        let lower = name.to_ascii_lowercase();
        let candidates = M3U_EXTENSIONS
            .iter()
            .map(|ext| (*ext, Self::M3u))
            .chain(PLS_EXTENSIONS.iter().map(|ext| (*ext, Self::Pls)));

        for (ext, format) in candidates {
            if lower.ends_with(ext) {
                return Some((&name[..name.len() - ext.len()], format));
            }
        }
        None
    }
}

impl fmt::Display for PlaylistFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::M3u => f.write_str("M3U"),
            Self::Pls => f.write_str("PLS"),
        }
    }
}

impl From<FormatSetting> for PlaylistFormat {
    fn from(setting: FormatSetting) -> Self {
        match setting {
            FormatSetting::M3u => Self::M3u,
            FormatSetting::Pls => Self::Pls,
        }
    }
}
