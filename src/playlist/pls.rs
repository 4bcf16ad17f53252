//! PLS structure checks and entry extraction.
//!
//! A PLS file is accepted only when its lines follow
//! `[playlist]`, then `FileN=` entries numbered from 1 (each optionally
//! followed by `TitleN=` and/or `LengthN=`), then `NumberOfEntries=N` and
//! `Version=2`. Blank lines are allowed anywhere after the header.

pub const HEADER: &str = "[playlist]";

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Expect {
    NeedFile,
    AfterFile,
    AfterTitle,
    FooterNum,
    Done,
}

/// Whether `contents` is a structurally valid PLS playlist.
pub fn is_valid(contents: &str) -> bool {
    let mut lines = contents.lines().map(str::trim);
    if lines.next() != Some(HEADER) {
        return false;
    }

    let mut files = 0usize;
    let mut state = Expect::NeedFile;

    for line in lines {
        if state < Expect::FooterNum && line.starts_with(&format!("File{}=", files + 1)) {
            files += 1;
            state = Expect::AfterFile;
        } else if state == Expect::AfterFile && line.starts_with(&format!("Title{files}=")) {
            state = Expect::AfterTitle;
        } else if matches!(state, Expect::AfterFile | Expect::AfterTitle)
            && line.starts_with(&format!("Length{files}="))
        {
            state = Expect::NeedFile;
        } else if state < Expect::FooterNum && line == format!("NumberOfEntries={files}") {
            state = Expect::FooterNum;
        } else if state == Expect::FooterNum && line.starts_with("Version=2") {
            state = Expect::Done;
        } else if !line.is_empty() {
            return false;
        }
    }

    state == Expect::Done
}

/// The `FileN=` values in numbering order.
///
/// Lines that do not continue the `File1=`, `File2=`, ... sequence are ignored.
pub fn file_entries(contents: &str) -> Vec<String> {
    let mut entries = Vec::new();
    for line in contents.lines().map(str::trim) {
        let prefix = format!("File{}=", entries.len() + 1);
        if let Some(value) = line.strip_prefix(prefix.as_str()) {
            entries.push(value.to_string());
        }
    }
    entries
}

/// Render `tracks` as a PLS document.
pub fn render<S: AsRef<str>>(tracks: &[S]) -> String {
    let mut out = String::from(HEADER);
    out.push_str("\n\n");
    for (i, track) in tracks.iter().enumerate() {
        out.push_str(&format!("File{}={}\n", i + 1, track.as_ref()));
    }
    out.push_str(&format!("NumberOfEntries={}\n", tracks.len()));
    out.push_str("Version=2\n");
    out
}
