//! Collision-free destination names

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Return `candidate` if nothing exists there, otherwise the first free
/// `stem (n)ext` sibling with `n` counting up from 1
///
/// Must be called right before the file is placed: earlier files of the same
/// run may have just taken a name. Dangling symlinks count as taken.
///
/// # Examples
/// ```no_run
/// use azsort::unique_name;
/// use std::path::Path;
///
/// // with A/report.txt already present
/// let path = unique_name(Path::new("A/report.txt"));
/// assert_eq!(path, Path::new("A/report (1).txt"));
/// ```
#[must_use]
pub fn unique_name(candidate: &Path) -> PathBuf {
    if !is_taken(candidate) {
        return candidate.to_path_buf();
    }

    let parent = candidate.parent().unwrap_or_else(|| Path::new(""));
    let stem = candidate.file_stem().unwrap_or_default();
    let extension = candidate.extension();

    let mut counter: u64 = 1;
    loop {
        let next = parent.join(numbered(stem, counter, extension));
        if !is_taken(&next) {
            return next;
        }
        counter += 1;
    }
}

fn is_taken(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

fn numbered(stem: &OsStr, counter: u64, extension: Option<&OsStr>) -> OsString {
    let mut name = stem.to_os_string();
    name.push(format!(" ({counter})"));
    if let Some(ext) = extension {
        name.push(".");
        name.push(ext);
    }
    name
}
