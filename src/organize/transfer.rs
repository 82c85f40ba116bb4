//! Move and copy primitives
//!
//! Moves are a plain rename when source and destination share a
//! filesystem. A rename across filesystems falls back to copy, verify,
//! then delete the original. Copies carry permissions (via `fs::copy`) and
//! access/modification times.

use serde::{Deserialize, Serialize};
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How files reach their bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    /// Rename into the bucket, removing the file from the source folder
    #[default]
    Move,
    /// Copy into the bucket with attributes, leaving the source untouched
    Copy,
}

impl TransferMode {
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Copy => "copy",
        }
    }

    /// Heading shown while a run is executing
    #[must_use]
    pub const fn progressive(self) -> &'static str {
        match self {
            Self::Move => "MOVING…",
            Self::Copy => "COPYING…",
        }
    }

    /// Transfer `from` to `to` according to this mode
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] describing which step failed.
    pub fn apply(self, from: &Path, to: &Path) -> Result<(), TransferError> {
        match self {
            Self::Move => move_file(from, to),
            Self::Copy => copy_with_attributes(from, to).map(|_| ()),
        }
    }
}

/// A failure affecting one source entry; never fatal to the run
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Cannot read an entry of {}: {source}", dir.display())]
    ReadEntry {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot inspect {}: {source}", path.display())]
    Inspect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "Incomplete copy of {} to {}: expected {expected} bytes, found {actual}",
        from.display(),
        to.display()
    )]
    Incomplete {
        from: PathBuf,
        to: PathBuf,
        expected: u64,
        actual: u64,
    },
    #[error("Copied {} but could not remove the original: {source}", path.display())]
    RemoveOriginal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TransferError {
    /// The source-side path this failure concerns
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::ReadEntry { dir, .. } => dir,
            Self::Inspect { path, .. } | Self::RemoveOriginal { path, .. } => path,
            Self::Move { from, .. } | Self::Copy { from, .. } | Self::Incomplete { from, .. } => {
                from
            }
        }
    }
}

/// Move a file, falling back to a verified copy across filesystems
///
/// # Errors
///
/// Returns a [`TransferError`] if the rename fails for any reason other than
/// crossing filesystems, or if any step of the fallback fails. The original
/// is only deleted after the copy has been verified.
pub fn move_file(from: &Path, to: &Path) -> Result<(), TransferError> {
    match fs::rename(from, to) {
        Ok(()) => {
            tracing::info!(src = %from.display(), dest = %to.display(), "renamed file");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            tracing::warn!(
                src = %from.display(),
                dest = %to.display(),
                "rename crosses filesystems, falling back to copy and remove"
            );
            copy_then_remove(from, to)
        }
        Err(source) => Err(TransferError::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        }),
    }
}

/// Copy `from` to `to` with permissions and timestamps
///
/// Timestamps are best effort: a filesystem that cannot store them only
/// produces a warning. Returns the number of bytes copied.
///
/// # Errors
///
/// Returns [`TransferError::Copy`] if the content could not be copied. A
/// destination created by the failed copy is removed again.
pub fn copy_with_attributes(from: &Path, to: &Path) -> Result<u64, TransferError> {
    let existed = to.symlink_metadata().is_ok();
    let bytes = fs::copy(from, to).map_err(|source| {
        if !existed {
            discard_partial(to);
        }
        TransferError::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        }
    })?;

    if let Err(e) = copy_timestamps(from, to) {
        tracing::warn!(dest = %to.display(), error = %e, "could not preserve timestamps");
    }

    tracing::info!(src = %from.display(), dest = %to.display(), bytes, "copied file");
    Ok(bytes)
}

pub(crate) fn copy_then_remove(from: &Path, to: &Path) -> Result<(), TransferError> {
    let copied = copy_with_attributes(from, to)?;
    verify_copy(from, to, copied)?;

    fs::remove_file(from).map_err(|source| TransferError::RemoveOriginal {
        path: from.to_path_buf(),
        source,
    })
}

/// The copy is complete when the destination holds as many bytes as the
/// source. A partial destination is removed so the original stays the only
/// copy.
fn verify_copy(from: &Path, to: &Path, copied: u64) -> Result<(), TransferError> {
    let expected = fs::metadata(from).map_or(copied, |m| m.len());
    let actual = fs::metadata(to).map_or(0, |m| m.len());

    if expected == actual && copied == expected {
        return Ok(());
    }

    discard_partial(to);
    Err(TransferError::Incomplete {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        expected,
        actual,
    })
}

/// Remove a half-written destination; returns whether nothing is left there
fn discard_partial(to: &Path) -> bool {
    match fs::remove_file(to) {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => {
            tracing::warn!(dest = %to.display(), error = %e, "could not remove partial copy");
            false
        }
    }
}

fn copy_timestamps(from: &Path, to: &Path) -> io::Result<()> {
    let meta = fs::metadata(from)?;
    let mut times = FileTimes::new().set_modified(meta.modified()?);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    open_for_times(to)?.set_times(times)
}

#[cfg(windows)]
fn open_for_times(path: &Path) -> io::Result<File> {
    use std::os::windows::fs::OpenOptionsExt;
    // FILE_WRITE_ATTRIBUTES
    fs::OpenOptions::new().access_mode(0x0100).open(path)
}

#[cfg(not(windows))]
fn open_for_times(path: &Path) -> io::Result<File> {
    File::open(path)
}
