//! File organizer
//!
//! Places every regular file directly under a source folder into its
//! bucket under a destination root:
//! - `names`: collision-free destination names
//! - `transfer`: move and copy primitives
//! - `report`: placements, the run report and the `Reporter` observer
//!
//! A run is strictly linear: validate, create buckets, then for each file
//! classify, disambiguate, report and (when executing) transfer. Per-file
//! failures are reported and the run carries on.

mod names;
mod report;
mod transfer;

pub use names::unique_name;
pub use report::{OrganizeReport, Outcome, Placement, Reporter, SilentReporter};
pub use transfer::{TransferError, TransferMode, copy_with_attributes, move_file};

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use crate::bucket::{Bucket, bucket_for, ensure_buckets};
use crate::{AzError, Result};

/// Everything a run needs, supplied by the caller
///
/// The organizer never prompts; the CLI resolves paths before building this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizeOptions {
    /// Folder whose top-level files are organized
    pub source: PathBuf,
    /// Root under which the 27 buckets live
    pub destination: PathBuf,
    pub mode: TransferMode,
    /// `false` previews the run; only the buckets get created
    pub execute: bool,
}

impl OrganizeOptions {
    /// Preview a move of `source` into buckets inside `source` itself
    #[must_use]
    pub fn new(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        Self {
            destination: source.clone(),
            source,
            mode: TransferMode::default(),
            execute: false,
        }
    }

    #[must_use]
    pub fn destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = destination.into();
        self
    }

    #[must_use]
    pub const fn mode(mut self, mode: TransferMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn execute(mut self, execute: bool) -> Self {
        self.execute = execute;
        self
    }
}

/// Organize the top-level files of `options.source` into A-Z buckets
///
/// Buckets are created under `options.destination` before anything else,
/// in preview mode too. Files are visited in file-name order. A symlink to
/// a regular file counts as a file and the link itself is moved; directories,
/// dangling links and other entries are skipped untouched. When organizing
/// in place, the bucket folders themselves are not reported as skipped.
///
/// # Errors
///
/// Fatal errors only:
/// - [`AzError::InvalidSource`] if the source is missing or not a directory
/// - [`AzError::NestedRoots`] if one root lies strictly inside the other
/// - [`AzError::BucketCreation`] if the buckets cannot be created
/// - [`AzError::IoError`] if the source listing cannot be opened
///
/// Per-file failures are passed to `reporter` and collected in the report.
pub fn organize(options: &OrganizeOptions, reporter: &mut dyn Reporter) -> Result<OrganizeReport> {
    validate_source(&options.source)?;
    reject_nested_roots(&options.source, &options.destination)?;
    ensure_buckets(&options.destination)?;

    let mut report = OrganizeReport::new(options);
    reporter.started(options);
    let entries = list_entries(&options.source, reporter, &mut report)?;

    tracing::info!(
        src = %options.source.display(),
        dest = %options.destination.display(),
        mode = options.mode.verb(),
        execute = options.execute,
        files = entries.len(),
        "organizing"
    );

    let in_place = resolve(&options.source) == resolve(&options.destination);

    for (path, name) in entries {
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {
                place(options, path, &name, reporter, &mut report);
            }
            Ok(meta) if meta.is_dir() && in_place && is_bucket_name(&name) => {
                tracing::debug!(path = %path.display(), "ignoring bucket folder");
            }
            Ok(_) => skip(path, reporter, &mut report),
            Err(_) if path.symlink_metadata().is_ok() => {
                tracing::debug!(path = %path.display(), "dangling symlink");
                skip(path, reporter, &mut report);
            }
            Err(source) => {
                let error = TransferError::Inspect { path, source };
                fail(&error, reporter, &mut report);
            }
        }
    }

    reporter.finished(&report);
    Ok(report)
}

fn place(
    options: &OrganizeOptions,
    source: PathBuf,
    name: &OsStr,
    reporter: &mut dyn Reporter,
    report: &mut OrganizeReport,
) {
    let bucket = bucket_for(&name.to_string_lossy());
    let destination = unique_name(&bucket.dir_in(&options.destination).join(name));

    let mut placement = Placement {
        source,
        destination,
        bucket,
        outcome: Outcome::Planned,
    };
    tracing::debug!(
        src = %placement.source.display(),
        dest = %placement.destination.display(),
        %bucket,
        "planned"
    );
    reporter.planned(&placement);

    if options.execute {
        placement.outcome = match options.mode.apply(&placement.source, &placement.destination) {
            Ok(()) => {
                tracing::info!(
                    src = %placement.source.display(),
                    dest = %placement.destination.display(),
                    "{}",
                    options.mode.verb()
                );
                match options.mode {
                    TransferMode::Move => Outcome::Moved,
                    TransferMode::Copy => Outcome::Copied,
                }
            }
            Err(error) => {
                fail(&error, reporter, report);
                Outcome::Failed {
                    reason: error.to_string(),
                }
            }
        };
    }

    report.placements.push(placement);
}

fn skip(path: PathBuf, reporter: &mut dyn Reporter, report: &mut OrganizeReport) {
    tracing::debug!(path = %path.display(), "skipping non-regular entry");
    reporter.skipped(&path);
    report.skipped.push(path);
}

fn is_bucket_name(name: &OsStr) -> bool {
    name.to_str().and_then(Bucket::named).is_some()
}

fn fail(error: &TransferError, reporter: &mut dyn Reporter, report: &mut OrganizeReport) {
    tracing::warn!(path = %error.path().display(), %error, "file failed");
    reporter.failed(error);
    report.record_failure(error);
}

fn validate_source(source: &Path) -> Result<()> {
    match fs::metadata(source) {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(AzError::InvalidSource {
            path: source.to_path_buf(),
        }),
    }
}

/// Read the source listing once, sorted by file name
///
/// Entries that cannot be read are reported as failures and left out.
fn list_entries(
    source: &Path,
    reporter: &mut dyn Reporter,
    report: &mut OrganizeReport,
) -> Result<Vec<(PathBuf, OsString)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(source)? {
        match entry {
            Ok(entry) => entries.push((entry.path(), entry.file_name())),
            Err(source_err) => {
                let error = TransferError::ReadEntry {
                    dir: source.to_path_buf(),
                    source: source_err,
                };
                fail(&error, reporter, report);
            }
        }
    }
    entries.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(entries)
}

/// Destination equal to the source is the default and fine; strict nesting
/// either way is refused before anything is created
fn reject_nested_roots(source: &Path, destination: &Path) -> Result<()> {
    let source_real = resolve(source);
    let destination_real = resolve(destination);

    if source_real != destination_real
        && (destination_real.starts_with(&source_real) || source_real.starts_with(&destination_real))
    {
        return Err(AzError::NestedRoots {
            source_dir: source.to_path_buf(),
            destination: destination.to_path_buf(),
        });
    }
    Ok(())
}

/// Canonical form of a path whose tail may not exist yet
fn resolve(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut missing = Vec::new();
    let mut current = absolute.as_path();

    loop {
        if let Ok(real) = current.canonicalize() {
            return missing.iter().rev().fold(real, |acc, part| acc.join(part));
        }
        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                current = parent;
            }
            _ => return absolute,
        }
    }
}
