//! azsort - sort the files of a folder into an A-Z bucket tree
//!
//! This library holds the rules the `azsort` binary is built on:
//! - [`bucket`]: the 27 fixed buckets (`A`-`Z` plus `#`), bucket selection
//!   and idempotent bucket pre-creation
//! - [`organize`]: the per-file plan/transfer loop, name disambiguation and
//!   the move/copy primitives
//!
//! The CLI glue (argument parsing, prompts, console output) lives in
//! [`cli`], [`config`] and [`output`] and is never required by the core.

use std::path::PathBuf;
use thiserror::Error;

pub mod bucket;
pub mod cli;
pub mod config;
pub mod organize;
pub mod output;

#[cfg(test)]
pub mod testing;

pub use bucket::{Bucket, bucket_for, ensure_buckets};
pub use organize::{
    OrganizeOptions, OrganizeReport, Outcome, Placement, Reporter, SilentReporter,
    TransferError, TransferMode, organize, unique_name,
};

/// Error enum, contains all fatal failure states of a run
///
/// Per-file failures are not fatal and never surface here; they are
/// reported as [`TransferError`]s and recorded in the [`OrganizeReport`].
#[derive(Debug, Error)]
pub enum AzError {
    /// The source path does not exist or is not a directory
    #[error("Not a valid folder: {}", path.display())]
    InvalidSource { path: PathBuf },
    /// One root lies strictly inside the other
    #[error(
        "Destination {} and source {} are nested inside one another",
        destination.display(),
        source_dir.display()
    )]
    NestedRoots {
        source_dir: PathBuf,
        destination: PathBuf,
    },
    /// The destination root or one of its buckets could not be created
    #[error("Cannot create bucket folder {}: {source}", path.display())]
    BucketCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, AzError>;
