//! Bucket set, bucket selection and bucket pre-creation
//!
//! A bucket is one of 27 fixed subdirectories of a destination root:
//! `A` through `Z` plus the catch-all `#`. Bucket names are restricted to
//! ASCII so the tree is portable to filesystems that mangle non-ASCII
//! directory names.

use serde::{Serialize, Serializer};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::{AzError, Result};

/// Number of buckets under every organized root
pub const BUCKET_COUNT: usize = 27;

/// One of the 27 bucket identifiers
///
/// The field is private: a `Bucket` is always an uppercase ASCII letter or
/// the catch-all `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bucket(char);

impl Bucket {
    /// Catch-all bucket for names that do not start with a Latin letter
    pub const CATCH_ALL: Self = Self('#');

    /// Bucket for an uppercase ASCII letter, `None` for anything else
    #[must_use]
    pub const fn letter(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() {
            Some(Self(c))
        } else {
            None
        }
    }

    /// Bucket whose folder is called `name`, `None` for any other name
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some('#'), None) => Some(Self::CATCH_ALL),
            (Some(c), None) => Self::letter(c),
            _ => None,
        }
    }

    /// All 27 buckets, `A` through `Z` followed by `#`
    pub fn all() -> impl Iterator<Item = Self> {
        ('A'..='Z').map(Self).chain(std::iter::once(Self::CATCH_ALL))
    }

    /// The single character naming this bucket
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }

    #[must_use]
    pub const fn is_catch_all(self) -> bool {
        self.0 == Self::CATCH_ALL.0
    }

    /// Path of this bucket's directory under `root`
    #[must_use]
    pub fn dir_in(self, root: &Path) -> PathBuf {
        let mut buf = [0u8; 4];
        root.join(&*self.0.encode_utf8(&mut buf))
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Bucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Select the bucket for a file name
///
/// Looks only at the first character: it is canonically decomposed (NFD),
/// reduced to its base character and uppercased. If that yields exactly one
/// of `A`-`Z`, that letter is the bucket; everything else (digits, symbols,
/// other scripts, emoji, empty names) goes to `#`.
///
/// # Examples
/// ```
/// use azsort::{Bucket, bucket_for};
///
/// assert_eq!(bucket_for("éclair.txt"), Bucket::letter('E').unwrap());
/// assert_eq!(bucket_for("7file.txt"), Bucket::CATCH_ALL);
/// ```
#[must_use]
pub fn bucket_for(name: &str) -> Bucket {
    name.chars()
        .next()
        .and_then(base_char)
        .and_then(|c| {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => Bucket::letter(u),
                _ => None,
            }
        })
        .unwrap_or(Bucket::CATCH_ALL)
}

/// First code point of the canonical decomposition, unless it is a bare
/// combining mark
fn base_char(c: char) -> Option<char> {
    std::iter::once(c)
        .nfd()
        .next()
        .filter(|base| !is_combining_mark(*base))
}

/// Ensure `root` and all 27 buckets directly under it exist
///
/// Existing buckets are left alone together with whatever they contain, so
/// calling this any number of times is safe. Only directories are created.
///
/// # Errors
///
/// Returns [`AzError::BucketCreation`] if `root` cannot be created, is not a
/// directory, or a bucket path is occupied by something other than a
/// directory.
pub fn ensure_buckets(root: &Path) -> Result<()> {
    fs::create_dir_all(root).map_err(|source| AzError::BucketCreation {
        path: root.to_path_buf(),
        source,
    })?;

    for bucket in Bucket::all() {
        let dir = bucket.dir_in(root);
        ensure_dir(&dir).map_err(|source| AzError::BucketCreation { path: dir, source })?;
    }

    tracing::info!(root = %root.display(), "A-Z folders ensured");
    Ok(())
}

fn ensure_dir(dir: &Path) -> io::Result<()> {
    match fs::create_dir(dir) {
        Ok(()) => {
            tracing::debug!(dir = %dir.display(), "created bucket");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(e),
    }
}
