//! Testing utilities for azsort
//!
//! This module provides helper types and functions for writing tests,
//! including a `TestTree` wrapper holding a scratch source folder and
//! destination root, and a `RecordingReporter`.
//!
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::organize::{OrganizeOptions, OrganizeReport, Placement, Reporter, TransferError};

/// Scratch `source/` and `dest/` folders that are removed on drop
///
/// `source/` exists from the start; `dest/` does not, so tests can check
/// that the organizer creates it.
pub struct TestTree {
    _dir: TempDir,
    source: PathBuf,
    dest: PathBuf,
}

impl TestTree {
    /// Create an empty tree
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let source = dir.path().join("source");
        let dest = dir.path().join("dest");
        fs::create_dir(&source).expect("Failed to create source dir");
        Self {
            _dir: dir,
            source,
            dest,
        }
    }

    /// Create a tree whose source folder holds `names`, each with default content
    ///
    /// # Panics
    /// Panics if a file cannot be created.
    #[must_use]
    pub fn with_files(names: &[&str]) -> Self {
        let tree = Self::new();
        for name in names {
            create_test_file(tree.source.join(name)).expect("Failed to create test file");
        }
        tree
    }

    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    #[must_use]
    pub fn dest(&self) -> &Path {
        &self.dest
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a test file with default content
///
/// Creates a file at the specified path with "test content" written to it.
///
/// # Errors
/// Returns an `io::Error` if the file cannot be created or written.
pub fn create_test_file(path: impl AsRef<Path>) -> std::io::Result<()> {
    create_test_file_with_content(path, b"test content")
}

/// Create a test file with custom content
///
/// # Errors
/// Returns an `io::Error` if the file cannot be created or written.
pub fn create_test_file_with_content(path: impl AsRef<Path>, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content)?;
    Ok(())
}

/// Sorted names of the directories directly under `root`
///
/// # Panics
/// Panics if `root` cannot be read.
#[must_use]
pub fn bucket_names(root: &Path) -> Vec<String> {
    entry_names(root, |t| t.is_dir())
}

/// Sorted names of the regular files directly under `dir`, empty if `dir`
/// does not exist
#[must_use]
pub fn file_names(dir: &Path) -> Vec<String> {
    if !dir.exists() {
        return Vec::new();
    }
    entry_names(dir, |t| t.is_file())
}

fn entry_names(dir: &Path, keep: impl Fn(&fs::FileType) -> bool) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read dir")
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| keep(&t)))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Reporter that keeps everything it is told
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub started: bool,
    pub finished: bool,
    pub planned: Vec<Placement>,
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<String>,
}

impl Reporter for RecordingReporter {
    fn started(&mut self, _options: &OrganizeOptions) {
        self.started = true;
    }

    fn planned(&mut self, placement: &Placement) {
        self.planned.push(placement.clone());
    }

    fn skipped(&mut self, path: &Path) {
        self.skipped.push(path.to_path_buf());
    }

    fn failed(&mut self, error: &TransferError) {
        self.failures.push(error.to_string());
    }

    fn finished(&mut self, _report: &OrganizeReport) {
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_layout() {
        let tree = TestTree::with_files(&["one.txt", "two.txt"]);
        assert!(tree.source().is_dir());
        assert!(!tree.dest().exists());
        assert_eq!(file_names(tree.source()), vec!["one.txt", "two.txt"]);
    }

    #[test]
    fn test_tree_cleanup() {
        let source = {
            let tree = TestTree::new();
            tree.source().to_path_buf()
        };
        assert!(!source.exists());
    }

    #[test]
    fn test_create_test_file_with_custom_content() {
        let tree = TestTree::new();
        let path = tree.source().join("custom.txt");
        create_test_file_with_content(&path, b"custom test data").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"custom test data");
    }

    #[test]
    fn test_bucket_names_ignores_files() {
        let tree = TestTree::with_files(&["file.txt"]);
        fs::create_dir(tree.source().join("B")).unwrap();
        assert_eq!(bucket_names(tree.source()), vec!["B"]);
    }
}
