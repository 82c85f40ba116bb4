//! Integration tests for the azsort library
//!
//! These tests build throwaway folders with `tempfile` and drive complete
//! runs through the public API only.

use azsort::{
    Bucket, OrganizeOptions, OrganizeReport, Outcome, Placement, Reporter, SilentReporter,
    TransferError, TransferMode, bucket_for, ensure_buckets, organize, unique_name,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper function to create a test file
fn create_test_file(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Helper function to build a source folder holding `names`
fn setup_source(dir: &TempDir, names: &[&str]) -> PathBuf {
    let source = dir.path().join("incoming");
    fs::create_dir(&source).unwrap();
    for name in names {
        create_test_file(&source.join(name), name).unwrap();
    }
    source
}

#[derive(Default)]
struct CountingReporter {
    planned: usize,
    failed: usize,
    summary: Option<(usize, usize)>,
}

impl Reporter for CountingReporter {
    fn planned(&mut self, _placement: &Placement) {
        self.planned += 1;
    }

    fn failed(&mut self, _error: &TransferError) {
        self.failed += 1;
    }

    fn finished(&mut self, report: &OrganizeReport) {
        self.summary = Some((report.succeeded(), report.failed()));
    }
}

#[test]
fn test_full_move_run() {
    let dir = TempDir::new().unwrap();
    let source = setup_source(&dir, &["Apple.txt", "banana.doc", "3rd.pdf", "éclair.txt"]);
    let dest = dir.path().join("sorted");

    let options = OrganizeOptions::new(&source).destination(&dest).execute(true);
    let mut reporter = CountingReporter::default();
    let report = organize(&options, &mut reporter).unwrap();

    assert_eq!(fs::read_to_string(dest.join("A").join("Apple.txt")).unwrap(), "Apple.txt");
    assert!(dest.join("B").join("banana.doc").is_file());
    assert!(dest.join("#").join("3rd.pdf").is_file());
    assert!(dest.join("E").join("éclair.txt").is_file());
    assert_eq!(fs::read_dir(&source).unwrap().count(), 0);

    assert_eq!(reporter.planned, 4);
    assert_eq!(reporter.failed, 0);
    assert_eq!(reporter.summary, Some((4, 0)));
    assert!(report.placements.iter().all(|p| p.outcome == Outcome::Moved));
}

#[test]
fn test_preview_then_execute_agree() {
    let dir = TempDir::new().unwrap();
    let source = setup_source(&dir, &["notes.md", "Zebra.png", "_hidden"]);
    let dest = dir.path().join("sorted");

    let preview = organize(
        &OrganizeOptions::new(&source).destination(&dest),
        &mut SilentReporter,
    )
    .unwrap();
    let planned: Vec<PathBuf> = preview.placements.iter().map(|p| p.destination.clone()).collect();

    assert!(preview.placements.iter().all(|p| p.outcome == Outcome::Planned));
    assert!(planned.iter().all(|p| !p.exists()));

    let executed = organize(
        &OrganizeOptions::new(&source)
            .destination(&dest)
            .mode(TransferMode::Copy)
            .execute(true),
        &mut SilentReporter,
    )
    .unwrap();
    let done: Vec<PathBuf> = executed.placements.iter().map(|p| p.destination.clone()).collect();

    assert_eq!(planned, done);
    assert!(done.iter().all(|p| p.is_file()));
    assert!(dest.join("#").join("_hidden").is_file());
}

#[test]
fn test_repeated_copy_numbers_every_run() {
    let dir = TempDir::new().unwrap();
    let source = setup_source(&dir, &["report.txt"]);
    let dest = dir.path().join("sorted");
    let options = OrganizeOptions::new(&source)
        .destination(&dest)
        .mode(TransferMode::Copy)
        .execute(true);

    for _ in 0..3 {
        organize(&options, &mut SilentReporter).unwrap();
    }

    let bucket = dest.join("R");
    assert!(bucket.join("report.txt").is_file());
    assert!(bucket.join("report (1).txt").is_file());
    assert!(bucket.join("report (2).txt").is_file());
    assert_eq!(fs::read_dir(&bucket).unwrap().count(), 3);
}

#[test]
fn test_ensure_buckets_leaves_contents_alone() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("tree");
    ensure_buckets(&root).unwrap();
    create_test_file(&root.join("Q").join("keep.txt"), "kept").unwrap();

    ensure_buckets(&root).unwrap();

    assert_eq!(fs::read_to_string(root.join("Q").join("keep.txt")).unwrap(), "kept");
    let mut names: Vec<String> = fs::read_dir(&root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    let mut expected: Vec<String> = Bucket::all().map(|b| b.to_string()).collect();
    expected.sort();
    assert_eq!(names, expected);
}

#[test]
fn test_unique_name_against_real_bucket() {
    let dir = TempDir::new().unwrap();
    let candidate = dir.path().join("photo.jpg");
    assert_eq!(unique_name(&candidate), candidate);

    create_test_file(&candidate, "x").unwrap();
    assert_eq!(unique_name(&candidate), dir.path().join("photo (1).jpg"));
}

#[test]
fn test_bucket_for_public_api() {
    assert_eq!(bucket_for("apple").as_char(), 'A');
    assert_eq!(bucket_for("Ünicode").as_char(), 'U');
    assert!(bucket_for("").is_catch_all());
    assert!(bucket_for("日本").is_catch_all());
}
