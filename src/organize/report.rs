use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{OrganizeOptions, TransferError, TransferMode};
use crate::bucket::Bucket;

/// What happened to one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// Dry run: the mapping was computed but nothing was touched
    Planned,
    Moved,
    Copied,
    Failed { reason: String },
}

/// Planned or executed mapping of one source file into its bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub bucket: Bucket,
    pub outcome: Outcome,
}

impl Placement {
    /// File name as it appeared in the source folder
    #[must_use]
    pub fn name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Result of one organizer run
#[derive(Debug, Clone, Serialize)]
pub struct OrganizeReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub mode: TransferMode,
    pub executed: bool,
    pub placements: Vec<Placement>,
    /// Entries left alone because they are not regular files
    pub skipped: Vec<PathBuf>,
    /// One message per per-file failure, in the order they happened
    pub errors: Vec<String>,
}

impl OrganizeReport {
    pub(crate) fn new(options: &OrganizeOptions) -> Self {
        Self {
            source: options.source.clone(),
            destination: options.destination.clone(),
            mode: options.mode,
            executed: options.execute,
            placements: Vec::new(),
            skipped: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Number of files actually moved or copied
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.placements
            .iter()
            .filter(|p| matches!(p.outcome, Outcome::Moved | Outcome::Copied))
            .count()
    }

    /// Number of dry-run mappings
    #[must_use]
    pub fn planned(&self) -> usize {
        self.placements
            .iter()
            .filter(|p| p.outcome == Outcome::Planned)
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.errors.is_empty()
    }

    pub(crate) fn record_failure(&mut self, error: &TransferError) {
        self.errors.push(error.to_string());
    }
}

/// Observer notified while the organizer runs
///
/// Every method has an empty default so implementors pick what they need.
/// The CLI renders to the console; tests record.
pub trait Reporter {
    /// Called once, after buckets exist and before the first file
    fn started(&mut self, _options: &OrganizeOptions) {}

    /// Called for every file before it is moved or copied
    fn planned(&mut self, _placement: &Placement) {}

    /// Called for entries that are not regular files
    fn skipped(&mut self, _path: &Path) {}

    /// Called for every per-file failure
    fn failed(&mut self, _error: &TransferError) {}

    /// Called once with the complete report
    fn finished(&mut self, _report: &OrganizeReport) {}
}

/// Reporter that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(outcome: Outcome) -> Placement {
        Placement {
            source: PathBuf::from("/in/apple.txt"),
            destination: PathBuf::from("/out/A/apple.txt"),
            bucket: Bucket::letter('A').unwrap(),
            outcome,
        }
    }

    #[test]
    fn test_report_counters() {
        let options = OrganizeOptions::new("/in").destination("/out").execute(true);
        let mut report = OrganizeReport::new(&options);
        report.placements.push(placement(Outcome::Moved));
        report.placements.push(placement(Outcome::Copied));
        report.placements.push(placement(Outcome::Failed {
            reason: "denied".into(),
        }));
        report.errors.push("denied".into());

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.planned(), 0);
        assert_eq!(report.failed(), 1);
        assert!(report.has_failures());
    }

    #[test]
    fn test_placement_name() {
        assert_eq!(placement(Outcome::Planned).name(), "apple.txt");
    }

    #[test]
    fn test_placement_serializes_status_and_bucket() {
        let json = serde_json::to_value(placement(Outcome::Failed {
            reason: "disk full".into(),
        }))
        .unwrap();

        assert_eq!(json["bucket"], "A");
        assert_eq!(json["outcome"]["status"], "failed");
        assert_eq!(json["outcome"]["reason"], "disk full");
    }
}
