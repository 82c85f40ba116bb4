//! Output formatting for CLI display
//!
//! This module renders a run for the console: path display, the colored
//! `ConsoleReporter` and the JSON report.

use colored::Colorize;
use std::path::Path;

use crate::config::PathFormat;
use crate::organize::{OrganizeOptions, OrganizeReport, Placement, Reporter, TransferError};
use crate::{AzError, Result};

const RULE_WIDTH: usize = 60;

/// Format a path according to the display mode
///
/// Relative paths are taken against `root`; anything outside it falls back
/// to the full path.
#[must_use]
pub fn format_path(path: &Path, format: PathFormat, root: &Path) -> String {
    match format {
        PathFormat::Absolute => path.display().to_string(),
        PathFormat::Relative => path
            .strip_prefix(root)
            .map_or_else(|_| path.display().to_string(), |rel| rel.display().to_string()),
    }
}

/// One mapping line: `name  →  destination`, prefixed in preview mode
#[must_use]
pub fn placement_line(placement: &Placement, format: PathFormat, root: &Path, preview: bool) -> String {
    let prefix = if preview { "[preview] " } else { "" };
    format!(
        "{prefix}{}  →  {}",
        placement.name(),
        format_path(&placement.destination, format, root)
    )
}

/// Render the whole report as pretty JSON
///
/// # Errors
///
/// Returns [`AzError::InvalidInput`] if a path cannot be represented as
/// UTF-8 JSON.
pub fn render_json(report: &OrganizeReport) -> Result<String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| AzError::InvalidInput(format!("Cannot render report as JSON: {e}")))
}

/// Reporter writing colored progress to stdout and failures to stderr
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    path_format: PathFormat,
    quiet: bool,
    preview: bool,
    root: std::path::PathBuf,
}

impl ConsoleReporter {
    #[must_use]
    pub fn new(path_format: PathFormat, quiet: bool) -> Self {
        Self {
            path_format,
            quiet,
            preview: true,
            root: std::path::PathBuf::new(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn started(&mut self, options: &OrganizeOptions) {
        self.preview = !options.execute;
        self.root.clone_from(&options.destination);

        if self.quiet {
            return;
        }
        println!(
            "{} A-Z folders ensured in {}",
            "✔".green(),
            options.destination.display()
        );
        let heading = if self.preview {
            "DRY RUN – nothing moved yet".yellow().bold()
        } else {
            options.mode.progressive().bold()
        };
        println!("\n{heading}");
        println!("Source : {}", options.source.display());
        println!("A-Z at : {}", options.destination.display());
        println!("{}", "-".repeat(RULE_WIDTH));
    }

    fn planned(&mut self, placement: &Placement) {
        let line = placement_line(placement, self.path_format, &self.root, self.preview);
        if self.quiet {
            println!("{line}");
        } else if self.preview {
            println!("{}", line.cyan());
        } else {
            println!("{line}");
        }
    }

    fn skipped(&mut self, path: &Path) {
        if !self.quiet {
            println!("{} {}", "⊘ Skipped:".dimmed(), path.display());
        }
    }

    fn failed(&mut self, error: &TransferError) {
        eprintln!("{} {}", "✗".red(), error);
    }

    fn finished(&mut self, report: &OrganizeReport) {
        if self.quiet {
            return;
        }
        println!("{}", "-".repeat(RULE_WIDTH));
        print_summary(report);
    }
}

/// Print the summary block of a finished run
pub fn print_summary(report: &OrganizeReport) {
    let title = if report.executed {
        format!("=== {} Summary ===", capitalize(report.mode.verb()))
    } else {
        "=== Dry Run Summary ===".to_string()
    };
    println!("{}", title.bold());

    if report.executed {
        println!("  {} {}", "✓ Done:".green(), report.succeeded());
    } else {
        println!("  {} {}", "→ Planned:".cyan(), report.planned());
    }
    if !report.skipped.is_empty() {
        println!("  {} {}", "⊘ Skipped:".yellow(), report.skipped.len());
    }
    if report.has_failures() {
        println!("  {} {}", "✗ Errors:".red(), report.failed());
        println!("\n{}", "Error details:".red().bold());
        for msg in &report.errors {
            println!("  - {msg}");
        }
    }

    if report.executed {
        println!("\nDone – A-Z tree ready.");
    } else {
        println!("\n{}", "Run again with --go to apply changes.".yellow());
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
