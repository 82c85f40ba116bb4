//! azsort CLI application entry point
//!
//! Sorts the files directly under a folder into 27 buckets (`A`-`Z` and `#`)
//! named after the first letter of each file.
//!
//! # Usage
//!
//! ```bash
//! # Preview, buckets are created inside the source folder
//! azsort ~/Downloads
//!
//! # Move into a separate tree
//! azsort ~/Downloads ~/Sorted --go
//!
//! # Copy instead of move, print the report as JSON
//! azsort ~/Downloads --dest ~/Sorted --copy --go --json
//!
//! # Ask for the folders interactively
//! azsort
//! ```
//!
//! # Configuration
//!
//! Defaults can be changed with `--config FILE` (TOML) or `AZSORT_*`
//! environment variables; see [`azsort::config`].

use azsort::{
    AzError, OrganizeOptions, SilentReporter,
    cli::Cli,
    config::{self, ReportFormat, Settings},
    organize,
    output::{self, ConsoleReporter},
};
use colored::Colorize;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, AzError>;

/// Send `tracing` output to stderr; `RUST_LOG` wins over `-v`
fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Source from the argument or, when allowed, the prompt
///
/// # Errors
///
/// Returns `AzError::InvalidInput` if no source was given and prompting is
/// not possible, or `AzError::InvalidSource` if it is not a directory.
fn resolve_source(arg: Option<PathBuf>, interactive: bool) -> Result<PathBuf> {
    let raw = match arg {
        Some(path) => path,
        None if interactive => config::prompt_source()?,
        None => {
            return Err(AzError::InvalidInput(
                "No source folder given (pass SOURCE or run from a terminal)".into(),
            ));
        }
    };

    let source = std::path::absolute(&raw)?;
    if !source.is_dir() {
        return Err(AzError::InvalidSource { path: raw });
    }
    Ok(source)
}

/// Destination from the argument, the prompt, or the source itself
///
/// # Errors
///
/// Returns `AzError::InvalidInput` if the prompt cannot read input.
fn resolve_destination(arg: Option<PathBuf>, source: &Path, interactive: bool) -> Result<PathBuf> {
    let destination = match arg {
        Some(path) => path,
        None if interactive => config::prompt_destination(source)?,
        None => source.to_path_buf(),
    };
    Ok(std::path::absolute(destination)?)
}

/// Run the organizer for the parsed command line
///
/// # Errors
///
/// Returns `AzError` for every fatal condition: bad settings, missing or
/// invalid source, nested roots and bucket-creation failures.
fn run(cli: &Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        Cli::print_completions(shell, &mut io::stdout());
        return Ok(());
    }

    let mut settings = Settings::load(cli.config.as_deref())?;
    cli.apply_to(&mut settings);
    tracing::debug!(?settings, "settings loaded");

    let interactive = settings.prompt && io::stdin().is_terminal();
    let source = resolve_source(cli.source.clone(), interactive)?;
    let destination = resolve_destination(cli.destination_arg(), &source, interactive)?;

    let options = OrganizeOptions::new(source)
        .destination(destination)
        .mode(settings.mode)
        .execute(cli.go);

    match settings.output {
        ReportFormat::Text => {
            let mut reporter = ConsoleReporter::new(settings.path_format, settings.quiet);
            organize(&options, &mut reporter)?;
        }
        ReportFormat::Json => {
            let report = organize(&options, &mut SilentReporter)?;
            println!("{}", output::render_json(&report)?);
        }
    }

    Ok(())
}

/// Main entry point for the azsort CLI
///
/// Per-file failures are shown in the run output and do not change the exit
/// status; fatal errors print `Error: <message>` and exit with status 1.
fn main() {
    let cli = Cli::parse_args();
    init_logging(cli.log_filter());

    if let Err(e) = run(&cli) {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}
