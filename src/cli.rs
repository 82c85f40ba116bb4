//! Command-line interface definitions and parsing
//!
//! This module defines the azsort CLI using the `clap` crate. There are no
//! subcommands: the organizer takes an optional source and destination and
//! a handful of flags.
//!
//! # Design Features
//!
//! - Destination accepted positionally (`azsort SRC DEST`) or as `--dest DEST`
//! - Preview is the default; `--go` (alias `--execute`) performs the run
//! - Flags override the layered [`Settings`]
//! - `--completions SHELL` prints a completion script and exits
//!
//! # Examples
//!
//! ```no_run
//! use azsort::cli::Cli;
//! use azsort::config::Settings;
//!
//! let cli = Cli::parse_args();
//! let mut settings = Settings::default();
//! cli.apply_to(&mut settings);
//! ```

use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::Shell;
use std::io::Write;
use std::path::PathBuf;

use crate::config::{PathFormat, ReportFormat, Settings};
use crate::organize::TransferMode;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "azsort")]
#[command(about = "Sort the files of a folder into A-Z buckets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Folder whose files are organized (prompted for when omitted)
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Root of the A-Z tree (defaults to SOURCE)
    #[arg(value_name = "DEST", conflicts_with = "dest")]
    pub destination: Option<PathBuf>,

    /// Root of the A-Z tree, flag form of DEST
    #[arg(short = 'd', long = "dest", value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Copy files instead of moving them
    #[arg(short = 'c', long = "copy")]
    pub copy: bool,

    /// Actually move or copy files (without this only a preview is shown)
    #[arg(short = 'g', long = "go", visible_alias = "execute")]
    pub go: bool,

    /// Suppress informational output (only print mappings)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Print the run report as JSON
    #[arg(long = "json")]
    pub json: bool,

    /// Display absolute paths (overrides config)
    #[arg(long = "absolute", conflicts_with = "relative")]
    pub absolute: bool,

    /// Display paths relative to the destination root (overrides config)
    #[arg(long = "relative", conflicts_with = "absolute")]
    pub relative: bool,

    /// Never prompt; missing paths become errors
    #[arg(long = "no-prompt")]
    pub no_prompt: bool,

    /// Read settings from this TOML file
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Print a shell completion script and exit
    #[arg(long = "completions", value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Destination from either the positional or the flag form
    #[must_use]
    pub fn destination_arg(&self) -> Option<PathBuf> {
        self.destination.clone().or_else(|| self.dest.clone())
    }

    /// Helper method to get the path format override from flags
    #[must_use]
    pub const fn get_path_format(&self) -> Option<PathFormat> {
        if self.absolute {
            Some(PathFormat::Absolute)
        } else if self.relative {
            Some(PathFormat::Relative)
        } else {
            None
        }
    }

    /// Layer the flags over loaded settings
    ///
    /// Only flags that were given change anything; absent flags keep what
    /// defaults, file and environment decided.
    pub fn apply_to(&self, settings: &mut Settings) {
        if self.copy {
            settings.mode = TransferMode::Copy;
        }
        if self.quiet {
            settings.quiet = true;
        }
        if self.json {
            settings.output = ReportFormat::Json;
        }
        if let Some(format) = self.get_path_format() {
            settings.path_format = format;
        }
        if self.no_prompt {
            settings.prompt = false;
        }
    }

    /// `tracing` filter directive for the requested verbosity
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "azsort=error",
            1 => "azsort=info",
            2 => "azsort=debug",
            _ => "azsort=trace",
        }
    }

    /// Write the completion script for `shell`
    pub fn print_completions<W: Write>(shell: Shell, buf: &mut W) {
        let mut cmd = Self::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, buf);
    }
}
