//! Configuration module for azsort
//!
//! Settings are layered, lowest precedence first:
//! 1. built-in defaults
//! 2. an optional TOML file passed with `--config` (read only, never written)
//! 3. `AZSORT_*` environment variables (`AZSORT_MODE=copy`, `AZSORT_QUIET=true`)
//! 4. command-line flags, applied by [`crate::cli::Cli::apply_to`]
//!
//! Paths and `--go` are not configurable; they only come from the command
//! line or the prompts.

mod prompt;

pub use prompt::{clean_path_input, prompt_destination, prompt_source};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::organize::TransferMode;

/// Path display format
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PathFormat {
    /// Display absolute paths
    #[default]
    Absolute,
    /// Display paths relative to the destination root
    Relative,
}

/// How the run report is rendered
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Colored console lines and a summary
    #[default]
    Text,
    /// The whole report as one JSON document
    Json,
}

/// Application settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Move or copy when the run executes
    pub mode: TransferMode,

    /// Suppress informational output, print only the mappings
    pub quiet: bool,

    /// Default format for displaying destination paths
    pub path_format: PathFormat,

    /// Report rendering
    pub output: ReportFormat,

    /// Ask for paths that were not given on the command line
    pub prompt: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: TransferMode::default(),
            quiet: false,
            path_format: PathFormat::default(),
            output: ReportFormat::default(),
            prompt: true,
        }
    }
}

impl Settings {
    /// Prefix of the environment variables read by [`Settings::load`]
    pub const ENV_PREFIX: &'static str = "AZSORT";

    /// Load settings from defaults, an optional file and the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or malformed, or a value
    /// has the wrong type.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(file, None)
    }

    /// Same as [`Settings::load`] with an explicit environment map instead of
    /// the process environment
    pub(crate) fn load_from(
        file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(Self::ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        settings.try_deserialize()
    }
}
