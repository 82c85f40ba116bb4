//! Interactive prompts for paths missing from the command line
//!
//! Only the binary calls these, and only when stdin is a terminal. Answers
//! are cleaned the way a pasted path usually needs: surrounding whitespace
//! and quotes go, and a leading `~` becomes the home directory.

use dialoguer::{Input, theme::ColorfulTheme};
use std::path::{Path, PathBuf};

use crate::{AzError, Result};

/// Ask for the folder to organize
///
/// # Errors
///
/// Returns [`AzError::InvalidInput`] if user input cannot be read or is empty.
pub fn prompt_source() -> Result<PathBuf> {
    let answer: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Paste the folder you want to organise")
        .interact_text()
        .map_err(read_failed)?;

    source_from_answer(&answer)
}

/// Ask where the A-Z tree goes; an empty answer means `source` itself
///
/// # Errors
///
/// Returns [`AzError::InvalidInput`] if user input cannot be read.
pub fn prompt_destination(source: &Path) -> Result<PathBuf> {
    let answer: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Where should the A-Z tree be created? [same folder = press ENTER]")
        .allow_empty(true)
        .interact_text()
        .map_err(read_failed)?;

    Ok(destination_from_answer(&answer, source))
}

fn read_failed(e: dialoguer::Error) -> AzError {
    AzError::InvalidInput(format!("Failed to read input: {e}"))
}

fn source_from_answer(answer: &str) -> Result<PathBuf> {
    clean_path_input(answer)
        .ok_or_else(|| AzError::InvalidInput("No source folder given".to_string()))
}

fn destination_from_answer(answer: &str, source: &Path) -> PathBuf {
    clean_path_input(answer).unwrap_or_else(|| source.to_path_buf())
}

/// Turn a typed or pasted answer into a path, `None` if nothing is left
///
/// # Examples
/// ```
/// use azsort::config::clean_path_input;
/// use std::path::PathBuf;
///
/// assert_eq!(clean_path_input("  \"/tmp/in box\" "), Some(PathBuf::from("/tmp/in box")));
/// assert_eq!(clean_path_input("   "), None);
/// ```
#[must_use]
pub fn clean_path_input(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .unwrap_or(trimmed)
        .trim();

    if unquoted.is_empty() {
        return None;
    }
    Some(expand_home(unquoted))
}

fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
            .or_else(|| path.strip_prefix("~\\"))
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
