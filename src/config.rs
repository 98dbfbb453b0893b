//! Viewer configuration.
//!
//! Command-line values are checked here once, before any input is opened,
//! so the rendering code can rely on them.

use crossterm::terminal;
use thiserror::Error;

use crate::quality::{MAX_QUALITY, MIN_QUALITY};

/// Wrap width used when the terminal size cannot be detected.
pub const DEFAULT_COLUMNS: usize = 80;
/// Default highest quality character.
pub const DEFAULT_MAX_QUALITY: char = 'D';

/// Errors in the viewer configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--max-quality must be a single character between \"!\" and \"~\"; got {0:?}")]
    MaxQualityOutOfRange(String),

    #[error("--max-quality must be greater than \"!\" to leave room for colours")]
    MaxQualityTooLow,

    #[error("--columns must be at least 1")]
    ZeroColumns,
}

/// Validated rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConfig {
    /// Width of each wrapped line
    pub columns: usize,
    /// Colour the quality characters
    pub colorize_quality: bool,
    /// Quality character mapped to the top colour bucket
    pub max_quality: char,
    /// Print a blank line after each sequence/quality pair
    pub skip_lines: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            colorize_quality: false,
            max_quality: DEFAULT_MAX_QUALITY,
            skip_lines: false,
        }
    }
}

impl ViewConfig {
    /// Builds a configuration from raw option values.
    ///
    /// `columns` falls back to the detected terminal width when not given.
    /// `max_quality` is validated even when colouring is off.
    pub fn new(
        columns: Option<usize>,
        colorize_quality: bool,
        max_quality: &str,
        skip_lines: bool,
    ) -> Result<Self, ConfigError> {
        let max_quality = parse_max_quality(max_quality)?;
        let columns = match columns {
            Some(0) => return Err(ConfigError::ZeroColumns),
            Some(n) => n,
            None => detect_columns(),
        };

        Ok(Self {
            columns,
            colorize_quality,
            max_quality,
            skip_lines,
        })
    }
}

/// Parses and checks the `--max-quality` value.
pub fn parse_max_quality(value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    let c = match (chars.next(), chars.next()) {
        (Some(c), None) if (MIN_QUALITY..=MAX_QUALITY).contains(&c) => c,
        _ => return Err(ConfigError::MaxQualityOutOfRange(value.to_string())),
    };
    if c == MIN_QUALITY {
        return Err(ConfigError::MaxQualityTooLow);
    }
    Ok(c)
}

/// Returns the terminal width, or [`DEFAULT_COLUMNS`] if it cannot be found.
pub fn detect_columns() -> usize {
    match terminal::size() {
        Ok((width, _)) if width > 0 => width as usize,
        _ => {
            log::debug!("Terminal width unavailable, using {DEFAULT_COLUMNS} columns");
            DEFAULT_COLUMNS
        }
    }
}
