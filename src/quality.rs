//! Quality score colouring.
//!
//! Quality characters run from ASCII 33 (`!`) through 126 (`~`) in order.
//! Each one is mapped onto one of eight colour buckets, from the darkest
//! (lowest quality) to the most vivid (highest quality):
//! black, magenta, red, yellow, white, green, blue, cyan.

use std::ops::RangeInclusive;

use ansi_term::{Colour, Style};
use thiserror::Error;

/// Lowest quality character.
pub const MIN_QUALITY: char = '!';
/// Highest quality character.
pub const MAX_QUALITY: char = '~';
/// Valid range of quality characters.
pub const QUALITY_RANGE: RangeInclusive<char> = MIN_QUALITY..=MAX_QUALITY;

/// Number of colour buckets.
pub const BUCKET_COUNT: usize = 8;

/// Style of each bucket, lowest quality first.
pub fn bucket_style(bucket: usize) -> Style {
    match bucket {
        0 => Colour::Black.bold(), // bold so it's not invisible
        1 => Colour::Purple.normal(),
        2 => Colour::Red.normal(),
        3 => Colour::Yellow.normal(),
        4 => Colour::White.normal(),
        5 => Colour::Green.normal(),
        6 => Colour::Blue.normal(),
        _ => Colour::Cyan.normal(),
    }
}

/// Errors that can occur while colouring qualities.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QualityError {
    #[error("Quality value {value:?} out of range in {line:?}")]
    OutOfRange { value: char, line: String },

    #[error("Maximum quality must be greater than '!', got {0:?}")]
    InvalidMaximum(char),
}

/// Result type for quality operations.
pub type QualityResult<T> = Result<T, QualityError>;

/// Returns the colour bucket (0 to 7) for a quality character.
///
/// Characters above `max_quality` land in the top bucket.
pub fn bucket(quality: char, max_quality: char) -> QualityResult<usize> {
    if !QUALITY_RANGE.contains(&quality) {
        return Err(QualityError::OutOfRange {
            value: quality,
            line: quality.to_string(),
        });
    }
    if max_quality <= MIN_QUALITY || max_quality > MAX_QUALITY {
        return Err(QualityError::InvalidMaximum(max_quality));
    }

    let offset = quality as usize - MIN_QUALITY as usize;
    let span = max_quality as usize - MIN_QUALITY as usize;
    let bucket = BUCKET_COUNT * offset / span;
    Ok(bucket.min(BUCKET_COUNT - 1))
}

/// Wraps a single quality character in its bucket colour.
pub fn colorize(quality: char, max_quality: char) -> QualityResult<String> {
    let bucket = bucket(quality, max_quality)?;
    Ok(bucket_style(bucket).paint(quality.to_string()).to_string())
}

/// Colours every character of a quality line.
pub fn colorize_line(line: &str, max_quality: char) -> QualityResult<String> {
    let mut out = String::with_capacity(line.len() * 12);
    for c in line.chars() {
        let colored = colorize(c, max_quality).map_err(|e| match e {
            QualityError::OutOfRange { value, .. } => QualityError::OutOfRange {
                value,
                line: line.to_string(),
            },
            other => other,
        })?;
        out.push_str(&colored);
    }
    Ok(out)
}
