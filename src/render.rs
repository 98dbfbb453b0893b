//! Record rendering.
//!
//! A record is printed as its header, then alternating sequence and quality
//! lines wrapped to the same width, then its separator:
//!
//! ```text
//! @r1
//! ACGT
//! !!!!
//! ACGT
//! !!!!
//! +
//! ```
//!
//! Everything is laid out and checked before the first byte is written, so a
//! failing record never leaves half of itself in the output.

use std::io::{self, Write};

use thiserror::Error;

use crate::ansi;
use crate::config::ViewConfig;
use crate::model::FastqRecord;
use crate::quality::{self, QualityError};
use crate::wrap::{wrap, CountMode};

/// Errors that can occur while rendering a record.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write output: {0}")]
    IoError(#[from] io::Error),

    #[error("Sequence wrapped into {sequence} lines but quality into {quality}")]
    SegmentCountMismatch { sequence: usize, quality: usize },

    #[error("Sequence and quality out of step on wrapped line {line}: {sequence} vs {quality}")]
    SegmentWidthMismatch {
        line: usize,
        sequence: usize,
        quality: usize,
    },

    #[error(transparent)]
    Quality(#[from] QualityError),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Lays out a record as the lines to print, without writing anything.
pub fn render_lines(record: &FastqRecord, config: &ViewConfig) -> RenderResult<Vec<String>> {
    let sequence = wrap(&record.sequence, CountMode::Content, config.columns);
    let quality = wrap(&record.quality, CountMode::Raw, config.columns);

    if sequence.len() != quality.len() {
        return Err(RenderError::SegmentCountMismatch {
            sequence: sequence.len(),
            quality: quality.len(),
        });
    }

    let per_pair = if config.skip_lines { 3 } else { 2 };
    let mut lines = Vec::with_capacity(sequence.len() * per_pair + 2);
    lines.push(record.header.clone());

    for (index, (seq_line, qual_line)) in sequence.into_iter().zip(quality).enumerate() {
        // Same measures the assembler balanced: bases against quality chars
        let seq_width = ansi::content_length(&seq_line);
        let qual_width = qual_line.chars().count();
        if seq_width != qual_width {
            return Err(RenderError::SegmentWidthMismatch {
                line: index + 1,
                sequence: seq_width,
                quality: qual_width,
            });
        }

        lines.push(seq_line);
        if config.colorize_quality {
            lines.push(quality::colorize_line(&qual_line, config.max_quality)?);
        } else {
            lines.push(qual_line);
        }
        if config.skip_lines {
            lines.push(String::new());
        }
    }

    lines.push(record.separator.clone());
    Ok(lines)
}

/// Renders a record to `out`.
pub fn render<W: Write>(record: &FastqRecord, config: &ViewConfig, out: &mut W) -> RenderResult<()> {
    for line in render_lines(record, config)? {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
