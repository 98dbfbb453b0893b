//! Streaming FASTQ record assembly.
//!
//! Records are built one raw line at a time. Sequence and quality may both
//! span several lines, so the separator line alone does not say where a
//! record ends: instead the assembler keeps running totals of the bases seen
//! and the quality characters seen, and closes the record when they meet.
//!
//! ## FASTQ Format
//!
//! ```text
//! @read_identifier optional description
//! ACGTACGTACGT...
//! +
//! IIIIHHHHGGGG...
//! ```

use thiserror::Error;

use crate::ansi::{self, AnsiError};
use crate::model::FastqRecord;

/// Errors that can occur while assembling records.
#[derive(Error, Debug)]
pub enum FastqError {
    #[error("Failed to read input: {0}")]
    IoError(#[from] std::io::Error),

    #[error("bad value at line {line_number}: {line:?}")]
    UnexpectedLine { line_number: usize, line: String },

    #[error("quality longer than sequence at line {line_number} ({quality_len} > {sequence_len})")]
    QualityTooLong {
        line_number: usize,
        quality_len: usize,
        sequence_len: usize,
    },

    #[error("Invalid sequence at line {line_number}: {source}")]
    AmbiguousLength {
        line_number: usize,
        #[source]
        source: AnsiError,
    },

    #[error("Input ended in the middle of record {header:?}")]
    Truncated { header: String },
}

/// Result type for FASTQ operations.
pub type FastqResult<T> = Result<T, FastqError>;

/// Where the assembler is within the current record.
///
/// Each state owns the parts of the record collected so far.
#[derive(Debug, Default)]
enum State {
    #[default]
    AwaitingHeader,
    AwaitingSequenceOrSeparator {
        header: String,
        sequence: String,
        sequence_len: usize,
    },
    AwaitingQuality {
        header: String,
        sequence: String,
        sequence_len: usize,
        separator: String,
        quality: String,
        quality_len: usize,
    },
}

/// Turns a stream of raw lines into complete FASTQ records.
#[derive(Debug, Default)]
pub struct RecordAssembler {
    state: State,
    records: usize,
}

impl RecordAssembler {
    /// Creates an assembler waiting for its first header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of complete records assembled so far.
    pub fn records_emitted(&self) -> usize {
        self.records
    }

    /// Feeds one line (without its line terminator) into the assembler.
    ///
    /// Returns the record completed by this line, if any. `line_number` is
    /// only used for error reporting.
    pub fn push(&mut self, line: &str, line_number: usize) -> FastqResult<Option<FastqRecord>> {
        match std::mem::take(&mut self.state) {
            State::AwaitingHeader => {
                if !line.starts_with('@') {
                    return Err(FastqError::UnexpectedLine {
                        line_number,
                        line: line.to_string(),
                    });
                }
                self.state = State::AwaitingSequenceOrSeparator {
                    header: line.to_string(),
                    sequence: String::new(),
                    sequence_len: 0,
                };
                Ok(None)
            }

            State::AwaitingSequenceOrSeparator {
                header,
                mut sequence,
                mut sequence_len,
            } => {
                if line.starts_with('+') {
                    self.state = State::AwaitingQuality {
                        header,
                        sequence,
                        sequence_len,
                        separator: line.to_string(),
                        quality: String::new(),
                        quality_len: 0,
                    };
                } else {
                    sequence_len += ansi::colorless_length(line)
                        .map_err(|source| FastqError::AmbiguousLength { line_number, source })?;
                    sequence.push_str(line);
                    self.state = State::AwaitingSequenceOrSeparator {
                        header,
                        sequence,
                        sequence_len,
                    };
                }
                Ok(None)
            }

            State::AwaitingQuality {
                header,
                sequence,
                sequence_len,
                separator,
                mut quality,
                mut quality_len,
            } => {
                quality.push_str(line);
                quality_len += line.chars().count();

                if quality_len > sequence_len {
                    return Err(FastqError::QualityTooLong {
                        line_number,
                        quality_len,
                        sequence_len,
                    });
                }
                if quality_len == sequence_len {
                    self.records += 1;
                    let record = FastqRecord {
                        header,
                        sequence,
                        separator,
                        quality,
                    };
                    debug_assert!(record.is_consistent());
                    return Ok(Some(record));
                }

                self.state = State::AwaitingQuality {
                    header,
                    sequence,
                    sequence_len,
                    separator,
                    quality,
                    quality_len,
                };
                Ok(None)
            }
        }
    }

    /// Signals the end of input.
    ///
    /// Fails if a record was still being assembled.
    pub fn finish(&mut self) -> FastqResult<()> {
        match std::mem::take(&mut self.state) {
            State::AwaitingHeader => Ok(()),
            State::AwaitingSequenceOrSeparator { header, .. }
            | State::AwaitingQuality { header, .. } => Err(FastqError::Truncated { header }),
        }
    }
}

/// Assembles every record in `content`.
///
/// Useful for testing or processing in-memory data.
pub fn parse_fastq_str(content: &str) -> FastqResult<Vec<FastqRecord>> {
    let mut assembler = RecordAssembler::new();
    let mut records = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if let Some(record) = assembler.push(line.trim_end(), index + 1)? {
            records.push(record);
        }
    }
    assembler.finish()?;
    Ok(records)
}
