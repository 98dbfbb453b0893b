//! Data model for the FASTQ viewer.
//!
//! A record is assembled line by line from the input, rendered once, and
//! dropped. Nothing outlives a single record.

use crate::ansi;

/// A complete FASTQ record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    /// The header line, including the leading '@'
    pub header: String,
    /// All sequence lines joined together
    pub sequence: String,
    /// The separator line, including the leading '+'
    pub separator: String,
    /// All quality lines joined together
    pub quality: String,
}

impl FastqRecord {
    /// Creates a new record.
    pub fn new(
        header: impl Into<String>,
        sequence: impl Into<String>,
        separator: impl Into<String>,
        quality: impl Into<String>,
    ) -> Self {
        Self {
            header: header.into(),
            sequence: sequence.into(),
            separator: separator.into(),
            quality: quality.into(),
        }
    }

    /// Returns the number of bases, ignoring any colour codes in the sequence.
    pub fn base_count(&self) -> usize {
        ansi::content_length(&self.sequence)
    }

    /// Returns the record name: the header without '@', up to the first space.
    pub fn name(&self) -> &str {
        let header = self.header.strip_prefix('@').unwrap_or(&self.header);
        header.split_whitespace().next().unwrap_or("")
    }

    /// Returns true if the sequence and quality describe the same number of bases.
    pub fn is_consistent(&self) -> bool {
        self.base_count() == self.quality.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_length() {
        let record = FastqRecord::new("@r1", "ACGT", "+", "IIII");
        assert_eq!(record.base_count(), 4);
        assert!(record.is_consistent());
    }

    #[test]
    fn test_record_length_ignores_colour() {
        let record = FastqRecord::new("@r1", "\x1b[31mACGT\x1b[0m", "+", "IIII");
        assert_eq!(record.base_count(), 4);
        assert!(record.is_consistent());
    }

    #[test]
    fn test_inconsistent_record() {
        let record = FastqRecord::new("@r1", "ACGT", "+", "III");
        assert!(!record.is_consistent());
    }

    #[test]
    fn test_record_name() {
        let record = FastqRecord::new("@read_7 length=4", "ACGT", "+", "IIII");
        assert_eq!(record.name(), "read_7");
        let record = FastqRecord::new("@", "", "+", "");
        assert_eq!(record.name(), "");
        assert_eq!(record.base_count(), 0);
    }
}
