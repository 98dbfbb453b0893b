//! Fixed-width wrapping of sequence and quality strings.
//!
//! Generic ANSI-aware wrappers break on whitespace and get confused by
//! colour codes in the middle of a read, so the wrapping here is done by
//! hand. It is simpler than the general case: bases are always `[A-Z]` and
//! escape sequences never contain uppercase letters.

use ansi_term::Style;

use crate::ansi;

/// How characters are counted towards the wrap width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMode {
    /// Every character counts. Used for uncoloured quality strings.
    Raw,
    /// Only uppercase letters count; colour codes ride along for free.
    Content,
}

impl CountMode {
    #[inline]
    fn counts(self, c: char) -> bool {
        match self {
            CountMode::Raw => true,
            CountMode::Content => ansi::is_content(c),
        }
    }
}

/// Splits `text` into segments holding `columns` counted characters each.
///
/// The last segment may be shorter. A `columns` of zero returns the whole
/// text as one segment, and empty text yields no segments at all.
///
/// With [`CountMode::Content`] every segment is a self-contained coloured
/// string: a colour left open at the end of a segment is closed there and
/// reopened at the start of the next one.
pub fn wrap(text: &str, mode: CountMode, columns: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    if columns == 0 {
        return vec![text.to_string()];
    }

    let mut segments = Vec::new();
    let mut current = String::with_capacity(columns.min(text.len()));
    let mut length = 0;

    for c in text.chars() {
        current.push(c);
        if mode.counts(c) {
            length += 1;
        }
        if length == columns {
            segments.push(std::mem::take(&mut current));
            length = 0;
        }
    }

    if !current.is_empty() {
        match segments.last_mut() {
            // Only colour codes left over (typically a closing reset)
            Some(last) if length == 0 => last.push_str(&current),
            _ => segments.push(current),
        }
    }

    match mode {
        CountMode::Raw => segments,
        CountMode::Content => terminate_colors(segments),
    }
}

/// Closes colours left open at segment ends and reopens them on the next
/// segment.
///
/// The reopening prefix is the merged style in force, not the raw codes seen
/// so far, so it stays a single short sequence.
fn terminate_colors(segments: Vec<String>) -> Vec<String> {
    let mut active = Style::new();

    segments
        .into_iter()
        .map(|segment| {
            let mut out = active.prefix().to_string();
            out.push_str(&segment);

            for code in ansi::sgr_sequences(&segment) {
                ansi::apply_sgr(&mut active, code);
            }
            out.push_str(&active.suffix().to_string());
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_exact_multiple() {
        assert_eq!(wrap("ACGTACGT", CountMode::Content, 4), vec!["ACGT", "ACGT"]);
        assert_eq!(wrap("!!!!!!!!", CountMode::Raw, 4), vec!["!!!!", "!!!!"]);
    }

    #[test]
    fn test_wrap_short_last_segment() {
        assert_eq!(
            wrap("ACGTACGTAC", CountMode::Content, 4),
            vec!["ACGT", "ACGT", "AC"]
        );
    }

    #[test]
    fn test_wrap_wider_than_text() {
        assert_eq!(wrap("ACGT", CountMode::Content, 80), vec!["ACGT"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap("", CountMode::Raw, 4).is_empty());
        assert!(wrap("", CountMode::Content, 4).is_empty());
    }

    #[test]
    fn test_wrap_zero_columns() {
        assert_eq!(wrap("ACGTACGT", CountMode::Content, 0), vec!["ACGTACGT"]);
        assert_eq!(wrap("!!!", CountMode::Raw, 0), vec!["!!!"]);
    }

    #[test]
    fn test_wrap_raw_concatenation_reproduces_input() {
        let quality = "!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJ";
        for columns in 1..=quality.len() + 1 {
            let segments = wrap(quality, CountMode::Raw, columns);
            assert_eq!(segments.concat(), quality, "columns = {columns}");
            assert!(segments.iter().all(|s| s.len() <= columns));
        }
    }

    #[test]
    fn test_wrap_raw_counts_letters_and_symbols() {
        // Raw mode must not skip the uppercase quality characters
        assert_eq!(wrap("AB!!CD", CountMode::Raw, 3), vec!["AB!", "!CD"]);
    }

    #[test]
    fn test_wrap_content_ignores_colour_codes() {
        let text = "\x1b[31mAC\x1b[0mGT\x1b[32mAC\x1b[0m";
        let segments = wrap(text, CountMode::Content, 2);
        let contents: Vec<usize> = segments.iter().map(|s| ansi::content_length(s)).collect();
        assert_eq!(contents, vec![2, 2, 2]);
        assert_eq!(ansi::strip_non_content(&segments.concat()), "ACGTAC");
    }

    #[test]
    fn test_wrap_content_reopens_colour_across_boundary() {
        let text = "\x1b[31mACGT\x1b[0m";
        let segments = wrap(text, CountMode::Content, 2);
        assert_eq!(
            segments,
            vec![
                "\x1b[31mAC\x1b[0m".to_string(),
                "\x1b[31mGT\x1b[0m".to_string(),
            ]
        );
    }

    #[test]
    fn test_wrap_content_folds_trailing_codes() {
        // The closing reset must not become a segment of its own
        let segments = wrap("\x1b[31mACGT\x1b[0m", CountMode::Content, 4);
        assert_eq!(segments, vec!["\x1b[31mACGT\x1b[0m".to_string()]);
    }

    #[test]
    fn test_wrap_content_closes_unterminated_colour() {
        let segments = wrap("\x1b[36mACG", CountMode::Content, 2);
        assert_eq!(
            segments,
            vec![
                "\x1b[36mAC\x1b[0m".to_string(),
                "\x1b[36mG\x1b[0m".to_string(),
            ]
        );
    }

    #[test]
    fn test_wrap_content_reopening_stays_short() {
        // Every base carries its own colour and nothing is ever reset
        let text: String = (0..1000)
            .map(|i| if i % 2 == 0 { "\x1b[31mA" } else { "\x1b[32mC" })
            .collect();
        let segments = wrap(&text, CountMode::Content, 10);
        assert_eq!(segments.len(), 100);
        for segment in &segments {
            assert_eq!(ansi::content_length(segment), 10);
            // ten coloured bases, one reopening code and one reset
            assert!(segment.len() <= 10 * 6 + 5 + 4, "{} bytes", segment.len());
        }
        assert!(segments[99].starts_with("\x1b[32m\x1b[31mA"));
    }

    #[test]
    fn test_wrap_segment_boundaries_match_across_modes() {
        let sequence = "ACGTACGTACGTA";
        let quality = "IIIIHHHHGGGGF";
        for columns in 1..=14 {
            let seq = wrap(sequence, CountMode::Content, columns);
            let qual = wrap(quality, CountMode::Raw, columns);
            assert_eq!(seq.len(), qual.len());
            for (s, q) in seq.iter().zip(&qual) {
                assert_eq!(s.len(), q.len());
            }
        }
    }
}
