//! Measuring text that may carry ANSI colour codes.
//!
//! Nucleotide sequences are always `[A-Z]+` and escape sequences are fully
//! out of band, so "content" here simply means uppercase ASCII letters.
//! Everything else in a sequence line is treated as colour control and
//! ignored when counting.

use ansi_term::{Colour, Style};
use thiserror::Error;

/// Escape character that starts every ANSI control sequence.
const ESC: char = '\x1b';

/// Errors raised while measuring sequence text.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnsiError {
    #[error("Unable to determine length: got both {content} and {display} for {text:?}")]
    AmbiguousLength {
        content: usize,
        display: usize,
        text: String,
    },
}

/// Returns true for characters that count as sequence content.
#[inline]
pub fn is_content(c: char) -> bool {
    c.is_ascii_uppercase()
}

/// Counts the uppercase letters in `text`, ignoring everything else.
pub fn content_length(text: &str) -> usize {
    text.chars().filter(|&c| is_content(c)).count()
}

/// Removes every character that is not an uppercase letter.
pub fn strip_non_content(text: &str) -> String {
    text.chars().filter(|&c| is_content(c)).collect()
}

/// Terminal width of `text` with ANSI escape sequences skipped.
///
/// Unlike [`content_length`] this counts every visible character, so it is
/// the measure to use for quality strings, which contain no letters to
/// speak of.
pub fn display_width(text: &str) -> usize {
    textwrap::core::display_width(text)
}

/// Length of a sequence line once colour codes are removed.
///
/// The letter count and the escape-aware display width must agree. When they
/// do not, the line holds something other than uppercase bases and colour
/// codes and its length cannot be trusted.
pub fn colorless_length(text: &str) -> Result<usize, AnsiError> {
    let content = content_length(text);
    let display = display_width(text);
    if content != display {
        return Err(AnsiError::AmbiguousLength {
            content,
            display,
            text: text.to_string(),
        });
    }
    Ok(content)
}

/// Iterates over the SGR (`ESC [ params m`) sequences found in `text`.
pub fn sgr_sequences(text: &str) -> SgrSequences<'_> {
    SgrSequences { text, pos: 0 }
}

/// Iterator returned by [`sgr_sequences`].
pub struct SgrSequences<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for SgrSequences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while self.pos < self.text.len() {
            let rest = &self.text[self.pos..];
            let Some(offset) = rest.find(ESC) else {
                self.pos = self.text.len();
                return None;
            };
            let start = self.pos + offset;
            match sgr_length(&self.text[start..]) {
                Some(len) => {
                    self.pos = start + len;
                    return Some(&self.text[start..start + len]);
                }
                None => self.pos = start + ESC.len_utf8(),
            }
        }
        None
    }
}

/// Updates `style` with the effect of one SGR sequence.
///
/// Later codes replace earlier ones setting the same attribute, so the style
/// stays small however many codes a read carries. Parameters with no
/// [`Style`] counterpart are ignored.
pub fn apply_sgr(style: &mut Style, code: &str) {
    let body = code
        .strip_prefix("\x1b[")
        .and_then(|b| b.strip_suffix('m'))
        .unwrap_or("");
    let mut params = body.split(';').map(|p| match p {
        "" => 0,
        _ => p.parse::<u8>().unwrap_or(u8::MAX),
    });

    while let Some(param) = params.next() {
        match param {
            0 => *style = Style::new(),
            1 => style.is_bold = true,
            2 => style.is_dimmed = true,
            3 => style.is_italic = true,
            4 => style.is_underline = true,
            5 => style.is_blink = true,
            7 => style.is_reverse = true,
            8 => style.is_hidden = true,
            9 => style.is_strikethrough = true,
            22 => {
                style.is_bold = false;
                style.is_dimmed = false;
            }
            23 => style.is_italic = false,
            24 => style.is_underline = false,
            25 => style.is_blink = false,
            27 => style.is_reverse = false,
            28 => style.is_hidden = false,
            29 => style.is_strikethrough = false,
            30..=37 => style.foreground = Some(basic_colour(param - 30)),
            38 => style.foreground = extended_colour(&mut params),
            39 => style.foreground = None,
            40..=47 => style.background = Some(basic_colour(param - 40)),
            48 => style.background = extended_colour(&mut params),
            49 => style.background = None,
            90..=97 => style.foreground = Some(Colour::Fixed(param - 90 + 8)),
            100..=107 => style.background = Some(Colour::Fixed(param - 100 + 8)),
            _ => {}
        }
    }
}

/// The eight standard colours, by SGR offset.
fn basic_colour(offset: u8) -> Colour {
    match offset {
        0 => Colour::Black,
        1 => Colour::Red,
        2 => Colour::Green,
        3 => Colour::Yellow,
        4 => Colour::Blue,
        5 => Colour::Purple,
        6 => Colour::Cyan,
        _ => Colour::White,
    }
}

/// Reads the `5;n` or `2;r;g;b` tail of a 38/48 parameter.
fn extended_colour(params: &mut impl Iterator<Item = u8>) -> Option<Colour> {
    match params.next()? {
        5 => params.next().map(Colour::Fixed),
        2 => Some(Colour::RGB(params.next()?, params.next()?, params.next()?)),
        _ => None,
    }
}

/// Byte length of the SGR sequence at the start of `text`, if there is one.
fn sgr_length(text: &str) -> Option<usize> {
    let body = text.strip_prefix("\x1b[")?;
    let params = body
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b';')
        .count();
    if body.as_bytes().get(params) == Some(&b'm') {
        Some(2 + params + 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_length_plain() {
        assert_eq!(content_length("ACGTN"), 5);
        assert_eq!(content_length(""), 0);
    }

    #[test]
    fn test_content_length_ignores_colour_codes() {
        let text = "\x1b[31mAC\x1b[0m\x1b[1;32mGT\x1b[0m";
        assert_eq!(content_length(text), 4);
        assert_eq!(strip_non_content(text), "ACGT");
    }

    #[test]
    fn test_content_length_matches_stripped_length() {
        let samples = [
            "ACGT",
            "\x1b[35mA\x1b[0mC\x1b[36mG\x1b[0mT",
            "\x1b[1;30m\x1b[0m",
            "NNNN\x1b[33mRYKM\x1b[0m",
        ];
        for s in samples {
            assert_eq!(content_length(s), strip_non_content(s).len(), "{s:?}");
        }
    }

    #[test]
    fn test_display_width_skips_escapes() {
        assert_eq!(display_width("!!!!"), 4);
        assert_eq!(display_width("\x1b[31m!\x1b[0m\x1b[36m#\x1b[0m"), 2);
    }

    #[test]
    fn test_colorless_length() {
        assert_eq!(colorless_length("\x1b[31mACGT\x1b[0m"), Ok(4));
        assert_eq!(colorless_length(""), Ok(0));
    }

    #[test]
    fn test_colorless_length_rejects_lowercase() {
        let result = colorless_length("acgt");
        assert_eq!(
            result,
            Err(AnsiError::AmbiguousLength {
                content: 0,
                display: 4,
                text: "acgt".to_string(),
            })
        );
    }

    #[test]
    fn test_sgr_sequences() {
        let text = "\x1b[31mA\x1b[0mC\x1b[mG\x1b[1;30mT";
        let codes: Vec<&str> = sgr_sequences(text).collect();
        assert_eq!(codes, vec!["\x1b[31m", "\x1b[0m", "\x1b[m", "\x1b[1;30m"]);
    }

    #[test]
    fn test_sgr_sequences_skips_incomplete_escape() {
        let codes: Vec<&str> = sgr_sequences("A\x1b[3").collect();
        assert!(codes.is_empty());
        let codes: Vec<&str> = sgr_sequences("\x1b\x1b[32mA").collect();
        assert_eq!(codes, vec!["\x1b[32m"]);
    }

    fn style_after(codes: &[&str]) -> Style {
        let mut style = Style::new();
        for code in codes {
            apply_sgr(&mut style, code);
        }
        style
    }

    #[test]
    fn test_apply_sgr_reset() {
        assert!(style_after(&["\x1b[31m", "\x1b[0m"]).is_plain());
        assert!(style_after(&["\x1b[1;32m", "\x1b[m"]).is_plain());
    }

    #[test]
    fn test_apply_sgr_combined_code() {
        assert_eq!(style_after(&["\x1b[1;30m"]), Colour::Black.bold());
        assert_eq!(style_after(&["\x1b[1;30m"]).prefix().to_string(), "\x1b[1;30m");
    }

    #[test]
    fn test_apply_sgr_later_colour_wins() {
        let style = style_after(&["\x1b[31m", "\x1b[32m", "\x1b[31m", "\x1b[36m"]);
        assert_eq!(style, Colour::Cyan.normal());
        assert_eq!(style.prefix().to_string(), "\x1b[36m");
    }

    #[test]
    fn test_apply_sgr_extended_colours() {
        assert_eq!(style_after(&["\x1b[38;5;208m"]), Colour::Fixed(208).normal());
        assert_eq!(
            style_after(&["\x1b[48;2;1;2;3m"]),
            Style::new().on(Colour::RGB(1, 2, 3))
        );
        assert_eq!(style_after(&["\x1b[91m"]), Colour::Fixed(9).normal());
    }

    #[test]
    fn test_apply_sgr_attribute_off() {
        let style = style_after(&["\x1b[1m", "\x1b[4m", "\x1b[34m", "\x1b[22m", "\x1b[39m"]);
        assert_eq!(style, Style::new().underline());
    }
}
