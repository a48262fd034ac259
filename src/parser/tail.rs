//! Tail block extraction.
//!
//! The filename and MIME type of an attachment live in the streams that
//! follow its payload. The last newline-delimited segment of the buffer is
//! searched for them after every non-printable character has been removed,
//! which also collapses spread-encoded strings back into plain text.

use unicode_general_category::{get_general_category, GeneralCategory};

/// Last newline-delimited segment of `raw`, with non-printable characters removed.
///
/// Invalid UTF-8 becomes one U+FFFD per offending byte before filtering. A
/// buffer without a newline is its own tail block.
pub fn tail_block(raw: &[u8]) -> String {
    let tail = raw.rsplit(|&b| b == b'\n').next().unwrap_or(raw);
    decode_bytewise(tail)
        .chars()
        .filter(|&c| is_printable(c))
        .collect()
}

/// Decode UTF-8, replacing each byte of an invalid sequence with U+FFFD.
///
/// Unlike `String::from_utf8_lossy`, a truncated multibyte sequence yields one
/// replacement character per byte, so character counts follow the byte layout.
fn decode_bytewise(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                out.push(char::REPLACEMENT_CHARACTER);
                bytes = &rest[1..];
            }
        }
    }
}

/// Printability test: letters, marks, numbers, punctuation, symbols, and the
/// ASCII space.
///
/// Control, format, private-use, surrogate, and unassigned code points fail,
/// as do all separators other than U+0020.
pub fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::PrivateUse
            | GeneralCategory::Surrogate
            | GeneralCategory::Unassigned
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_is_last_line() {
        assert_eq!(tail_block(b"first\nsecond\nthird"), "third");
    }

    #[test]
    fn test_no_newline_uses_whole_buffer() {
        assert_eq!(tail_block(b"only line"), "only line");
    }

    #[test]
    fn test_trailing_newline_gives_empty_tail() {
        assert_eq!(tail_block(b"line\n"), "");
    }

    #[test]
    fn test_spread_text_collapses() {
        assert_eq!(tail_block(b"x\n.\0p\0d\0f\0\x01\x02"), ".pdf");
    }

    #[test]
    fn test_printability() {
        assert!(is_printable('a'));
        assert!(is_printable(' '));
        assert!(is_printable('é'));
        assert!(is_printable('\u{FFFD}'));
        assert!(!is_printable('\0'));
        assert!(!is_printable('\t'));
        assert!(!is_printable('\u{00A0}'));
        assert!(!is_printable('\u{200B}'));
        assert!(!is_printable('\u{E000}'));
        assert!(!is_printable('\u{2028}'));
    }

    #[test]
    fn test_unassigned_and_format_are_dropped() {
        for c in [
            '\u{378}', '\u{890}', '\u{891}', '\u{8E2}', '\u{110BD}', '\u{110CD}',
            '\u{13430}', '\u{1BCA0}', '\u{1D173}', '\u{1D17A}',
        ] {
            assert!(!is_printable(c), "{c:?} should not be printable");
        }
        assert_eq!(tail_block("a\u{378}b\u{1D173}c".as_bytes()), "abc");
    }

    #[test]
    fn test_invalid_utf8_replaced_per_byte() {
        // A truncated three-byte sequence followed by a zero byte.
        assert_eq!(tail_block(b"x\xE2\x8B\0y"), "x\u{FFFD}\u{FFFD}y");
        assert_eq!(tail_block(b"\xFFok"), "\u{FFFD}ok");
    }
}
