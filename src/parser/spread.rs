//! Spread encoding: metadata strings padded to two-byte units.
//!
//! Inside attachment streams every character of a metadata string is stored
//! followed by a zero byte. Markers built with [`spread`] are searched for in
//! the raw buffer to find where metadata begins and the payload ends.

/// Encode `s` by following each character's UTF-8 bytes with a zero byte.
pub fn spread(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() * 2);
    let mut buf = [0u8; 4];
    for c in s.chars() {
        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        out.push(0);
    }
    out
}

/// Drop the zero padding from a spread-encoded buffer.
///
/// If bytes 0 and 2 are both zero the text sits on odd positions, otherwise
/// on even ones. Buffers shorter than three bytes carry no usable text.
pub fn strip_separators(bytes: &[u8]) -> Vec<u8> {
    if bytes.len() < 3 {
        return Vec::new();
    }
    let offset = usize::from(bytes[0] == 0 && bytes[2] == 0);
    bytes[offset..].iter().step_by(2).copied().collect()
}

/// Byte offset of the last occurrence of `needle` in `haystack`.
///
/// An empty needle matches at the end of the haystack.
pub fn rfind_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(haystack.len());
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

/// Extension of the final path component, dot included (`"a.tar.gz"` → `".gz"`).
///
/// Returns an empty string when the last component has no dot.
pub fn file_extension(name: &str) -> &str {
    for (i, c) in name.char_indices().rev() {
        if std::path::is_separator(c) {
            break;
        }
        if c == '.' {
            return &name[i..];
        }
    }
    ""
}
