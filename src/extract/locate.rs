//! Compute where the real file content sits inside an attachment buffer.
//!
//! Layout of a resolved attachment buffer, as the container stores it:
//!
//! ```text
//! | 4-byte prefix | name* | payload | ext* | name* | name* | mime* |
//! ```
//!
//! (`*` = spread encoded). The payload starts right after the prefix and the
//! first copy of the name, and ends at the extension marker that precedes the
//! trailing names.

use tracing::debug;

use crate::error::{ExtractError, MarkerKind, Result};
use crate::model::attachment::Attachment;
use crate::parser::spread::{file_extension, rfind_bytes, spread};

/// Half-open byte range `[start, end)` of the payload within the raw buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadRange {
    pub start: usize,
    pub end: usize,
}

impl PayloadRange {
    /// Number of payload bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// `true` for an empty payload.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Offset of the payload start for a given filename: two bytes per byte of
/// the name plus a two-unit prefix.
pub fn payload_start(file_name: &str) -> usize {
    (file_name.len() + 2) * 2
}

/// Locate the payload of a resolved attachment.
///
/// Fails without touching the buffer when the attachment has no name, when
/// either marker is missing, or when the bounds would not form a valid slice.
pub fn payload_range(attachment: &Attachment) -> Result<PayloadRange> {
    let file_name = attachment.file_name().ok_or(ExtractError::MissingFileName)?;
    let raw = attachment.raw();

    let start = payload_start(file_name);
    let mime_marker = spread(attachment.mime());
    let ext_marker = spread(file_extension(file_name));
    let name_marker = spread(file_name);

    let not_found = |marker| ExtractError::MarkerNotFound {
        marker,
        file_name: file_name.to_string(),
    };

    let mime_pos = rfind_bytes(raw, &mime_marker).ok_or_else(|| not_found(MarkerKind::Mime))?;
    let search_end = mime_pos
        .checked_sub(ext_marker.len() + name_marker.len())
        .ok_or_else(|| not_found(MarkerKind::Extension))?;
    let end = rfind_bytes(&raw[..search_end], &ext_marker)
        .ok_or_else(|| not_found(MarkerKind::Extension))?;

    debug!(file_name, start, end, mime_pos, "Located payload");

    if start > end {
        return Err(ExtractError::PayloadOutOfRange {
            start,
            end,
            len: raw.len(),
        });
    }
    Ok(PayloadRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Buffer shaped like a real attachment group.
    fn layout(name: &str, mime: &str, payload: &[u8]) -> Vec<u8> {
        let mut raw = vec![0x01, 0x00, 0x00, 0x00];
        raw.extend_from_slice(&spread(name));
        raw.extend_from_slice(payload);
        raw.extend_from_slice(&spread(file_extension(name)));
        raw.extend_from_slice(&spread(name));
        raw.extend_from_slice(&spread(name));
        raw.extend_from_slice(&spread(mime));
        raw
    }

    #[test]
    fn test_payload_round_trip() {
        let payload = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\n%%EOF".to_vec();
        let raw = layout("report.pdf", "application/pdf", &payload);
        let att = Attachment::with_resolution(raw.clone(), "application/pdf", "report.pdf");

        let range = payload_range(&att).unwrap();
        assert_eq!(range.start, (10 + 2) * 2);
        assert_eq!(&raw[range.start..range.end], payload.as_slice());
        assert_eq!(range.len(), payload.len());
    }

    #[test]
    fn test_round_trip_binary_payload() {
        let payload: Vec<u8> = (0u8..=255).cycle().take(1000).collect();
        let raw = layout("photo.jpg", "image/jpeg", &payload);
        let att = Attachment::with_resolution(raw.clone(), "image/jpeg", "photo.jpg");
        let range = payload_range(&att).unwrap();
        assert_eq!(&raw[range.start..range.end], payload.as_slice());
    }

    #[test]
    fn test_empty_payload() {
        let raw = layout("a.txt", "text/plain", b"");
        let att = Attachment::with_resolution(raw, "text/plain", "a.txt");
        let range = payload_range(&att).unwrap();
        assert!(range.is_empty());
    }

    #[test]
    fn test_missing_name() {
        let att = Attachment::from_raw(b"whatever".to_vec());
        assert!(matches!(payload_range(&att), Err(ExtractError::MissingFileName)));
    }

    #[test]
    fn test_missing_mime_marker() {
        let mut raw = vec![0u8; 4];
        raw.extend_from_slice(&spread("report.pdf"));
        raw.extend_from_slice(b"payload");
        let att = Attachment::with_resolution(raw, "application/pdf", "report.pdf");
        assert!(matches!(
            payload_range(&att),
            Err(ExtractError::MarkerNotFound {
                marker: MarkerKind::Mime,
                ..
            })
        ));
    }

    #[test]
    fn test_mime_marker_too_close_to_start() {
        let raw = spread("application/pdf");
        let att = Attachment::with_resolution(raw, "application/pdf", "report.pdf");
        assert!(matches!(
            payload_range(&att),
            Err(ExtractError::MarkerNotFound {
                marker: MarkerKind::Extension,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_extension_marker() {
        let mut raw = vec![0u8; 64];
        raw.extend_from_slice(&spread("application/pdf"));
        let att = Attachment::with_resolution(raw, "application/pdf", "report.pdf");
        assert!(matches!(
            payload_range(&att),
            Err(ExtractError::MarkerNotFound {
                marker: MarkerKind::Extension,
                ..
            })
        ));
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        // The extension marker sits before the computed payload start.
        let mut raw = spread(".pdf");
        raw.extend_from_slice(&[0u8; 40]);
        raw.extend_from_slice(&spread("application/pdf"));
        let att = Attachment::with_resolution(raw, "application/pdf", "report.pdf");
        assert!(matches!(
            payload_range(&att),
            Err(ExtractError::PayloadOutOfRange { end: 0, .. })
        ));
    }
}
