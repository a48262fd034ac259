//! The attachment data model.
//!
//! An [`Attachment`] owns the concatenated raw bytes of one attachment group
//! and, once resolved, the filename and MIME type recovered from them.

/// MIME type reported for attachments whose metadata could not be recovered.
pub const UNKNOWN_MIME: &str = "unknown";

/// One logical attachment recovered from a `.msg` container.
///
/// The buffer only grows while the attachment group is being aggregated and
/// is read-only afterwards. Resolution sets the name and type exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    raw: Vec<u8>,
    mime: String,
    file_name: Option<String>,
}

impl Default for Attachment {
    fn default() -> Self {
        Self::new()
    }
}

impl Attachment {
    /// An empty, unresolved attachment.
    pub fn new() -> Self {
        Self::from_raw(Vec::new())
    }

    /// Wrap an already concatenated buffer; name and type start unresolved.
    pub fn from_raw(raw: Vec<u8>) -> Self {
        Self {
            raw,
            mime: UNKNOWN_MIME.to_string(),
            file_name: None,
        }
    }

    /// Raw concatenated stream bytes.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Resolved MIME type, or [`UNKNOWN_MIME`].
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Resolved display name. `None` means the attachment cannot be saved.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// `true` once a filename has been recovered.
    pub fn is_resolved(&self) -> bool {
        self.file_name.is_some()
    }

    pub(crate) fn append(&mut self, bytes: &[u8]) {
        self.raw.extend_from_slice(bytes);
    }

    pub(crate) fn set_resolved(&mut self, mime: &str, file_name: String) {
        self.mime = mime.to_string();
        self.file_name = Some(file_name);
    }

    pub(crate) fn set_unresolved(&mut self) {
        self.mime = UNKNOWN_MIME.to_string();
        self.file_name = None;
    }

    /// Build an attachment with a known name and type, skipping the resolver.
    pub fn with_resolution(raw: Vec<u8>, mime: &str, file_name: &str) -> Self {
        let mut attachment = Self::from_raw(raw);
        attachment.set_resolved(mime, file_name.to_string());
        attachment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_attachment_is_unresolved() {
        let att = Attachment::new();
        assert!(att.raw().is_empty());
        assert_eq!(att.mime(), UNKNOWN_MIME);
        assert!(att.file_name().is_none());
        assert!(!att.is_resolved());
    }

    #[test]
    fn test_append_grows_buffer_in_order() {
        let mut att = Attachment::new();
        att.append(b"abc");
        att.append(b"def");
        assert_eq!(att.raw(), b"abcdef");
    }

    #[test]
    fn test_unresolve_resets_sentinel() {
        let mut att = Attachment::with_resolution(vec![1, 2], "image/png", "a.png");
        assert!(att.is_resolved());
        att.set_unresolved();
        assert_eq!(att.mime(), UNKNOWN_MIME);
        assert!(att.file_name().is_none());
    }
}
