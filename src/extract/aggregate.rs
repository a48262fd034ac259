//! Group container entries into attachments.
//!
//! An attachment group opens at an entry whose name contains `attach` and
//! closes at the next entry whose name contains `properties`. Every entry in
//! between is read once and appended to the group's buffer in traversal order.

use tracing::debug;

use crate::container::reader::ContainerReader;
use crate::error::Result;
use crate::model::attachment::Attachment;

/// Substring that opens an attachment group.
pub const ATTACH_MARKER: &str = "attach";

/// Substring that closes an open attachment group.
pub const PROPERTIES_MARKER: &str = "properties";

/// Walk `reader` to the end and return one [`Attachment`] per group, in the
/// order their opening entries were seen.
///
/// A second `attach` entry inside an open group starts a fresh group; the
/// bytes that follow belong to the newest one. Short reads are kept as-is.
pub fn aggregate<R: ContainerReader + ?Sized>(reader: &mut R) -> Result<Vec<Attachment>> {
    let mut attachments: Vec<Attachment> = Vec::new();
    let mut in_attachment = false;

    while let Some(entry) = reader.next_entry()? {
        if entry.name.contains(ATTACH_MARKER) {
            if in_attachment {
                debug!(name = %entry.name, "Attachment marker inside an open group");
            }
            attachments.push(Attachment::new());
            in_attachment = true;
            continue;
        }

        if !in_attachment {
            continue;
        }

        if entry.name.contains(PROPERTIES_MARKER) {
            in_attachment = false;
            continue;
        }

        let bytes = reader.read_entry(&entry)?;
        if (bytes.len() as u64) < entry.size {
            debug!(
                name = %entry.name,
                read = bytes.len(),
                declared = entry.size,
                "Short read, keeping partial content"
            );
        }
        if let Some(current) = attachments.last_mut() {
            current.append(&bytes);
        }
    }

    debug!(count = attachments.len(), "Aggregated attachment groups");
    Ok(attachments)
}
