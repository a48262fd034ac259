//! Recover an attachment's filename and MIME type from its tail block.
//!
//! The streams after the payload store the extension, the filename, and the
//! MIME type next to each other. Once the zero padding is stripped, the tail
//! block reads roughly `<ext><name><name><mime>`: the MIME type marks where the
//! name ends, and the closest extension before it marks where the name begins.
//!
//! This is a heuristic over raw bytes, not a property-stream parser.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{ExtractError, Result};
use crate::mime::registry::MimeRegistry;
use crate::model::attachment::Attachment;
use crate::parser::tail::tail_block;

/// Resolve the filename and MIME type of a single attachment.
///
/// Registry entries are tried in declaration order and the first one that
/// yields a name wins. Without a match the attachment is left unresolved
/// with the `unknown` MIME type.
pub fn resolve(attachment: &mut Attachment, registry: &MimeRegistry) {
    let block = tail_block(attachment.raw());

    for mime in registry.mime_types() {
        let Some(ext) = registry.extension_for(mime) else {
            continue;
        };
        if let Some(name) = extract_name(&block, mime, ext) {
            info!(file_name = %name, mime, "Resolved attachment");
            attachment.set_resolved(mime, name);
            return;
        }
    }

    debug!(
        raw_len = attachment.raw().len(),
        "No registry entry matched the tail block"
    );
    attachment.set_unresolved();
}

/// Resolve every attachment in parallel and wait for all of them.
///
/// `threads == 0` runs on rayon's global pool, any other value on a
/// dedicated pool of that size.
pub fn resolve_all(
    attachments: &mut [Attachment],
    registry: &MimeRegistry,
    threads: usize,
) -> Result<()> {
    let run = |attachments: &mut [Attachment]| {
        attachments
            .par_iter_mut()
            .for_each(|attachment| resolve(attachment, registry));
    };

    if threads == 0 {
        run(attachments);
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| ExtractError::ResolvePool(e.to_string()))?;
    pool.install(|| run(attachments));
    Ok(())
}

/// Text between the extension occurrence closest before `mime` and `mime` itself.
///
/// The scan starts one byte before the position where `ext` would touch the
/// MIME marker (so the name's own extension is skipped) and walks down to
/// offset 1. Returns `None` when `mime` is absent or no extension precedes it.
pub fn extract_name(block: &str, mime: &str, ext: &str) -> Option<String> {
    let end = block.find(mime)?;
    let bytes = block.as_bytes();
    let ext = ext.as_bytes();
    if ext.is_empty() {
        return None;
    }

    let first = end.checked_sub(ext.len() + 1)?;
    (1..=first)
        .rev()
        .find(|&i| &bytes[i..i + ext.len()] == ext)
        .and_then(|i| block.get(i + ext.len()..end))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
