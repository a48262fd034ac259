//! Attachment extraction pipeline.
//!
//! 1. Walk the container and concatenate each attachment group ([`aggregate`]).
//! 2. Resolve filename and MIME type of every group in parallel ([`resolve`]).
//! 3. Payload offsets are computed later, per attachment, by [`locate`].
//!
//! The walk is sequential because the container is a single forward cursor.
//! Resolution only starts once every group is complete and the pipeline
//! returns only after every resolution has finished.

pub mod aggregate;
pub mod locate;
pub mod resolve;

use std::path::Path;

use tracing::info;

use crate::container::reader::{CfbReader, ContainerReader};
use crate::error::{ExtractError, Result};
use crate::mime::registry::MimeRegistry;
use crate::model::attachment::Attachment;

/// Tuning for an extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Resolver threads; 0 uses rayon's global pool.
    pub resolve_threads: usize,
}

/// Extract and resolve all attachments from the bytes of a `.msg` file.
pub fn extract(data: &[u8], options: &ExtractOptions) -> Result<Vec<Attachment>> {
    let mut reader = CfbReader::from_bytes(data)?;
    extract_from(&mut reader, MimeRegistry::standard(), options)
}

/// Read a `.msg` file from disk and extract its attachments.
pub fn extract_file(path: &Path, options: &ExtractOptions) -> Result<Vec<Attachment>> {
    let data = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ExtractError::FileNotFound(path.to_path_buf())
        } else {
            ExtractError::io(path, e)
        }
    })?;
    info!(path = %path.display(), size = data.len(), "Read input file");
    extract(&data, options)
}

/// Run the pipeline over any container reader and registry.
pub fn extract_from<R: ContainerReader + ?Sized>(
    reader: &mut R,
    registry: &MimeRegistry,
    options: &ExtractOptions,
) -> Result<Vec<Attachment>> {
    let mut attachments = aggregate::aggregate(reader)?;
    resolve::resolve_all(&mut attachments, registry, options.resolve_threads)?;

    let resolved = attachments.iter().filter(|a| a.is_resolved()).count();
    info!(
        found = attachments.len(),
        resolved,
        "Extraction finished"
    );
    Ok(attachments)
}
