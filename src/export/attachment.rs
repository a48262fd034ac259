//! Write recovered attachments to disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ExtractError, Result};
use crate::extract::locate::payload_range;
use crate::model::attachment::Attachment;

/// Default bound of the `N_<name>` probe loop.
pub const DEFAULT_MAX_NAME_PROBES: usize = 1000;

/// Options for [`save_all`].
#[derive(Debug, Clone)]
pub struct SaveOptions {
    /// How many `N_<name>` candidates to try before giving up.
    pub max_name_probes: usize,
    /// Log failed saves and continue instead of stopping at the first one.
    pub keep_going: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            max_name_probes: DEFAULT_MAX_NAME_PROBES,
            keep_going: false,
        }
    }
}

/// Save one resolved attachment into `output_dir`.
///
/// A free `<name>` receives the payload `[start, end)`. When `<name>` is
/// taken, the first free `1_<name>`, `2_<name>`, ... receives everything from
/// `start` to the end of the buffer, trailing metadata included.
///
/// Offsets are computed before the directory is probed, so a marker error
/// never leaves a file behind.
pub fn save_attachment(
    attachment: &Attachment,
    output_dir: &Path,
    max_name_probes: usize,
) -> Result<PathBuf> {
    let file_name = attachment.file_name().ok_or(ExtractError::MissingFileName)?;
    let range = payload_range(attachment)?;
    let raw = attachment.raw();
    let safe_name = safe_file_name(file_name);

    let path = output_dir.join(&safe_name);
    if !path.exists() {
        write(&path, &raw[range.start..range.end])?;
        return Ok(path);
    }

    for i in 1..=max_name_probes {
        let candidate = output_dir.join(format!("{i}_{safe_name}"));
        if candidate.exists() {
            debug!(path = %candidate.display(), "Name taken");
            continue;
        }
        write(&candidate, &raw[range.start..])?;
        return Ok(candidate);
    }

    Err(ExtractError::NameProbesExhausted {
        file_name: safe_name,
        limit: max_name_probes,
    })
}

/// Save every resolved attachment, in order, into `output_dir`.
///
/// Unresolved attachments are skipped. The first failure stops the loop
/// unless `options.keep_going` is set. `on_saved` is called with each path
/// written.
pub fn save_all(
    attachments: &[Attachment],
    output_dir: &Path,
    options: &SaveOptions,
    on_saved: &dyn Fn(&Path),
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for (index, attachment) in attachments.iter().enumerate() {
        if !attachment.is_resolved() {
            info!(index, "Skipping attachment without a recovered name");
            continue;
        }

        match save_attachment(attachment, output_dir, options.max_name_probes) {
            Ok(path) => {
                on_saved(&path);
                paths.push(path);
            }
            Err(e) if options.keep_going => {
                warn!(
                    index,
                    file_name = attachment.file_name().unwrap_or_default(),
                    error = %e,
                    "Failed to save attachment"
                );
            }
            Err(e) => return Err(e),
        }
    }

    Ok(paths)
}

/// Output name for a recovered filename: path separators become `_` and the
/// special names `.` and `..` are replaced, so the file stays in the output
/// directory.
pub fn safe_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

fn write(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data).map_err(|e| ExtractError::io(path, e))?;
    info!(path = %path.display(), bytes = data.len(), "Saved attachment");
    Ok(())
}
