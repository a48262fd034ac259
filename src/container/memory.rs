//! In-memory container used to feed scripted entry sequences to the extractor.

use std::path::PathBuf;

use super::reader::{ContainerEntry, ContainerReader, EntryKind};
use crate::error::Result;

/// A scripted sequence of entries.
///
/// Each entry declares a size that may exceed the bytes it actually holds,
/// which makes a read come back short.
#[derive(Debug, Default)]
pub struct MemoryContainer {
    entries: Vec<(ContainerEntry, Vec<u8>)>,
    cursor: usize,
    reads: usize,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a storage-like entry with no content.
    pub fn storage(mut self, name: &str) -> Self {
        self.push(name, EntryKind::Storage, 0, Vec::new());
        self
    }

    /// Append a stream whose declared size matches its content.
    pub fn stream(mut self, name: &str, data: &[u8]) -> Self {
        self.push(name, EntryKind::Stream, data.len() as u64, data.to_vec());
        self
    }

    /// Append a stream that declares `size` bytes but only holds `data`.
    pub fn truncated_stream(mut self, name: &str, size: u64, data: &[u8]) -> Self {
        self.push(name, EntryKind::Stream, size, data.to_vec());
        self
    }

    /// How many times `read_entry` was called.
    pub fn reads(&self) -> usize {
        self.reads
    }

    fn push(&mut self, name: &str, kind: EntryKind, size: u64, data: Vec<u8>) {
        let entry = ContainerEntry {
            name: name.to_string(),
            size,
            path: PathBuf::from("/").join(name),
            kind,
        };
        self.entries.push((entry, data));
    }
}

impl ContainerReader for MemoryContainer {
    fn next_entry(&mut self) -> Result<Option<ContainerEntry>> {
        let Some((entry, _)) = self.entries.get(self.cursor) else {
            return Ok(None);
        };
        self.cursor += 1;
        Ok(Some(entry.clone()))
    }

    fn read_entry(&mut self, entry: &ContainerEntry) -> Result<Vec<u8>> {
        self.reads += 1;
        // Only the entry under the cursor can be read.
        let data = self
            .cursor
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .filter(|(current, _)| current.path == entry.path)
            .map(|(_, data)| data.as_slice())
            .unwrap_or_default();
        let limit = usize::try_from(entry.size).unwrap_or(usize::MAX).min(data.len());
        Ok(data[..limit].to_vec())
    }
}
