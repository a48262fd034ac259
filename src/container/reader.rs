//! Forward-only traversal of a compound document (OLE/CFB) container.
//!
//! `.msg` files are compound documents: a tree of storages and streams. The
//! extractor only needs the entries in traversal order together with their
//! raw bytes, which is what [`ContainerReader`] provides.

use std::collections::VecDeque;
use std::io::{Cursor, Read, Seek};
use std::path::PathBuf;

use cfb::CompoundFile;
use tracing::{debug, warn};

use crate::error::{ExtractError, Result};

/// Kind of directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Root,
    Storage,
    Stream,
}

/// One named entry of the container, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerEntry {
    /// Entry name (final path component).
    pub name: String,
    /// Declared length in bytes. Storages report 0.
    pub size: u64,
    /// Full path inside the container.
    pub path: PathBuf,
    /// Whether this is the root, a storage, or a stream.
    pub kind: EntryKind,
}

/// A single forward-only cursor over container entries.
pub trait ContainerReader {
    /// Advance to the next entry. `Ok(None)` marks the end of the container.
    fn next_entry(&mut self) -> Result<Option<ContainerEntry>>;

    /// Read the content of `entry`, at most `entry.size` bytes.
    ///
    /// A short result is not an error: callers keep whatever was read.
    fn read_entry(&mut self, entry: &ContainerEntry) -> Result<Vec<u8>>;
}

/// [`ContainerReader`] over a CFB file, backed by the `cfb` crate.
pub struct CfbReader<F> {
    file: CompoundFile<F>,
    pending: VecDeque<ContainerEntry>,
}

impl<'a> CfbReader<Cursor<&'a [u8]>> {
    /// Open a container held entirely in memory.
    pub fn from_bytes(data: &'a [u8]) -> Result<Self> {
        Self::open(Cursor::new(data))
    }
}

impl<F: Read + Seek> CfbReader<F> {
    /// Open a container and snapshot its directory in pre-order.
    pub fn open(inner: F) -> Result<Self> {
        let file = CompoundFile::open(inner)
            .map_err(|e| ExtractError::InvalidContainer(e.to_string()))?;

        let pending: VecDeque<ContainerEntry> = file
            .walk()
            .map(|entry| ContainerEntry {
                name: entry.name().to_string(),
                size: entry.len(),
                path: entry.path().to_path_buf(),
                kind: if entry.is_root() {
                    EntryKind::Root
                } else if entry.is_storage() {
                    EntryKind::Storage
                } else {
                    EntryKind::Stream
                },
            })
            .collect();

        debug!(entries = pending.len(), "Opened compound document");
        Ok(Self { file, pending })
    }
}

impl<F: Read + Seek> ContainerReader for CfbReader<F> {
    fn next_entry(&mut self) -> Result<Option<ContainerEntry>> {
        Ok(self.pending.pop_front())
    }

    fn read_entry(&mut self, entry: &ContainerEntry) -> Result<Vec<u8>> {
        if entry.kind != EntryKind::Stream {
            return Ok(Vec::new());
        }

        let stream = self.file.open_stream(&entry.path).map_err(|e| {
            ExtractError::InvalidContainer(format!("{}: {e}", entry.path.display()))
        })?;

        // The declared size comes from the directory and is not trusted for allocation.
        let mut buf = Vec::new();
        if let Err(e) = stream.take(entry.size).read_to_end(&mut buf) {
            warn!(
                path = %entry.path.display(),
                read = buf.len(),
                declared = entry.size,
                error = %e,
                "Short read from stream"
            );
        }
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn build_container() -> Vec<u8> {
        let mut comp = CompoundFile::create(Cursor::new(Vec::new())).unwrap();
        comp.create_storage("/__attach_version1.0_#00000000").unwrap();
        {
            let mut s = comp
                .create_stream("/__attach_version1.0_#00000000/__substg1.0_37010102")
                .unwrap();
            s.write_all(b"hello").unwrap();
        }
        comp.flush().unwrap();
        comp.into_inner().into_inner()
    }

    #[test]
    fn test_walks_root_first() {
        let data = build_container();
        let mut reader = CfbReader::from_bytes(&data).unwrap();
        let root = reader.next_entry().unwrap().unwrap();
        assert_eq!(root.kind, EntryKind::Root);

        let storage = reader.next_entry().unwrap().unwrap();
        assert_eq!(storage.name, "__attach_version1.0_#00000000");
        assert_eq!(storage.kind, EntryKind::Storage);
        assert!(reader.read_entry(&storage).unwrap().is_empty());

        let stream = reader.next_entry().unwrap().unwrap();
        assert_eq!(stream.name, "__substg1.0_37010102");
        assert_eq!(stream.size, 5);
        assert_eq!(reader.read_entry(&stream).unwrap(), b"hello");

        assert!(reader.next_entry().unwrap().is_none());
    }

    #[test]
    fn test_oversized_declared_length_is_not_preallocated() {
        let name = "__substg1.0_37010102";
        let payload = vec![0xABu8; 5000];
        let mut comp = CompoundFile::create(Cursor::new(Vec::new())).unwrap();
        {
            let mut s = comp.create_stream(format!("/{name}")).unwrap();
            s.write_all(&payload).unwrap();
        }
        comp.flush().unwrap();
        let mut data = comp.into_inner().into_inner();

        // Rewrite the stream size in the directory entry (name at offset 0, size at 120).
        let utf16: Vec<u8> = name.encode_utf16().flat_map(u16::to_le_bytes).collect();
        let at = data
            .windows(utf16.len())
            .position(|w| w == utf16.as_slice())
            .unwrap();
        data[at + 120..at + 128].copy_from_slice(&(1u64 << 40).to_le_bytes());

        let mut reader = CfbReader::from_bytes(&data).unwrap();
        let stream = std::iter::from_fn(|| reader.next_entry().unwrap())
            .find(|e| e.name == name)
            .unwrap();
        assert_eq!(stream.size, 1 << 40);

        match reader.read_entry(&stream) {
            Ok(buf) => {
                // Whatever comes back is bounded by the real sector chain.
                assert!(buf.len() <= data.len());
                let n = buf.len().min(payload.len());
                assert_eq!(&buf[..n], &payload[..n]);
            }
            Err(e) => assert!(matches!(e, ExtractError::InvalidContainer(_))),
        }
    }

    #[test]
    fn test_rejects_non_container() {
        let result = CfbReader::from_bytes(b"definitely not a compound file");
        assert!(matches!(result, Err(ExtractError::InvalidContainer(_))));
    }
}
