//! Compound document access: entry traversal and raw stream reads.

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod reader;

#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryContainer;
pub use reader::{CfbReader, ContainerEntry, ContainerReader, EntryKind};
