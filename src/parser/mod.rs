//! Byte-level helpers for attachment buffers: spread encoding and tail blocks.

pub mod spread;
pub mod tail;
