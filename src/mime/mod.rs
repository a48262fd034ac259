//! MIME type registry used to recognise attachment metadata.

pub mod registry;

pub use registry::{MimeEntry, MimeRegistry};
