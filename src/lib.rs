//! `msgextract` — recover attachments from Outlook `.msg` files.
//!
//! The `.msg` format is a compound document. This crate walks its entries,
//! concatenates the streams of each attachment, and recovers the filename,
//! MIME type, and payload bounds from byte patterns instead of the property
//! schema.

pub mod config;
pub mod container;
pub mod error;
pub mod export;
pub mod extract;
pub mod mime;
pub mod model;
pub mod parser;

pub use error::{ExtractError, Result};
pub use extract::{extract, extract_file, ExtractOptions};
pub use model::attachment::Attachment;
