//! Centralized error types for msgextract.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which spread-encoded marker could not be located in an attachment buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// The MIME type marker that trails the attachment streams.
    Mime,
    /// The file extension marker that terminates the payload.
    Extension,
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mime => f.write_str("MIME type"),
            Self::Extension => f.write_str("extension"),
        }
    }
}

/// All errors produced by the msgextract library.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// I/O error with the associated file path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified file does not exist.
    #[error("Input file not found: {0}")]
    FileNotFound(PathBuf),

    /// The input cannot be read as a compound document.
    #[error("Cannot parse container: {0}")]
    InvalidContainer(String),

    /// The attachment has no resolved filename and cannot be saved.
    #[error("Attachment does not have a filename, cannot save")]
    MissingFileName,

    /// A spread-encoded marker needed for offset computation is missing.
    #[error("{marker} marker not found at end of data for '{file_name}'")]
    MarkerNotFound {
        marker: MarkerKind,
        file_name: String,
    },

    /// The computed payload bounds do not describe a valid slice.
    #[error("Payload range {start}..{end} is invalid for a buffer of {len} bytes")]
    PayloadOutOfRange { start: usize, end: usize, len: usize },

    /// Every `N_<name>` candidate up to the configured limit already exists.
    #[error("No free name for '{file_name}' after {limit} attempts")]
    NameProbesExhausted { file_name: String, limit: usize },

    /// The worker pool used for name resolution could not be created.
    #[error("Cannot start resolver pool: {0}")]
    ResolvePool(String),
}

/// Convenience alias for `Result<T, ExtractError>`.
pub type Result<T> = std::result::Result<T, ExtractError>;

impl ExtractError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Allow `?` on `std::io::Error` when no path context is available
/// (rare, prefer `ExtractError::io`).
impl From<std::io::Error> for ExtractError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_not_found_message() {
        let err = ExtractError::MarkerNotFound {
            marker: MarkerKind::Mime,
            file_name: "report.pdf".into(),
        };
        assert_eq!(
            err.to_string(),
            "MIME type marker not found at end of data for 'report.pdf'"
        );
    }

    #[test]
    fn test_io_keeps_path() {
        let err = ExtractError::io(
            "/tmp/out/a.pdf",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/out/a.pdf"));
    }
}
