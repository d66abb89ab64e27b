//! Package Access Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::PathBuf;

/// A package access error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for package operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Package file does not exist
    #[display("package not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Path has no usable file name component
    #[display("invalid package path: {}", _0.display())]
    InvalidPath(#[error(not(source))] PathBuf),
    /// The file exists but is not a readable zip archive
    #[display("invalid archive: {_0}")]
    InvalidArchive(#[error(not(source))] String),
    /// A specific entry was requested but is not in the archive
    #[display("missing archive entry: {_0}")]
    MissingEntry(#[error(not(source))] String),
    /// Underlying I/O error
    #[display("I/O error: {_0}")]
    Io(IoError),
}

impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
