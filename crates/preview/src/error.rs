//! Preview Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A preview error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for preview operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Opening or reading the package archive failed.
    #[display("failed to read theme package")]
    Package,
    /// The theme has no usable preview image entry.
    #[display("no preview available for {_0}")]
    NoPreview(#[error(not(source))] String),
    /// The preview entry exists but is not a decodable image.
    #[display("failed to decode preview: {_0}")]
    Decode(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The archive either has a decodable preview or it doesn't.
        false
    }
}
