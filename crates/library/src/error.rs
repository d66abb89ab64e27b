//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::io::Error as IoError;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Opening or reading the package archive failed.
    #[display("failed to read theme package")]
    Package,
    /// The archive was readable but its metadata was not extractable.
    #[display("failed to extract package metadata")]
    Extract,
    /// A catalog read or write failed.
    #[display("catalog operation failed")]
    Catalog,
    /// The record should exist after an upsert but doesn't.
    #[display("catalog record missing after ingest")]
    MissingRecord,
    /// Staging extracted assets failed.
    #[display("asset staging failed")]
    Stage,
    /// Underlying filesystem error.
    #[display("I/O error: {_0}")]
    Io(IoError),
    /// A blocking worker task was cancelled or panicked.
    #[display("background task failed")]
    Task,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Catalog | Self::Io(_) | Self::Task)
    }
}
