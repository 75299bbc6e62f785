//! Library Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. Titledb errors are kept as children in the tree.

use derive_more::{Display, Error};
use nxlib_titledb::models::AppId;
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The path has no (UTF-8) filename component.
    #[display("not a file path: {}", _0.display())]
    InvalidPath(#[error(not(source))] PathBuf),
    /// The filename does not contain a bracketed application ID.
    #[display("no application ID in filename: {_0}")]
    MissingAppId(#[error(not(source))] String),
    /// Titledb could not resolve the application ID to a title.
    #[display("unable to identify {filename} (application ID {app_id})")]
    Unresolved {
        filename: String,
        app_id: AppId,
    },
    /// File metadata (size) could not be read.
    #[display("unable to read file metadata: {}", _0.display())]
    Metadata(#[error(not(source))] PathBuf),
    /// The library directory could not be listed.
    #[display("unable to read directory: {}", _0.display())]
    ReadDir(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Metadata(_) | Self::ReadDir(_))
    }
}
