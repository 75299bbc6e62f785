//! Titledb Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction, same as every other crate in the workspace.

use crate::models::AppId;
use derive_more::{Display, Error};
use std::path::PathBuf;

/// A titledb error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for titledb operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A reference document could not be opened. Usually means the titledb
    /// mirror hasn't been synchronized yet.
    #[display("reference document not readable: {}", _0.display())]
    DocumentUnreadable(#[error(not(source))] PathBuf),
    /// A reference document is not the JSON shape we expect.
    #[display("malformed reference document: {_0}")]
    MalformedDocument(#[error(not(source))] &'static str),
    /// The string is not 16 hexadecimal characters.
    #[display("invalid application ID: {_0}")]
    InvalidAppId(#[error(not(source))] String),
    /// The string is not one of `base`, `patch` or `dlc`.
    #[display("invalid content type: {_0}")]
    InvalidContentType(#[error(not(source))] String),
    /// The application ID is known, but has no content metadata records.
    #[display("no content metadata records for application ID {_0}")]
    NoRecords(#[error(not(source))] AppId),
    /// The latest content metadata record has no integer `titleType`.
    #[display("no title type recorded for application ID {_0}")]
    MissingTitleType(#[error(not(source))] AppId),
    /// The latest content metadata record has a title type that is neither
    /// base (128), patch (129) nor DLC (130).
    #[display("unknown title type {title_type} for application ID {app_id}")]
    UnknownTitleType {
        /// The application being resolved.
        app_id: AppId,
        /// The unrecognised `titleType` value.
        title_type: u32,
    },
    /// A patch or DLC record names a parent that is not a valid title ID, or
    /// has no explicit parent and no application ID in the database shares its
    /// title block prefix.
    #[display("no parent title found for application ID {_0}")]
    UnresolvableParent(#[error(not(source))] AppId),
    /// Asked for the latest version of an empty version history.
    #[display("version history is empty")]
    EmptyVersionList,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The only thing that might change between attempts is the mirror on
        // disk (someone runs a sync in the meantime).
        matches!(self, Self::DocumentUnreadable(_))
    }
}
