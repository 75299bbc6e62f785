//! Sync Error Types

use derive_more::{Display, Error};

/// A sync error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("git not detected on your system")]
    GitNotFound,
    /// Git could not be started at all.
    #[display("unable to run git for step: {_0}")]
    Spawn(#[error(not(source))] &'static str),
    /// Git exited with a non-zero exit code. Killed by a signal is `-1`.
    #[display("git {step} exited with code: {code}")]
    GitFailed { step: &'static str, code: i32 },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Clone, fetch and pull all talk to the network.
        matches!(self, Self::GitFailed { step: "fetch" | "pull" | "clone", .. })
    }
}
