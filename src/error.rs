//! CLI Error Types

use derive_more::{Display, Error};

/// A CLI error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for CLI commands.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("unable to load configuration")]
    Config,
    #[display("unable to load titledb (try `nxlib update` first)")]
    TitleDb,
    #[display("no library path given on the command-line or in the configuration")]
    NoLibraryPath,
    #[display("library scan failed")]
    Scan,
    #[display("invalid title ID: {_0}")]
    InvalidTitleId(#[error(not(source))] String),
    #[display("unable to synchronize titledb")]
    Sync,
    #[display("unable to write output")]
    Output,
}
