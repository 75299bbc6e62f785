//! The titledb reference database.
//!
//! [titledb](https://github.com/blawar/titledb) is a community-maintained set
//! of JSON documents describing every Switch title. This crate loads three of
//! them into a [`TitleDb`] and answers questions about application IDs:
//!
//! - **Resolution**: which title does an application ID belong to, and is it
//!   the base game, a patch or DLC? ([`TitleDb::resolve`])
//! - **Metadata**: what is the title called, and where is its artwork?
//!   ([`TitleDb::game_info`])
//! - **Version history**: which updates exist for a title?
//!   ([`TitleDb::versions`], [`latest_version`])
//!
//! The database is never written to. Keeping the mirror up to date is the job
//! of `nxlib-sync`.

mod db;
pub mod error;
mod lookup;
pub mod models;
mod resolve;

pub use crate::db::{
    CNMTS_FILENAME, CnmtDocument, TitleDb, TitleDocument, VERSIONS_FILENAME, VersionDocument, titles_filename,
};
pub use crate::lookup::latest_version;
pub use crate::resolve::Resolution;
