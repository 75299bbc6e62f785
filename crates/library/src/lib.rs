//! Identifying the dumps in a game library.
//!
//! Filenames carry the application ID (`[0100ABC000000800]`) and, for updates,
//! the raw version (`[v65536]`). Everything else comes from titledb.

mod consts;
pub mod error;
pub mod filename;
mod identify;
mod scan;
mod summary;

pub use crate::consts::DEFAULT_EXTENSIONS;
pub use crate::identify::{FileDescriptor, identify_file, try_identify_file};
pub use crate::scan::{Scan, scan, walk};
pub use crate::summary::{TitleSummary, summarize};
