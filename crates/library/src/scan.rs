//! Walking a library directory and identifying everything in it.

use exn::ResultExt;
use nxlib_titledb::TitleDb;
use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::filename;
use crate::identify::{FileDescriptor, identify_file};

enum WalkEntry {
    File(PathBuf),
    Descend(PathBuf),
    Skip,
}

/// The result of scanning a library directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scan {
    /// Files that were identified, in path order.
    pub identified: Vec<FileDescriptor>,
    /// Files with an allowed extension that could not be identified.
    pub skipped: Vec<PathBuf>,
}

/// Scans a library directory: every file with an allowed extension is
/// identified against titledb.
///
/// Only a root directory that can't be read is an error. Files that can't be
/// identified end up in [`Scan::skipped`].
#[instrument(skip(db, root, extensions), fields(root = %root.as_ref().display()))]
pub fn scan(db: &TitleDb, root: impl AsRef<Path>, extensions: &[impl AsRef<str>]) -> Result<Scan> {
    let mut result = Scan::default();
    for path in walk(root, extensions)? {
        match identify_file(db, &path) {
            Some(descriptor) => result.identified.push(descriptor),
            None => result.skipped.push(path),
        }
    }
    tracing::info!(
        identified = result.identified.len(),
        skipped = result.skipped.len(),
        "Library scan complete"
    );
    Ok(result)
}

/// Recursively lists every file under `root` whose extension (final
/// dot-delimited segment, case-sensitive) is in the allow-list.
///
/// Results are sorted by path. Subdirectories that can't be read are logged
/// and skipped.
#[instrument(level = "debug", skip(root, extensions), fields(root = %root.as_ref().display()))]
pub fn walk(root: impl AsRef<Path>, extensions: &[impl AsRef<str>]) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(current) = stack.pop() {
        let entries = match fs::read_dir(&current) {
            Ok(entries) => entries,
            Err(err) if current == root => {
                return Err(err).or_raise(|| ErrorKind::ReadDir(current));
            },
            Err(err) => {
                tracing::warn!(path = %current.display(), error = %err, "Skipping unreadable directory");
                continue;
            },
        };
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(path = %current.display(), error = %err, "Skipping unreadable directory entry");
                    continue;
                },
            };
            match process_entry(&entry, extensions) {
                WalkEntry::File(path) => files.push(path),
                WalkEntry::Descend(path) => stack.push(path),
                WalkEntry::Skip => {},
            }
        }
    }
    files.sort();
    tracing::debug!(files = files.len(), "Walk complete");
    Ok(files)
}

fn process_entry(entry: &DirEntry, extensions: &[impl AsRef<str>]) -> WalkEntry {
    let path = entry.path();
    let Ok(file_type) = entry.file_type() else {
        return WalkEntry::Skip;
    };
    if file_type.is_dir() {
        return WalkEntry::Descend(path);
    }
    // Symlinks are never followed.
    if !file_type.is_file() {
        return WalkEntry::Skip;
    }
    let allowed = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(filename::extension)
        .is_some_and(|extension| extensions.iter().any(|allowed| allowed.as_ref() == extension));
    if allowed { WalkEntry::File(path) } else { WalkEntry::Skip }
}
