use exn::{OptionExt, ResultExt};
use nxlib_titledb::models::{AppId, ContentType, TitleId};
use nxlib_titledb::{Resolution, TitleDb};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::filename;

/// Everything known about a single dump file after identification.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct FileDescriptor {
    /// Path as given to [`identify_file`].
    pub path: PathBuf,
    /// Parent directory of `path` (empty for bare filenames).
    pub directory: PathBuf,
    pub filename: String,
    /// The title this file belongs to.
    pub title_id: TitleId,
    /// The application ID found in the filename.
    pub app_id: AppId,
    pub content_type: ContentType,
    /// Raw version from the filename (`[v65536]`), if any.
    pub version: Option<u64>,
    /// Final dot-delimited segment of the filename.
    pub extension: String,
    /// Size in bytes, read when the file was identified.
    pub size: u64,
}

/// Identifies a single file, or returns `None` if it can't be identified.
///
/// Failures are logged as warnings (with the filename and the application ID,
/// when there is one) and never propagate: one bad file must not stop a scan.
/// Use [`try_identify_file`] to find out why a file was skipped.
pub fn identify_file(db: &TitleDb, path: impl AsRef<Path>) -> Option<FileDescriptor> {
    let path = path.as_ref();
    match try_identify_file(db, path) {
        Ok(descriptor) => Some(descriptor),
        Err(error) => {
            let name = path.file_name().map(|name| name.to_string_lossy());
            let app_id = name.as_deref().and_then(filename::app_id);
            tracing::warn!(
                filename = name.as_deref().unwrap_or_default(),
                app_id = app_id.as_ref().map(AppId::as_str).unwrap_or("none"),
                error = ?error,
                "Unable to identify file"
            );
            None
        },
    }
}

/// Identifies a single file: parses its filename, resolves the application ID
/// against titledb, and reads its size.
///
/// # Errors
///
/// - [`InvalidPath`](ErrorKind::InvalidPath) if the path has no UTF-8 filename,
/// - [`MissingAppId`](ErrorKind::MissingAppId) if the filename contains no
///   bracketed application ID,
/// - [`Unresolved`](ErrorKind::Unresolved) if titledb resolution failed (the
///   titledb error is kept in the error tree),
/// - [`Metadata`](ErrorKind::Metadata) if the file size could not be read.
#[instrument(level = "debug", skip(db, path), fields(path = %path.as_ref().display()))]
pub fn try_identify_file(db: &TitleDb, path: impl AsRef<Path>) -> Result<FileDescriptor> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_raise(|| ErrorKind::InvalidPath(path.to_path_buf()))?;
    let app_id = filename::app_id(name).ok_or_raise(|| ErrorKind::MissingAppId(name.to_string()))?;
    let Resolution { title_id, content_type } = db.resolve(&app_id).or_raise(|| ErrorKind::Unresolved {
        filename: name.to_string(),
        app_id: app_id.clone(),
    })?;
    let size = fs::metadata(path).or_raise(|| ErrorKind::Metadata(path.to_path_buf()))?.len();
    tracing::trace!(%title_id, %app_id, %content_type, "Identified file");
    Ok(FileDescriptor {
        path: path.to_path_buf(),
        directory: path.parent().map(Path::to_path_buf).unwrap_or_default(),
        filename: name.to_string(),
        version: filename::version(name),
        extension: filename::extension(name).to_string(),
        title_id,
        app_id,
        content_type,
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CNMTS: &str = r#"{
        "0100abc000000000": {"0": {"titleType": 128}},
        "0100abc000000800": {"65536": {"titleType": 129, "otherApplicationId": "0100abc000000000"}},
        "0100abc000001001": {"0": {"titleType": 130}},
        "0100bad000000000": {},
        "0100bad000000800": {"0": {"titleType": 42}}
    }"#;

    fn db() -> TitleDb {
        TitleDb::from_json(CNMTS, "{}", "{}").unwrap()
    }

    fn touch(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_identify_patch() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = touch(temp_dir.path(), "Game [0100ABC000000800][v65536].nsp", b"0123456789");
        let descriptor = identify_file(&db(), &path).unwrap();
        assert_eq!(
            descriptor,
            FileDescriptor {
                path: path.clone(),
                directory: temp_dir.path().to_path_buf(),
                filename: "Game [0100ABC000000800][v65536].nsp".to_string(),
                title_id: "0100ABC000000000".parse().unwrap(),
                app_id: "0100ABC000000800".parse().unwrap(),
                content_type: ContentType::Patch,
                version: Some(65536),
                extension: "nsp".to_string(),
                size: 10,
            }
        );
    }

    #[test]
    fn test_identify_without_version() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = touch(temp_dir.path(), "Game DLC [0100abc000001001].nsz", b"");
        let descriptor = identify_file(&db(), &path).unwrap();
        assert_eq!(descriptor.title_id.as_str(), "0100ABC000000000");
        assert_eq!(descriptor.content_type, ContentType::Dlc);
        assert_eq!(descriptor.version, None);
        assert_eq!(descriptor.extension, "nsz");
        assert_eq!(descriptor.size, 0);
    }

    #[test]
    fn test_identify_unknown_app_id_uses_heuristics() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = touch(temp_dir.path(), "New Game [0100FED000000800][v0].xci", b"x");
        let descriptor = identify_file(&db(), &path).unwrap();
        assert_eq!(descriptor.title_id.as_str(), "0100FED000000000");
        assert_eq!(descriptor.content_type, ContentType::Base);
    }

    #[test]
    fn test_missing_app_id_is_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = touch(temp_dir.path(), "Game.nsp", b"x");
        assert_eq!(identify_file(&db(), &path), None);
        let err = try_identify_file(&db(), &path).unwrap_err();
        assert_eq!(*err, ErrorKind::MissingAppId("Game.nsp".to_string()));
    }

    #[test]
    fn test_empty_records_is_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = touch(temp_dir.path(), "Bad [0100BAD000000000].nsp", b"x");
        assert_eq!(identify_file(&db(), &path), None);
        let err = try_identify_file(&db(), &path).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Unresolved { app_id, .. } if app_id.as_str() == "0100BAD000000000"));
    }

    #[test]
    fn test_unknown_title_type_is_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = touch(temp_dir.path(), "Bad [0100BAD000000800].nsp", b"x");
        assert_eq!(identify_file(&db(), &path), None);
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("Gone [0100ABC000000000].nsp");
        let err = try_identify_file(&db(), &path).unwrap_err();
        assert_eq!(*err, ErrorKind::Metadata(path.clone()));
        assert_eq!(identify_file(&db(), &path), None);
    }

    #[test]
    fn test_path_without_filename() {
        let err = try_identify_file(&db(), "/").unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidPath(PathBuf::from("/")));
    }
}
