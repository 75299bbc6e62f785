//! Loading the three titledb reference documents.

use exn::ResultExt;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::models::{ApplicationRecord, TitleRecord};

/// Content metadata: application ID -> secondary key -> record.
pub type CnmtDocument = IndexMap<String, IndexMap<String, ApplicationRecord>>;
/// Localized titles: arbitrary key -> title record.
pub type TitleDocument = IndexMap<String, TitleRecord>;
/// Version history: title ID -> raw version number -> release date.
pub type VersionDocument = IndexMap<String, IndexMap<String, String>>;

pub const CNMTS_FILENAME: &str = "cnmts.json";
pub const VERSIONS_FILENAME: &str = "versions.json";

/// Filename of the localized title document for a region/language pair.
///
/// ```
/// assert_eq!(nxlib_titledb::titles_filename("US", "en"), "US.en.json");
/// ```
pub fn titles_filename(region: &str, language: &str) -> String {
    format!("{region}.{language}.json")
}

/// The in-memory reference database.
///
/// Loaded once, then passed by reference into every resolution and lookup.
/// Document key order is preserved: several lookups are "first match wins" or
/// "last record wins" and depend on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleDb {
    pub(crate) cnmts: CnmtDocument,
    pub(crate) titles: TitleDocument,
    pub(crate) versions: VersionDocument,
}

impl TitleDb {
    pub fn new(cnmts: CnmtDocument, titles: TitleDocument, versions: VersionDocument) -> Self {
        Self { cnmts, titles, versions }
    }

    /// Loads `cnmts.json`, `{region}.{language}.json` and `versions.json` from
    /// a titledb mirror directory.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn load(dir: impl AsRef<Path>, region: &str, language: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let db = Self {
            cnmts: read_document(&dir.join(CNMTS_FILENAME), "cnmts")?,
            titles: read_document(&dir.join(titles_filename(region, language)), "titles")?,
            versions: read_document(&dir.join(VERSIONS_FILENAME), "versions")?,
        };
        tracing::info!(
            applications = db.cnmts.len(),
            titles = db.titles.len(),
            versions = db.versions.len(),
            "Loaded titledb"
        );
        Ok(db)
    }

    /// Loads the database from any three readers of JSON.
    pub fn from_readers(cnmts: impl Read, titles: impl Read, versions: impl Read) -> Result<Self> {
        Ok(Self {
            cnmts: parse_document(cnmts, "cnmts")?,
            titles: parse_document(titles, "titles")?,
            versions: parse_document(versions, "versions")?,
        })
    }

    /// Loads the database from three JSON strings.
    pub fn from_json(cnmts: &str, titles: &str, versions: &str) -> Result<Self> {
        Self::from_readers(cnmts.as_bytes(), titles.as_bytes(), versions.as_bytes())
    }

    /// Number of application IDs with content metadata.
    pub fn application_count(&self) -> usize {
        self.cnmts.len()
    }

    /// Number of localized title records.
    pub fn title_count(&self) -> usize {
        self.titles.len()
    }

    /// Number of titles with a known version history.
    pub fn version_history_count(&self) -> usize {
        self.versions.len()
    }
}

fn read_document<D: DeserializeOwned>(path: &Path, label: &'static str) -> Result<D> {
    let file = File::open(path).or_raise(|| ErrorKind::DocumentUnreadable(path.to_path_buf()))?;
    parse_document(BufReader::new(file), label)
}

fn parse_document<D: DeserializeOwned>(reader: impl Read, label: &'static str) -> Result<D> {
    serde_json::from_reader(reader).or_raise(|| ErrorKind::MalformedDocument(label))
}
