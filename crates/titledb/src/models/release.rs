use time::Date;
use time::macros::format_description;

/// Release versions are packed: the displayed version sits above the low 16
/// bits.
const HUMAN_VERSION_DIVISOR: u64 = 65536;

/// A single known release of a title, from `versions.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct VersionRelease {
    /// Raw version number, as it appears in filenames (`[v65536]`).
    pub version: u64,
    /// Version as shown to users (`v65536` is update 1).
    pub human_version: u64,
    /// Release date, verbatim from titledb.
    pub release_date: String,
}
impl VersionRelease {
    pub fn new(version: u64, release_date: impl Into<String>) -> Self {
        Self {
            version,
            human_version: human_version(version),
            release_date: release_date.into(),
        }
    }

    /// Parses the release date, if titledb gave us a `YYYY-MM-DD` date.
    pub fn date(&self) -> Option<Date> {
        Date::parse(self.release_date.trim(), format_description!("[year]-[month]-[day]")).ok()
    }
}

/// Converts a raw version number into the version shown to users.
///
/// ```
/// use nxlib_titledb::models::human_version;
/// assert_eq!(human_version(0), 0);
/// assert_eq!(human_version(65536), 1);
/// assert_eq!(human_version(131071), 1);
/// ```
pub fn human_version(version: u64) -> u64 {
    version / HUMAN_VERSION_DIVISOR
}
