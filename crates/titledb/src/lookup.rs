//! Display metadata and version history lookups.

use exn::OptionExt;
use tracing::instrument;

use crate::TitleDb;
use crate::error::{ErrorKind, Result};
use crate::models::{GameInfo, VersionRelease};

impl TitleDb {
    /// Finds the display metadata for a title.
    ///
    /// The match on `id` is exact and case-sensitive; titledb stores title IDs
    /// upper-cased, which is what [`TitleId`](crate::models::TitleId) always
    /// gives you. If several records share the ID, the first one in document
    /// order wins.
    #[instrument(level = "trace", skip(self, title_id), fields(title_id = title_id.as_ref()))]
    pub fn game_info(&self, title_id: impl AsRef<str>) -> Option<GameInfo> {
        let title_id = title_id.as_ref();
        let found = self
            .titles
            .values()
            .find(|record| record.id.as_deref() == Some(title_id))
            .map(|record| GameInfo::from_record(title_id, record));
        if found.is_none() {
            tracing::warn!(title_id, "Title ID not found in titledb");
        }
        found
    }

    /// Lists every known release of a title, in document order (which is not
    /// guaranteed to be sorted).
    #[instrument(level = "trace", skip(self, title_id), fields(title_id = title_id.as_ref()))]
    pub fn versions(&self, title_id: impl AsRef<str>) -> Option<Vec<VersionRelease>> {
        let key = title_id.as_ref().to_ascii_lowercase();
        let Some(history) = self.versions.get(&key) else {
            tracing::warn!(title_id = %key.to_ascii_uppercase(), "Title ID not found in versions.json");
            return None;
        };
        let releases = history
            .iter()
            .filter_map(|(version, release_date)| match version.trim().parse::<u64>() {
                Ok(version) => Some(VersionRelease::new(version, release_date)),
                Err(_) => {
                    tracing::warn!(title_id = %key, version = %version, "Skipping non-numeric version in versions.json");
                    None
                },
            })
            .collect();
        Some(releases)
    }
}

/// The highest raw version number in a release history.
///
/// # Errors
///
/// Returns [`EmptyVersionList`](ErrorKind::EmptyVersionList) for an empty
/// history; check before asking.
pub fn latest_version(releases: &[VersionRelease]) -> Result<u64> {
    releases
        .iter()
        .map(|release| release.version)
        .max()
        .ok_or_raise(|| ErrorKind::EmptyVersionList)
}
