//! Grouping identified files by title, enriched with titledb metadata.

use indexmap::IndexMap;
use nxlib_titledb::models::{ContentType, GameInfo, TitleId};
use nxlib_titledb::{TitleDb, latest_version};
use tracing::instrument;

use crate::identify::FileDescriptor;

/// Everything owned for one title.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct TitleSummary {
    pub title_id: TitleId,
    /// Display metadata, when the title is in the localized title document.
    pub info: Option<GameInfo>,
    pub base: Vec<FileDescriptor>,
    pub patches: Vec<FileDescriptor>,
    pub dlc: Vec<FileDescriptor>,
    /// Latest release known to titledb, if it has a version history for
    /// this title.
    pub latest_version: Option<u64>,
}
impl TitleSummary {
    fn new(title_id: TitleId) -> Self {
        Self {
            title_id,
            info: None,
            base: Vec::new(),
            patches: Vec::new(),
            dlc: Vec::new(),
            latest_version: None,
        }
    }

    fn push(&mut self, descriptor: FileDescriptor) {
        match descriptor.content_type {
            ContentType::Base => self.base.push(descriptor),
            ContentType::Patch => self.patches.push(descriptor),
            ContentType::Dlc => self.dlc.push(descriptor),
        }
    }

    /// Title name, falling back to the title ID.
    pub fn name(&self) -> &str {
        self.info.as_ref().map(GameInfo::display_name).unwrap_or(self.title_id.as_str())
    }

    /// Highest version owned across the base game and its patches.
    pub fn owned_version(&self) -> Option<u64> {
        self.base.iter().chain(self.patches.iter()).filter_map(|descriptor| descriptor.version).max()
    }

    /// Whether the newest owned version is the latest release. `None` when
    /// titledb has no version history to compare against, or when neither the
    /// base game nor an update is owned.
    pub fn is_up_to_date(&self) -> Option<bool> {
        if self.base.is_empty() && self.patches.is_empty() {
            return None;
        }
        let latest = self.latest_version?;
        Some(self.owned_version().unwrap_or(0) >= latest)
    }
}

/// Groups identified files by title (in first-seen order) and looks up the
/// display metadata and latest release of every title.
#[instrument(skip_all, fields(files = descriptors.len()))]
pub fn summarize(db: &TitleDb, descriptors: &[FileDescriptor]) -> Vec<TitleSummary> {
    let mut titles: IndexMap<TitleId, TitleSummary> = IndexMap::new();
    for descriptor in descriptors {
        titles
            .entry(descriptor.title_id.clone())
            .or_insert_with(|| TitleSummary::new(descriptor.title_id.clone()))
            .push(descriptor.clone());
    }
    let summaries: Vec<_> = titles
        .into_values()
        .map(|mut summary| {
            summary.info = db.game_info(&summary.title_id);
            summary.latest_version = db
                .versions(&summary.title_id)
                .and_then(|releases| latest_version(&releases).ok());
            summary
        })
        .collect();
    tracing::debug!(titles = summaries.len(), "Summarized library");
    summaries
}
