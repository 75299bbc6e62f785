use super::TitleRecord;

/// Display metadata for a title.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct GameInfo {
    /// Title ID, exactly as found in the title document.
    pub id: String,
    pub name: Option<String>,
    pub banner_url: Option<String>,
    pub icon_url: Option<String>,
    pub category: Vec<String>,
}
impl GameInfo {
    pub(crate) fn from_record(id: impl Into<String>, record: &TitleRecord) -> Self {
        Self {
            id: id.into(),
            name: record.name.clone(),
            banner_url: record.banner_url.clone(),
            icon_url: record.icon_url.clone(),
            category: record.category.clone().unwrap_or_default(),
        }
    }

    /// The title name, falling back to the ID for unnamed titles.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|name| !name.trim().is_empty()).unwrap_or(self.id.as_str())
    }
}
