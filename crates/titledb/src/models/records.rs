//! Raw records, exactly as they appear in the titledb JSON documents.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One content metadata record from `cnmts.json`.
///
/// Only the fields needed for classification are kept; the rest of the record
/// (content entries, meta keys, etc.) is ignored on load.
///
/// Fields that are missing or of the wrong JSON type load as `None`, so one
/// broken record only fails resolution of its own application ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    /// 128 = base, 129 = patch, 130 = DLC
    #[serde(default, deserialize_with = "lenient_u32")]
    pub title_type: Option<u32>,
    /// The owning base title, when titledb knows the relationship.
    #[serde(default, deserialize_with = "lenient_string")]
    pub other_application_id: Option<String>,
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_u64).and_then(|value| u32::try_from(value).ok()))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_str).map(str::to_string))
}

/// One record from a localized title document (e.g. `US.en.json`).
///
/// Every field can be `null` in the wild, so none of them are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub banner_url: Option<String>,
    pub icon_url: Option<String>,
    pub category: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_application_record_ignores_extra_fields() {
        let json = r#"{"titleType": 130, "otherApplicationId": "0100abc000000000", "version": 65536, "contentEntries": []}"#;
        let record: ApplicationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title_type, Some(130));
        assert_eq!(record.other_application_id.as_deref(), Some("0100abc000000000"));
    }

    #[rstest]
    #[case(r#"{"version": 0}"#)]
    #[case(r#"{"titleType": null}"#)]
    #[case(r#"{"titleType": "128"}"#)]
    #[case(r#"{"titleType": -1}"#)]
    #[case(r#"{"titleType": 128.5}"#)]
    #[case(r#"{"titleType": 4294967296}"#)]
    fn test_application_record_without_usable_title_type(#[case] json: &str) {
        let record: ApplicationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title_type, None);
    }

    #[test]
    fn test_application_record_ignores_non_string_parent() {
        let record: ApplicationRecord = serde_json::from_str(r#"{"titleType": 129, "otherApplicationId": 42}"#).unwrap();
        assert_eq!(record.title_type, Some(129));
        assert_eq!(record.other_application_id, None);
    }

    #[test]
    fn test_title_record_tolerates_nulls() {
        let json = r#"{"id": null, "name": "Game", "bannerUrl": null, "category": null, "publisher": "Someone"}"#;
        let record: TitleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, None);
        assert_eq!(record.name.as_deref(), Some("Game"));
        assert_eq!(record.icon_url, None);
        assert_eq!(record.category, None);
    }
}
