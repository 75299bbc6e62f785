//! Resolving an application ID to its owning title and content type.

use exn::{OptionExt, ResultExt};
use indexmap::IndexMap;
use tracing::instrument;

use crate::TitleDb;
use crate::error::{ErrorKind, Result};
use crate::models::{AppId, ApplicationRecord, ContentType, ID_LENGTH, TitleId};

/// Title ID of the DLC or base slot within an identifier block.
const BLOCK_SUFFIX: &str = "000";
/// Suffix conventionally used by the base slot of a title block when the
/// base itself isn't in titledb.
const BASE_SUFFIX: &str = "800";

/// The owning title and classification of an application ID.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct Resolution {
    pub title_id: TitleId,
    pub content_type: ContentType,
}

impl TitleDb {
    /// Determines which title an application ID belongs to, and whether it is
    /// the base game, a patch or DLC.
    ///
    /// Content metadata in titledb is authoritative. Application IDs that
    /// titledb doesn't know about (very new releases) are classified by the
    /// suffix of their identifier block instead.
    ///
    /// # Errors
    ///
    /// - [`NoRecords`](ErrorKind::NoRecords) if the application ID is known
    ///   but has no records,
    /// - [`MissingTitleType`](ErrorKind::MissingTitleType) if the latest
    ///   record has no usable `titleType`,
    /// - [`UnknownTitleType`](ErrorKind::UnknownTitleType) if the latest
    ///   record is not a base, patch or DLC,
    /// - [`UnresolvableParent`](ErrorKind::UnresolvableParent) if a patch or
    ///   DLC records a malformed parent, or has none and none can be derived.
    #[instrument(level = "trace", skip(self), fields(app_id = %app_id))]
    pub fn resolve(&self, app_id: &AppId) -> Result<Resolution> {
        let key = app_id.to_db_key();
        match self.cnmts.get(&key) {
            Some(records) => self.resolve_from_records(app_id, &key, records),
            None => {
                tracing::debug!("Application ID not in titledb; falling back to suffix heuristics");
                Ok(resolve_by_suffix(app_id))
            },
        }
    }

    fn resolve_from_records(
        &self,
        app_id: &AppId,
        key: &str,
        records: &IndexMap<String, ApplicationRecord>,
    ) -> Result<Resolution> {
        // Records are in document order, the last one is the most recent.
        let (_, record) = records.last().ok_or_raise(|| ErrorKind::NoRecords(app_id.clone()))?;
        let title_type = record.title_type.ok_or_raise(|| ErrorKind::MissingTitleType(app_id.clone()))?;
        let content_type = ContentType::from_title_type(title_type).ok_or_raise(|| ErrorKind::UnknownTitleType {
            app_id: app_id.clone(),
            title_type,
        })?;
        let title_id = match (content_type, record.other_application_id.as_deref()) {
            (ContentType::Base, _) => TitleId::from(app_id),
            (_, Some(parent)) => parent
                .parse::<TitleId>()
                .or_raise(|| ErrorKind::UnresolvableParent(app_id.clone()))?,
            (ContentType::Patch, None) => self.find_parent(app_id, &key[..ID_LENGTH - 3])?,
            (ContentType::Dlc, None) => self.find_parent(app_id, &key[..ID_LENGTH - 4])?,
        };
        Ok(Resolution { title_id, content_type })
    }

    /// First valid application ID in the database (document order) that
    /// starts with the given block prefix.
    fn find_parent(&self, app_id: &AppId, prefix: &str) -> Result<TitleId> {
        self.cnmts
            .keys()
            .filter_map(|candidate| candidate.parse::<TitleId>().ok())
            .find(|candidate| candidate.to_db_key().starts_with(prefix))
            .ok_or_raise(|| ErrorKind::UnresolvableParent(app_id.clone()))
    }
}

fn resolve_by_suffix(app_id: &AppId) -> Resolution {
    let id = app_id.as_str();
    let block = format!("{}{}", &id[..ID_LENGTH - BLOCK_SUFFIX.len()], BLOCK_SUFFIX);
    let (title_id, content_type) = if id.ends_with(BLOCK_SUFFIX) {
        (TitleId::from(app_id), ContentType::Dlc)
    } else if id.ends_with(BASE_SUFFIX) {
        (TitleId::normalize(block), ContentType::Base)
    } else {
        (TitleId::normalize(block), ContentType::Dlc)
    };
    Resolution { title_id, content_type }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn db(cnmts: &str) -> TitleDb {
        TitleDb::from_json(cnmts, "{}", "{}").unwrap()
    }

    fn app_id(id: &str) -> AppId {
        id.parse().unwrap()
    }

    fn resolved(title_id: &str, content_type: ContentType) -> Resolution {
        Resolution { title_id: title_id.parse().unwrap(), content_type }
    }

    #[rstest]
    #[case("0100abc000000000")]
    #[case("0100ABC000000000")]
    fn test_base_from_database(#[case] id: &str) {
        let db = db(r#"{"0100abc000000000": {"0": {"titleType": 128}}}"#);
        assert_eq!(db.resolve(&app_id(id)).unwrap(), resolved("0100ABC000000000", ContentType::Base));
    }

    #[test]
    fn test_patch_with_explicit_parent() {
        let db = db(r#"{"0100abc000000000": {"0": {"titleType": 129, "otherApplicationId": "0100abc000000001"}}}"#);
        assert_eq!(
            db.resolve(&app_id("0100ABC000000000")).unwrap(),
            resolved("0100ABC000000001", ContentType::Patch)
        );
    }

    #[test]
    fn test_dlc_with_explicit_parent() {
        let db = db(r#"{"0100abc000001001": {"0": {"titleType": 130, "otherApplicationId": "0100abc000000000"}}}"#);
        assert_eq!(
            db.resolve(&app_id("0100ABC000001001")).unwrap(),
            resolved("0100ABC000000000", ContentType::Dlc)
        );
    }

    #[test]
    fn test_last_record_wins() {
        let db = db(r#"{"0100abc000000800": {
            "0": {"titleType": 128},
            "65536": {"titleType": 129, "otherApplicationId": "0100abc000000000"}
        }}"#);
        assert_eq!(
            db.resolve(&app_id("0100ABC000000800")).unwrap(),
            resolved("0100ABC000000000", ContentType::Patch)
        );
    }

    #[test]
    fn test_patch_derives_parent_from_prefix() {
        // Patch drops 3 characters: prefix "0100abc000000".
        let db = db(r#"{
            "0100abd000000000": {"0": {"titleType": 128}},
            "0100abc000000000": {"0": {"titleType": 128}},
            "0100abc000000800": {"65536": {"titleType": 129}}
        }"#);
        assert_eq!(
            db.resolve(&app_id("0100ABC000000800")).unwrap(),
            resolved("0100ABC000000000", ContentType::Patch)
        );
    }

    #[test]
    fn test_dlc_derives_parent_from_prefix() {
        // DLC drops 4 characters: prefix "0100abc00000", the first match in
        // document order wins.
        let db = db(r#"{
            "0100abc000000000": {"0": {"titleType": 128}},
            "0100abc000001001": {"0": {"titleType": 130}}
        }"#);
        assert_eq!(
            db.resolve(&app_id("0100ABC000001001")).unwrap(),
            resolved("0100ABC000000000", ContentType::Dlc)
        );
    }

    #[test]
    fn test_derived_parent_may_be_itself() {
        let db = db(r#"{"0100abc000001001": {"0": {"titleType": 130}}}"#);
        assert_eq!(
            db.resolve(&app_id("0100ABC000001001")).unwrap(),
            resolved("0100ABC000001001", ContentType::Dlc)
        );
    }

    #[test]
    fn test_mixed_case_keys_are_not_found() {
        // Lookups always use the lower-case form of the application ID.
        let db = db(r#"{"0100ABC000000800": {"0": {"titleType": 129}}}"#);
        assert_eq!(
            db.resolve(&app_id("0100ABC000000800")).unwrap(),
            resolved("0100ABC000000000", ContentType::Base)
        );
    }

    #[rstest]
    #[case("")]
    #[case("0100abc00000")]
    #[case("0100abc00000000z")]
    fn test_malformed_explicit_parent_is_an_error(#[case] parent: &str) {
        let db = db(&format!(
            r#"{{"0100abc000000800": {{"0": {{"titleType": 129, "otherApplicationId": "{parent}"}}}}}}"#
        ));
        let err = db.resolve(&app_id("0100ABC000000800")).unwrap_err();
        assert_eq!(*err, ErrorKind::UnresolvableParent(app_id("0100ABC000000800")));
    }

    #[test]
    fn test_derived_parent_skips_malformed_keys() {
        let db = db(r#"{
            "0100abc000000zzz": {"0": {"titleType": 128}},
            "0100abc000000000": {"0": {"titleType": 128}},
            "0100abc000000800": {"65536": {"titleType": 129}}
        }"#);
        assert_eq!(
            db.resolve(&app_id("0100ABC000000800")).unwrap(),
            resolved("0100ABC000000000", ContentType::Patch)
        );
    }

    #[test]
    fn test_broken_record_only_fails_its_own_app_id() {
        let db = db(r#"{
            "0100abc000000000": {"0": {"titleType": 128}},
            "0100bad000000000": {"0": {"version": 0}}
        }"#);
        assert_eq!(
            db.resolve(&app_id("0100ABC000000000")).unwrap(),
            resolved("0100ABC000000000", ContentType::Base)
        );
        let err = db.resolve(&app_id("0100BAD000000000")).unwrap_err();
        assert_eq!(*err, ErrorKind::MissingTitleType(app_id("0100BAD000000000")));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_empty_records_is_an_error() {
        let db = db(r#"{"0100abc000000000": {}}"#);
        let err = db.resolve(&app_id("0100ABC000000000")).unwrap_err();
        assert_eq!(*err, ErrorKind::NoRecords(app_id("0100ABC000000000")));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(131)]
    #[case(132)]
    fn test_unknown_title_type_is_an_error(#[case] title_type: u32) {
        let db = db(&format!(r#"{{"0100abc000000000": {{"0": {{"titleType": {title_type}}}}}}}"#));
        let err = db.resolve(&app_id("0100ABC000000000")).unwrap_err();
        assert_eq!(
            *err,
            ErrorKind::UnknownTitleType {
                app_id: app_id("0100ABC000000000"),
                title_type
            }
        );
        assert!(!err.is_retryable());
    }

    #[rstest]
    #[case("0100ABC000000000", "0100ABC000000000", ContentType::Dlc)]
    #[case("0100ABC000000800", "0100ABC000000000", ContentType::Base)]
    #[case("0100abc000000800", "0100ABC000000000", ContentType::Base)]
    #[case("0100ABC000001001", "0100ABC000001000", ContentType::Dlc)]
    #[case("0100ABC0000010FF", "0100ABC000001000", ContentType::Dlc)]
    #[case("0100abc000000801", "0100ABC000000000", ContentType::Dlc)]
    fn test_suffix_heuristics(#[case] id: &str, #[case] title_id: &str, #[case] content_type: ContentType) {
        let db = db("{}");
        assert_eq!(db.resolve(&app_id(id)).unwrap(), resolved(title_id, content_type));
    }
}
