use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::ID_LENGTH;
use crate::error::{Error, ErrorKind};

fn is_hex_id(s: &str) -> bool {
    s.len() == ID_LENGTH && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Identifier of a single installable content unit: a base game, one patch
/// revision, or one DLC item.
///
/// Always 16 hexadecimal characters. Stored upper-cased, which is how they
/// appear in filenames; use [`AppId::to_db_key`] for titledb lookups (titledb
/// keys are lower-case).
///
/// ```
/// use nxlib_titledb::models::AppId;
/// let app_id: AppId = "0100abc000000800".parse().unwrap();
/// assert_eq!(app_id.as_str(), "0100ABC000000800");
/// assert_eq!(app_id.to_db_key(), "0100abc000000800");
/// assert!("0100abc00000080".parse::<AppId>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct AppId(String);
impl AppId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The lower-case form used as a key in every titledb document.
    pub fn to_db_key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}
impl FromStr for AppId {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_hex_id(s) {
            exn::bail!(ErrorKind::InvalidAppId(s.to_string()));
        }
        Ok(Self(s.to_ascii_uppercase()))
    }
}
impl TryFrom<String> for AppId {
    type Error = Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().parse()
    }
}
impl AsRef<str> for AppId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl Display for AppId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Identifier of the overarching title a content unit belongs to, shared by a
/// base game and all of its patches and DLC.
///
/// Always 16 upper-case hexadecimal characters. Identifiers read from titledb
/// documents are parsed like any other input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct TitleId(String);
impl TitleId {
    /// `id` must already be 16 hexadecimal characters.
    pub(crate) fn normalize(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The lower-case form used as a key in `versions.json`.
    pub fn to_db_key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}
impl FromStr for TitleId {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_hex_id(s) {
            exn::bail!(ErrorKind::InvalidAppId(s.to_string()));
        }
        Ok(Self::normalize(s))
    }
}
impl From<&AppId> for TitleId {
    fn from(value: &AppId) -> Self {
        Self::normalize(value.as_str())
    }
}
impl AsRef<str> for TitleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl Display for TitleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}
