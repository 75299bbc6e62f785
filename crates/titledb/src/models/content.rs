use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// Classification of a content unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum ContentType {
    /// The base game.
    Base,
    /// An update to the base game.
    Patch,
    /// Downloadable content.
    Dlc,
}
impl ContentType {
    /// Maps the `titleType` field of a content metadata record.
    pub fn from_title_type(title_type: u32) -> Option<Self> {
        match title_type {
            128 => Some(Self::Base),
            129 => Some(Self::Patch),
            130 => Some(Self::Dlc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Patch => "patch",
            Self::Dlc => "dlc",
        }
    }
}
impl FromStr for ContentType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "base" => Self::Base,
            "patch" | "update" => Self::Patch,
            "dlc" => Self::Dlc,
            _ => exn::bail!(ErrorKind::InvalidContentType(s.to_string())),
        })
    }
}
impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(128, Some(ContentType::Base))]
    #[case(129, Some(ContentType::Patch))]
    #[case(130, Some(ContentType::Dlc))]
    #[case(0, None)]
    #[case(131, None)]
    fn test_from_title_type(#[case] title_type: u32, #[case] expected: Option<ContentType>) {
        assert_eq!(ContentType::from_title_type(title_type), expected);
    }

    #[rstest]
    #[case("base", ContentType::Base)]
    #[case("PATCH", ContentType::Patch)]
    #[case("update", ContentType::Patch)]
    #[case(" dlc ", ContentType::Dlc)]
    fn test_from_str(#[case] input: &str, #[case] expected: ContentType) {
        assert_eq!(input.parse::<ContentType>().unwrap(), expected);
        assert!("demo".parse::<ContentType>().is_err());
    }
}
