//! Pattern searches over dump filenames.
//!
//! Nothing here validates beyond the pattern itself: any 16 hex characters in
//! square brackets are taken to be an application ID.

use nxlib_titledb::models::AppId;

use crate::consts;

/// Extracts the first bracketed application ID from a filename.
///
/// ```
/// use nxlib_library::filename::app_id;
/// let id = app_id("Game [DEADBEEFCAFEBABE][v65536].nsp").unwrap();
/// assert_eq!(id.as_str(), "DEADBEEFCAFEBABE");
/// assert!(app_id("Game.nsp").is_none());
/// ```
pub fn app_id(filename: &str) -> Option<AppId> {
    let captures = consts::APP_ID_REGEX.captures(filename)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Extracts the first bracketed `[v<digits>]` version from a filename.
///
/// Versions too large for a `u64` are treated as absent.
pub fn version(filename: &str) -> Option<u64> {
    let captures = consts::VERSION_REGEX.captures(filename)?;
    captures.get(1)?.as_str().parse().ok()
}

/// The final dot-delimited segment of a filename.
///
/// A filename without any dots is its own extension, which never matches an
/// allow-list in practice.
pub fn extension(filename: &str) -> &str {
    filename.rsplit('.').next().unwrap_or(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Game [DEADBEEFCAFEBABE][v65536].nsp", Some("DEADBEEFCAFEBABE"))]
    #[case("Game [0100abc000000800][v0].nsz", Some("0100ABC000000800"))]
    #[case("[0100ABC000000000] [0100ABC000000800].xci", Some("0100ABC000000000"))]
    #[case("Game [0100ABC00000080].nsp", None)]
    #[case("Game [0100ABC0000008000].nsp", None)]
    #[case("Game 0100ABC000000800.nsp", None)]
    #[case("Game (0100ABC000000800).nsp", None)]
    #[case("Game [0100ABC00000080G].nsp", None)]
    fn test_app_id(#[case] filename: &str, #[case] expected: Option<&str>) {
        assert_eq!(app_id(filename).as_ref().map(|id| id.as_str()), expected);
    }

    #[rstest]
    #[case("Game [DEADBEEFCAFEBABE][v65536].nsp", Some(65536))]
    #[case("Game [0100ABC000000800][v0].nsp", Some(0))]
    #[case("Game [v1][v2].nsp", Some(1))]
    #[case("Game [V65536].nsp", None)]
    #[case("Game v65536.nsp", None)]
    #[case("Game [v].nsp", None)]
    #[case("Game [v1.0.1].nsp", None)]
    #[case("Game [v99999999999999999999999].nsp", None)]
    fn test_version(#[case] filename: &str, #[case] expected: Option<u64>) {
        assert_eq!(version(filename), expected);
    }

    #[rstest]
    #[case("Game [0100ABC000000800].nsp", "nsp")]
    #[case("Game.v1.0.xci", "xci")]
    #[case("archive.tar.nsz", "nsz")]
    #[case("noextension", "noextension")]
    #[case("trailing.", "")]
    fn test_extension(#[case] filename: &str, #[case] expected: &str) {
        assert_eq!(extension(filename), expected);
    }
}
