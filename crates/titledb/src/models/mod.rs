mod content;
mod ids;
mod info;
mod records;
mod release;

pub use self::content::ContentType;
pub use self::ids::{AppId, TitleId};
pub use self::info::GameInfo;
pub use self::records::{ApplicationRecord, TitleRecord};
pub use self::release::{VersionRelease, human_version};

/// Number of hexadecimal characters in an application or title identifier.
pub const ID_LENGTH: usize = 16;
