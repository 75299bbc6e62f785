use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Bracketed application ID, anywhere in the filename: `[0100ABC000000800]`
regex!(APP_ID_REGEX, r"\[([0-9A-Fa-f]{16})\]");
// Bracketed raw version: `[v65536]`
regex!(VERSION_REGEX, r"\[v(\d+)\]");

/// Extensions of the dump formats recognised by default.
pub const DEFAULT_EXTENSIONS: [&str; 4] = ["nsp", "nsz", "xci", "xcz"];
