//! Configuration loading and validation.
//!
//! Configuration is layered with [`figment`], later layers win:
//!
//! 1. Built-in defaults ([`Config::default`]),
//! 2. `config.{toml,yaml,json}` in the user's config directory
//!    (e.g. `~/.config/nxlib/` on Linux),
//! 3. A config file passed explicitly (e.g. `--config` on the command-line),
//! 4. `NXLIB_`-prefixed environment variables, with `__` separating nested
//!    keys (`NXLIB_LIBRARY__REGION=GB`).

pub mod error;

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use nxlib_library::DEFAULT_EXTENSIONS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ErrorKind, Result};

const APP_NAME: &str = "nxlib";
const ENV_PREFIX: &str = "NXLIB_";
const CONFIG_BASENAME: &str = "config";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub library: LibraryConfig,
    pub titledb: TitleDbConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Directory to scan when none is given on the command-line.
    pub path: Option<PathBuf>,
    /// Region of the localized title document (`US` in `US.en.json`).
    pub region: String,
    /// Language of the localized title document (`en` in `US.en.json`).
    pub language: String,
    /// File extensions considered to be game dumps.
    pub extensions: Vec<String>,
}
impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            path: None,
            region: "US".to_string(),
            language: "en".to_string(),
            extensions: DEFAULT_EXTENSIONS.map(String::from).to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleDbConfig {
    /// Where the titledb mirror lives.
    pub path: PathBuf,
    /// Git remote of the titledb mirror.
    pub url: String,
    /// Files always checked out of the mirror, in addition to the localized
    /// title document.
    pub files: Vec<String>,
}
impl Default for TitleDbConfig {
    fn default() -> Self {
        let path = ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.data_dir().join("titledb"))
            .unwrap_or_else(|| PathBuf::from("titledb"));
        Self {
            path,
            url: "https://github.com/blawar/titledb".to_string(),
            files: ["cnmts.json", "versions.json", "versions.txt", "languages.json"].map(String::from).to_vec(),
        }
    }
}

impl Config {
    /// Loads and validates the layered configuration.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let user_dir = ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf());
        let figment = Self::layered(user_dir.as_deref(), explicit)?.merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(figment)
    }

    /// Extracts and validates a configuration from any figment.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then the user config directory, then the explicit file.
    fn layered(user_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(dir) = user_dir {
            tracing::trace!(dir = %dir.display(), "Looking for user configuration");
            figment = figment
                .merge(Toml::file(dir.join(format!("{CONFIG_BASENAME}.toml"))))
                .merge(Yaml::file(dir.join(format!("{CONFIG_BASENAME}.yaml"))))
                .merge(Json::file(dir.join(format!("{CONFIG_BASENAME}.json"))));
        }
        if let Some(path) = explicit {
            // Figment silently skips missing files, which is what we want for
            // the user directory but not for a file somebody asked for.
            if !path.is_file() {
                exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
            }
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        }
        Ok(figment)
    }

    pub fn validate(&self) -> Result<()> {
        if self.library.region.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid { field: "library.region", reason: "must not be empty" });
        }
        if self.library.language.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid { field: "library.language", reason: "must not be empty" });
        }
        if self.library.extensions.is_empty() {
            exn::bail!(ErrorKind::Invalid { field: "library.extensions", reason: "must list at least one extension" });
        }
        if self.library.extensions.iter().any(|ext| ext.is_empty() || ext.contains('.')) {
            exn::bail!(ErrorKind::Invalid { field: "library.extensions", reason: "extensions are given without dots" });
        }
        if self.titledb.url.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid { field: "titledb.url", reason: "must not be empty" });
        }
        Ok(())
    }
}
