//! Repository client settings.
//!
//! A small TOML document located from the environment:
//!
//! ```toml
//! local = "/home/me/.cache/apiscaff/repository"
//!
//! [[remote]]
//! id = "exchange"
//! url = "https://maven.anypoint.example.com/api/v3/maven"
//! token = "..."
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable naming the settings file.
pub const SETTINGS_ENV: &str = "APISCAFF_REPOSITORY_SETTINGS";

/// Environment variable overriding the local cache directory.
pub const LOCAL_REPOSITORY_ENV: &str = "APISCAFF_LOCAL_REPOSITORY";

/// Settings file name inside the platform config directory.
pub const SETTINGS_FILE_NAME: &str = "repository.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositorySettings {
    /// Local cache root. Falls back to the platform cache directory.
    #[serde(default)]
    local: Option<PathBuf>,
    /// Remotes, tried in order.
    #[serde(default, rename = "remote")]
    remotes: Vec<RemoteRepository>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteRepository {
    id: String,
    url: String,
    #[serde(default)]
    token: Option<String>,
}

impl RepositorySettings {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn local(&self) -> Option<&Path> {
        self.local.as_deref()
    }

    pub fn remotes(&self) -> &[RemoteRepository] {
        &self.remotes
    }
}

impl RemoteRepository {
    pub fn new(id: impl Into<String>, url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            token,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Full URL of an artifact given its repository-relative path.
    pub fn artifact_url(&self, relative: &Path) -> String {
        let relative: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        format!("{}/{}", self.url.trim_end_matches('/'), relative.join("/"))
    }
}

/// Default settings file location: `<config dir>/repository.toml`.
pub fn default_settings_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "apiscaff", "apiscaff")
        .map(|d| d.config_dir().join(SETTINGS_FILE_NAME))
}

/// Default local cache: `<cache dir>/repository`.
pub fn default_local_repository() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "apiscaff", "apiscaff")
        .map(|d| d.cache_dir().join("repository"))
}
