//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `APISCAFF_<SECTION>__<KEY>`, e.g.
//!    `APISCAFF_ENGINE__PROGRAM=/opt/scaffolder/bin/scaffold`
//! 3. Config file (`--config`, or `config.toml` in the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use apiscaff_core::domain::ScaffoldingAccessories;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Prefix of configuration environment variables.
const ENV_PREFIX: &str = "APISCAFF";

/// Separator between section and key in environment variable names.
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Generation engine invocation.
    pub engine: EngineConfig,
    /// Default output directories.
    pub paths: PathsConfig,
    /// Defaults the scaffolding configuration document is merged over.
    pub accessories: AccessoryDefaults,
    /// Packaged API handling.
    pub repository: RepositoryConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub program: Option<PathBuf>,
    pub args: Vec<String>,
}

/// Relative paths are resolved against the project base directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub config_output: Option<PathBuf>,
    pub resources_output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessoryDefaults {
    pub show_console: bool,
    pub external_common_file: Option<String>,
    pub api_id: Option<String>,
}

impl Default for AccessoryDefaults {
    fn default() -> Self {
        Self {
            show_console: true,
            external_common_file: None,
            api_id: None,
        }
    }
}

impl AccessoryDefaults {
    /// Turn the configured defaults into accessories.
    ///
    /// Validation happens later, after the override document is applied.
    pub fn to_accessories(&self) -> anyhow::Result<ScaffoldingAccessories> {
        let overrides = json!({
            "showConsole": self.show_console,
            "externalCommonFile": self.external_common_file,
            "apiId": self.api_id,
        });
        ScaffoldingAccessories::merged(&ScaffoldingAccessories::default(), overrides)
            .context("invalid [accessories] defaults")
    }
}

/// When `extract_dir` is set, resolved archives are unpacked there instead of
/// being read in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub extract_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then the file, then the environment.
    ///
    /// A file named with `--config` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required, config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(
        path: &Path,
        required: bool,
        environment: config::Environment,
    ) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("could not encode default configuration")?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                environment
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .list_separator(" ")
                    .with_list_parse_key("engine.args")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("could not read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.apiscaff.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "apiscaff", "apiscaff")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".apiscaff.toml"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn no_env() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn defaults_show_console() {
        let cfg = AppConfig::default();
        assert!(cfg.accessories.show_console);
        assert!(cfg.engine.program.is_none());
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml"), false, no_env()).unwrap();
        assert!(cfg.repository.extract_dir.is_none());
        assert!(cfg.engine.args.is_empty());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load_from(&dir.path().join("absent.toml"), true, no_env()).is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [engine]
            program = "/opt/scaffolder/bin/scaffold"
            args = ["--lenient"]

            [accessories]
            show_console = false
            api_id = "1234"
            "#,
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true, no_env()).unwrap();
        assert_eq!(
            cfg.engine.program.as_deref(),
            Some(Path::new("/opt/scaffolder/bin/scaffold"))
        );
        assert_eq!(cfg.engine.args, ["--lenient"]);

        let accessories = cfg.accessories.to_accessories().unwrap();
        assert!(!accessories.show_console());
        assert_eq!(accessories.api_id(), Some("1234"));
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[engine]\nprogram = \"from-file\"\n").unwrap();

        let env = config::Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::from([
            ("APISCAFF_ENGINE__PROGRAM".to_string(), "from-env".to_string()),
            ("APISCAFF_ENGINE__ARGS".to_string(), "-a -b".to_string()),
            ("APISCAFF_REPOSITORY__EXTRACT_DIR".to_string(), "target/api".to_string()),
        ])));
        let cfg = AppConfig::load_from(&path, true, env).unwrap();

        assert_eq!(cfg.engine.program.as_deref(), Some(Path::new("from-env")));
        assert_eq!(cfg.engine.args, ["-a", "-b"]);
        assert_eq!(
            cfg.repository.extract_dir.as_deref(),
            Some(Path::new("target/api"))
        );
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
