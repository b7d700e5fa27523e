//! Dependency repository client.
//!
//! Settings are located from the environment on every resolution. Remotes are
//! always re-checked: a cached archive is only used when no remote could
//! serve the artifact.

mod settings;
mod transport;

use std::path::{Path, PathBuf};

use apiscaff_core::{
    application::{ApplicationError, ports::ArtifactRepository},
    domain::ResourceCoordinate,
    error::ScaffResult,
};
use tracing::{debug, info, instrument, warn};

pub use settings::{
    LOCAL_REPOSITORY_ENV, RemoteRepository, RepositorySettings, SETTINGS_ENV, SETTINGS_FILE_NAME,
    default_local_repository, default_settings_path,
};
pub use transport::{DownloadRequest, HttpTransport, TransportError, UreqTransport};

#[cfg(test)]
use transport::MockHttpTransport;

/// [`ArtifactRepository`] configured from environment-provided settings.
pub struct EnvironmentRepository {
    settings_file: Option<PathBuf>,
    local_override: Option<PathBuf>,
    transport: Box<dyn HttpTransport>,
}

impl EnvironmentRepository {
    /// Use the process environment to find settings and the local cache.
    pub fn from_env() -> Self {
        Self {
            settings_file: std::env::var_os(SETTINGS_ENV).map(PathBuf::from),
            local_override: std::env::var_os(LOCAL_REPOSITORY_ENV).map(PathBuf::from),
            transport: Box::new(UreqTransport),
        }
    }

    pub fn with_settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_file = Some(path.into());
        self
    }

    pub fn with_local_repository(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_override = Some(path.into());
        self
    }

    pub fn with_transport(mut self, transport: Box<dyn HttpTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Locate and read the settings document.
    pub fn load_settings(&self) -> ScaffResult<RepositorySettings> {
        let path = self
            .settings_file
            .clone()
            .or_else(default_settings_path)
            .ok_or_else(|| ApplicationError::SettingsNotFound {
                reason: format!("{SETTINGS_ENV} is not set and no config directory is available"),
            })?;

        if !path.is_file() {
            return Err(ApplicationError::SettingsNotFound {
                reason: format!("{} does not exist", path.display()),
            }
            .into());
        }

        let text = std::fs::read_to_string(&path).map_err(|e| ApplicationError::SettingsNotFound {
            reason: format!("{}: {e}", path.display()),
        })?;
        let settings =
            RepositorySettings::from_toml(&text).map_err(|e| ApplicationError::SettingsNotFound {
                reason: format!("{} is invalid: {e}", path.display()),
            })?;

        debug!(path = %path.display(), remotes = settings.remotes().len(), "Repository settings loaded");
        Ok(settings)
    }

    fn local_repository(&self, settings: &RepositorySettings) -> ScaffResult<PathBuf> {
        self.local_override
            .clone()
            .or_else(|| settings.local().map(Path::to_path_buf))
            .or_else(default_local_repository)
            .ok_or_else(|| {
                ApplicationError::SettingsNotFound {
                    reason: "no local repository directory could be determined".into(),
                }
                .into()
            })
    }

    /// Try every remote in order. Returns the failure reason when none could
    /// serve the artifact.
    fn download(
        &self,
        coordinate: &ResourceCoordinate,
        remotes: &[RemoteRepository],
        target: &Path,
    ) -> ScaffResult<Option<String>> {
        let relative = coordinate.repository_path();
        let partial = target.with_extension("part");
        let mut last_failure = None;

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ApplicationError::FilesystemError {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        for remote in remotes {
            let request = DownloadRequest {
                url: remote.artifact_url(&relative),
                token: remote.token().map(str::to_string),
            };
            match self.transport.fetch(&request, &partial) {
                Ok(()) => {
                    std::fs::rename(&partial, target).map_err(|e| {
                        ApplicationError::FilesystemError {
                            path: target.to_path_buf(),
                            reason: e.to_string(),
                        }
                    })?;
                    info!(remote = remote.id(), url = %request.url, "Artifact downloaded");
                    return Ok(None);
                }
                Err(TransportError::NotFound { url }) => {
                    debug!(remote = remote.id(), %url, "Artifact not in remote");
                }
                Err(e) => {
                    warn!(remote = remote.id(), error = %e, "Remote repository failed");
                    last_failure = Some(e.to_string());
                }
            }
        }

        let _ = std::fs::remove_file(&partial);
        Ok(Some(
            last_failure.unwrap_or_else(|| "not found in any remote repository".into()),
        ))
    }
}

impl ArtifactRepository for EnvironmentRepository {
    #[instrument(skip_all, fields(coordinate = %coordinate))]
    fn resolve(&self, coordinate: &ResourceCoordinate) -> ScaffResult<PathBuf> {
        let settings = self.load_settings()?;
        let target = self
            .local_repository(&settings)?
            .join(coordinate.repository_path());

        let Some(reason) = self.download(coordinate, settings.remotes(), &target)? else {
            return Ok(target);
        };

        if target.is_file() {
            warn!(path = %target.display(), %reason, "Using cached artifact");
            return Ok(target);
        }

        Err(ApplicationError::ResolutionFailed {
            coordinate: coordinate.descriptor(),
            reason,
        }
        .into())
    }
}
