//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `apiscaff-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::application::error::ParseFailure;
use crate::domain::{
    ApiReference, ApiSpecification, DomainDescriptor, ExistingDocument, FileSet, GlobQuery,
    ManifestLookup, ResourceCoordinate, ScaffolderContext, ScaffoldingConfiguration,
    ScaffoldingResult,
};
use crate::error::ScaffResult;

/// Port for filesystem operations.
///
/// Implemented by `apiscaff_adapters::filesystem::LocalFilesystem`.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ScaffResult<()>;

    /// Write content to a file, replacing any existing file.
    fn write_file(&self, path: &Path, content: &[u8]) -> ScaffResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> ScaffResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for glob-based file discovery.
///
/// Implemented by `apiscaff_adapters::GlobFileMatcher`.
#[cfg_attr(test, mockall::automock)]
pub trait FileMatcher: Send + Sync {
    /// Absolute paths of the files under `query.root()` that match an
    /// include pattern and no exclude pattern.
    fn matches(&self, query: &GlobQuery) -> ScaffResult<FileSet>;
}

/// Port for the dependency repository client.
///
/// Implemented by `apiscaff_adapters::repository::EnvironmentRepository`.
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactRepository: Send + Sync {
    /// Resolve a coordinate to a local archive, downloading it if needed.
    ///
    /// Fails with `ApplicationError::SettingsNotFound` when the client cannot
    /// be configured and `ApplicationError::ResolutionFailed` when the
    /// artifact does not exist.
    fn resolve(&self, coordinate: &ResourceCoordinate) -> ScaffResult<PathBuf>;
}

/// Port for archive introspection.
///
/// Implemented by `apiscaff_adapters::archive::ZipArchiveLocator`.
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveLocator: Send + Sync {
    /// Find the archive's main document through its manifest. Never fails;
    /// problems come back as [`ManifestLookup::Absent`].
    fn locate_main(&self, archive: &Path) -> ManifestLookup;

    /// Unpack every entry under `destination`, returning the written files.
    ///
    /// API description files are written under the canonical name
    /// (see [`CANONICAL_API_FILE`](crate::domain::api_reference::CANONICAL_API_FILE)).
    fn extract_all(&self, archive: &Path, destination: &Path) -> ScaffResult<Vec<PathBuf>>;
}

/// Port for the API specification parser.
#[cfg_attr(test, mockall::automock)]
pub trait SpecificationParser: Send + Sync {
    fn parse(&self, reference: &ApiReference) -> Result<ApiSpecification, ParseFailure>;
}

/// Port for reading existing configuration documents and domain descriptors.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentParser: Send + Sync {
    /// Parse a previously generated configuration document.
    fn parse_config(&self, path: &Path) -> Result<ExistingDocument, ParseFailure>;

    /// Parse a domain descriptor.
    fn parse_domain(&self, path: &Path) -> Result<DomainDescriptor, ParseFailure>;
}

/// Port for the generation engine.
///
/// Implemented by:
/// - `apiscaff_adapters::engine::ProcessEngine` (external generator process)
#[cfg_attr(test, mockall::automock)]
pub trait GenerationEngine: Send + Sync {
    /// Generate artifacts for one configuration. Blocks until done.
    fn run(
        &self,
        context: &ScaffolderContext,
        configuration: &ScaffoldingConfiguration,
    ) -> ScaffResult<ScaffoldingResult>;
}
