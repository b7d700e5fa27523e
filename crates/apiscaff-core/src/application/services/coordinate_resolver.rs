//! Coordinate Resolver - turns a resource coordinate into an API reference.
//!
//! Resolution is a single blocking call to the repository port, followed by
//! one archive introspection whose shape depends on the [`ArchiveMode`].

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{ArchiveLocator, ArtifactRepository},
    domain::{
        ApiReference, ArchiveMode, LookupFailure, ManifestLookup, ResourceCoordinate,
        api_reference::CANONICAL_API_FILE,
    },
    error::ScaffResult,
};

pub struct CoordinateResolver {
    repository: Box<dyn ArtifactRepository>,
    locator: Box<dyn ArchiveLocator>,
    mode: ArchiveMode,
}

impl CoordinateResolver {
    /// Create a resolver in manifest mode.
    pub fn new(repository: Box<dyn ArtifactRepository>, locator: Box<dyn ArchiveLocator>) -> Self {
        Self {
            repository,
            locator,
            mode: ArchiveMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ArchiveMode) -> Self {
        self.mode = mode;
        self
    }

    /// Resolve a coordinate to the local archive path.
    ///
    /// Missing repository settings and unknown artifacts are both fatal.
    #[instrument(skip_all, fields(coordinate = %coordinate))]
    pub fn resolve(&self, coordinate: &ResourceCoordinate) -> ScaffResult<PathBuf> {
        let archive = self.repository.resolve(coordinate)?;
        debug!(archive = %archive.display(), "Coordinate resolved");
        Ok(archive)
    }

    /// Resolve a coordinate and find the API document it packages.
    ///
    /// In manifest mode problems with the archive come back as
    /// [`ManifestLookup::Absent`]. In extract mode unpacking failures are
    /// fatal, and the reference points at the least nested extracted
    /// `api.raml`.
    #[instrument(skip_all, fields(coordinate = %coordinate, mode = %self.mode))]
    pub fn locate(&self, coordinate: &ResourceCoordinate) -> ScaffResult<ManifestLookup> {
        let archive = self.resolve(coordinate)?;

        match &self.mode {
            ArchiveMode::Manifest => Ok(self.locator.locate_main(&archive)),
            ArchiveMode::Extract { destination } => {
                let written = self.locator.extract_all(&archive, destination)?;
                info!(
                    files = written.len(),
                    destination = %destination.display(),
                    "Archive extracted"
                );

                // API documents are renamed where they sit; the shallowest one wins.
                let api_document = written
                    .iter()
                    .filter(|path| path.file_name().is_some_and(|name| name == CANONICAL_API_FILE))
                    .min_by_key(|path| path.components().count());
                match api_document {
                    Some(path) => Ok(ManifestLookup::Found(ApiReference::file(path.clone()))),
                    None => Ok(ManifestLookup::Absent(LookupFailure::NoApiDocument)),
                }
            }
        }
    }

    /// Parse a `resource::g:a:v:classifier:type[:file]` descriptor and locate it.
    pub fn locate_descriptor(&self, descriptor: &str) -> ScaffResult<ManifestLookup> {
        let coordinate: ResourceCoordinate = descriptor.parse()?;
        self.locate(&coordinate)
    }
}
