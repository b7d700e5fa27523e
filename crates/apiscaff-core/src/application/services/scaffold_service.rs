//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Parse existing configuration documents and the domain descriptor
//! 2. Discover API specifications (coordinate or spec-file globs)
//! 3. Run the generation engine once per specification
//! 4. Write the generated artifacts
//!
//! Files written for earlier specifications stay on disk when a later one fails.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{DocumentParser, FileMatcher, Filesystem, GenerationEngine, SpecificationParser},
        services::CoordinateResolver,
    },
    domain::{
        ApiReference, ApiSpecification, DomainDescriptor, DomainSelection, ExistingDocument,
        GeneratedArtifact, GlobQuery, ManifestLookup, ScaffolderContext, ScaffoldingAccessories,
        ScaffoldingConfiguration, SpecSource,
    },
    error::ScaffResult,
};

/// Where generated artifacts go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    /// Generated configuration documents.
    pub configs: PathBuf,
    /// Generated resource documents.
    pub resources: PathBuf,
}

impl OutputDirs {
    /// `<base>/src/main/mule` and `<base>/src/main/resources`.
    pub fn under(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            configs: base.join("src/main/mule"),
            resources: base.join("src/main/resources"),
        }
    }
}

/// Everything one scaffold run needs.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub source: SpecSource,
    pub existing_documents: GlobQuery,
    /// `None` when no domain directory was configured.
    pub domain: Option<GlobQuery>,
    pub accessories: ScaffoldingAccessories,
    pub context: ScaffolderContext,
    pub output: OutputDirs,
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Specifications handed to the engine.
    pub specifications: usize,
    /// Specifications skipped because they could not be parsed.
    pub skipped: usize,
    /// Files written, in write order.
    pub written: Vec<PathBuf>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    matcher: Box<dyn FileMatcher>,
    resolver: CoordinateResolver,
    spec_parser: Box<dyn SpecificationParser>,
    document_parser: Box<dyn DocumentParser>,
    engine: Box<dyn GenerationEngine>,
}

impl ScaffoldService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        matcher: Box<dyn FileMatcher>,
        resolver: CoordinateResolver,
        spec_parser: Box<dyn SpecificationParser>,
        document_parser: Box<dyn DocumentParser>,
        engine: Box<dyn GenerationEngine>,
    ) -> Self {
        Self {
            filesystem,
            matcher,
            resolver,
            spec_parser,
            document_parser,
            engine,
        }
    }

    /// Run the whole workflow.
    ///
    /// Unparseable specifications and existing documents are skipped with a
    /// warning. Resolution, domain parsing, validation, the engine and
    /// writing are fatal.
    #[instrument(skip_all, fields(source = %request.source))]
    pub fn scaffold(&self, request: &ScaffoldRequest) -> ScaffResult<RunSummary> {
        info!(
            edition = %request.context.runtime_edition(),
            "Scaffolding from {}",
            request.source
        );
        if let Some(version) = request.context.min_runtime_version() {
            info!(min_runtime_version = version, "Minimum runtime version set");
        }

        let mut summary = RunSummary::default();

        let existing = self.existing_documents(&request.existing_documents)?;
        let domain = match &request.domain {
            Some(query) => self.domain_descriptor(query)?,
            None => None,
        };

        let references = self.spec_references(&request.source)?;
        let specifications = self.parse_specifications(references, &mut summary);
        if specifications.is_empty() {
            warn!("No API specification found, nothing to generate");
            return Ok(summary);
        }

        let builder = ScaffoldingConfiguration::builder()
            .with_existing_documents(existing)
            .with_domain(domain)
            .with_api_sync_resource(request.source.api_sync_resource())
            .with_accessories(request.accessories.clone());

        for specification in specifications {
            let configuration = builder.clone().with_api(specification).build()?;
            self.generate(&configuration, request, &mut summary)?;
            summary.specifications += 1;
        }

        info!(
            specifications = summary.specifications,
            written = summary.written.len(),
            "Scaffold completed successfully"
        );
        Ok(summary)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// The single dispatch from a [`SpecSource`] to API references.
    fn spec_references(&self, source: &SpecSource) -> ScaffResult<Vec<ApiReference>> {
        match source {
            SpecSource::Coordinate(coordinate) => match self.resolver.locate(coordinate)? {
                ManifestLookup::Found(reference) => Ok(vec![reference]),
                ManifestLookup::Absent(reason) => {
                    warn!(
                        coordinate = %coordinate,
                        reason = %reason,
                        corrupt = reason.is_corrupt(),
                        "No API could be located for coordinate"
                    );
                    Ok(Vec::new())
                }
            },
            SpecSource::Glob(query) => {
                let files = self.matcher.matches(query)?;
                debug!(count = files.len(), "Specification files matched");
                Ok(files.into_iter().map(ApiReference::file).collect())
            }
        }
    }

    fn parse_specifications(
        &self,
        references: Vec<ApiReference>,
        summary: &mut RunSummary,
    ) -> Vec<ApiSpecification> {
        references
            .into_iter()
            .filter_map(|reference| match self.spec_parser.parse(&reference) {
                Ok(specification) => Some(specification),
                Err(failure) => {
                    warn!(
                        reference = %reference,
                        reason = %failure.reason,
                        "Skipping specification that could not be parsed"
                    );
                    summary.skipped += 1;
                    None
                }
            })
            .collect()
    }

    fn existing_documents(&self, query: &GlobQuery) -> ScaffResult<Vec<ExistingDocument>> {
        let files = self.matcher.matches(query)?;
        Ok(files
            .iter()
            .filter_map(|path| match self.document_parser.parse_config(path) {
                Ok(document) => Some(document),
                Err(failure) => {
                    warn!(
                        path = %path.display(),
                        reason = %failure.reason,
                        "Skipping configuration document that could not be parsed"
                    );
                    None
                }
            })
            .collect())
    }

    fn domain_descriptor(&self, query: &GlobQuery) -> ScaffResult<Option<DomainDescriptor>> {
        let selection = DomainSelection::from_candidates(self.matcher.matches(query)?);

        match &selection {
            DomainSelection::None => {
                warn!(root = %query.root().display(), "No domain descriptor found");
            }
            DomainSelection::Single(path) => {
                debug!(path = %path.display(), "Domain descriptor found");
            }
            DomainSelection::Multiple { chosen, candidates } => {
                warn!(
                    root = %query.root().display(),
                    candidates,
                    chosen = %chosen.display(),
                    "More than one domain descriptor found, using the first"
                );
            }
        }

        let Some(path) = selection.chosen() else {
            return Ok(None);
        };
        let descriptor = self
            .document_parser
            .parse_domain(path)
            .map_err(|failure| ApplicationError::DocumentParse {
                path: path.to_path_buf(),
                reason: failure.reason,
            })?;
        Ok(Some(descriptor))
    }

    #[instrument(skip_all, fields(api = %configuration.api().name()))]
    fn generate(
        &self,
        configuration: &ScaffoldingConfiguration,
        request: &ScaffoldRequest,
        summary: &mut RunSummary,
    ) -> ScaffResult<()> {
        let result = self.engine.run(&request.context, configuration)?;
        if !result.is_success() {
            return Err(ApplicationError::GenerationFailed {
                api: configuration.api().name().to_string(),
                reason: result.errors().join("; "),
            }
            .into());
        }

        Self::check_contained(&request.output.configs, result.configs())?;
        Self::check_contained(&request.output.resources, result.resources())?;

        self.write_all(&request.output.configs, result.configs(), summary)?;
        self.write_all(&request.output.resources, result.resources(), summary)?;
        Ok(())
    }

    /// Nothing of a result is written when any of its names escapes.
    fn check_contained(directory: &Path, artifacts: &[GeneratedArtifact]) -> ScaffResult<()> {
        match artifacts.iter().find(|artifact| !artifact.stays_inside()) {
            Some(artifact) => Err(ApplicationError::UnsafeArtifactPath {
                name: artifact.file_name().to_string(),
                directory: directory.to_path_buf(),
            }
            .into()),
            None => Ok(()),
        }
    }

    fn write_all(
        &self,
        directory: &Path,
        artifacts: &[GeneratedArtifact],
        summary: &mut RunSummary,
    ) -> ScaffResult<()> {
        if artifacts.is_empty() {
            return Ok(());
        }
        self.filesystem.create_dir_all(directory)?;

        for artifact in artifacts {
            let path = directory.join(artifact.file_name());
            if let Some(parent) = path.parent().filter(|parent| *parent != directory) {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, artifact.content())?;
            debug!(path = %path.display(), bytes = artifact.content().len(), "Artifact written");
            summary.written.push(path);
        }
        Ok(())
    }
}
