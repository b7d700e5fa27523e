pub mod artifact;
pub mod configuration;
pub mod file_set;
pub mod spec_source;

pub use artifact::{GeneratedArtifact, ScaffolderContext, ScaffoldingResult};
pub use configuration::{
    ApiSpecification, DomainDescriptor, ExistingDocument, ScaffoldingConfiguration,
    ScaffoldingConfigurationBuilder,
};
pub use file_set::{DomainSelection, FileSet, GlobQuery};
pub use spec_source::SpecSource;
