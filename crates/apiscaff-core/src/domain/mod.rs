// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for apiscaff.
//!
//! This module contains pure logic with no I/O. Resolving coordinates,
//! reading archives, walking directories and running the generator all go
//! through ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No tracing**: Observability belongs to the application and CLI layers
//! - **Immutable values**: Domain objects expose getters, not public fields
//!
// Public API - what the world sees
pub mod accessories;
pub mod api_reference;
pub mod coordinate;
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use accessories::{ConfigurationGroup, EnvironmentConfiguration, Properties, ScaffoldingAccessories};
pub use api_reference::{ApiReference, LookupFailure, ManifestLookup};
pub use coordinate::ResourceCoordinate;
pub use entities::{
    ApiSpecification, DomainDescriptor, DomainSelection, ExistingDocument, FileSet,
    GeneratedArtifact, GlobQuery, ScaffolderContext, ScaffoldingConfiguration,
    ScaffoldingConfigurationBuilder, ScaffoldingResult, SpecSource,
    artifact::DEFAULT_ARTIFACT_NAME,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{ArchiveMode, RuntimeEdition};

pub use validation::DomainValidator;
