//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `apiscaff-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `FileMatcher`: Glob discovery
//!   - `ArtifactRepository`: Coordinate resolution
//!   - `ArchiveLocator`: Manifest lookup and extraction
//!   - `SpecificationParser`, `DocumentParser`: Input parsing
//!   - `GenerationEngine`: Artifact generation
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    ArchiveLocator, ArtifactRepository, DocumentParser, FileMatcher, Filesystem,
    GenerationEngine, SpecificationParser,
};

#[cfg(test)]
pub use output::{
    MockArchiveLocator, MockArtifactRepository, MockDocumentParser, MockFileMatcher,
    MockFilesystem, MockGenerationEngine, MockSpecificationParser,
};
