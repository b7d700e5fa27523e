//! Application layer for apiscaff.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (CoordinateResolver, AccessoriesAssembler, ScaffoldService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    AccessoriesAssembler, CoordinateResolver, OutputDirs, RunSummary, ScaffoldRequest,
    ScaffoldService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    ArchiveLocator, ArtifactRepository, DocumentParser, FileMatcher, Filesystem,
    GenerationEngine, SpecificationParser,
};

pub use error::{ApplicationError, ParseFailure};
