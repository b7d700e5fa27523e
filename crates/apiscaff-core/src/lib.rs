//! apiscaff Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for apiscaff, which
//! resolves packaged API descriptions and scaffolds integration-flow
//! artifacts from them.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           apiscaff-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (CoordinateResolver, ScaffoldService,  │
//! │        AccessoriesAssembler)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, FileMatcher, Repository,   │
//! │  ArchiveLocator, Parsers, Engine)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    apiscaff-adapters (Infrastructure)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ResourceCoordinate, ApiReference,      │
//! │  ScaffoldingAccessories, FileSet)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use apiscaff_core::prelude::*;
//!
//! let resolver = CoordinateResolver::new(repository, locator);
//! let service = ScaffoldService::new(filesystem, matcher, resolver, specs, documents, engine);
//!
//! let request = ScaffoldRequest {
//!     source: SpecSource::Glob(GlobQuery::spec_files("/work")),
//!     existing_documents: GlobQuery::config_documents("/work"),
//!     domain: None,
//!     accessories: ScaffoldingAccessories::default(),
//!     context: ScaffolderContext::new(RuntimeEdition::Ee, None),
//!     output: OutputDirs::under("/work"),
//! };
//! let summary = service.scaffold(&request)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AccessoriesAssembler, CoordinateResolver, OutputDirs, RunSummary, ScaffoldRequest,
        ScaffoldService,
        ports::{
            ArchiveLocator, ArtifactRepository, DocumentParser, FileMatcher, Filesystem,
            GenerationEngine, SpecificationParser,
        },
    };
    pub use crate::domain::{
        ApiReference, ArchiveMode, GlobQuery, ManifestLookup, ResourceCoordinate, RuntimeEdition,
        ScaffolderContext, ScaffoldingAccessories, SpecSource,
    };
    pub use crate::error::{ScaffError, ScaffResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
