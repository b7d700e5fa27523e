//! Infrastructure adapters for apiscaff.
//!
//! This crate implements the ports defined in `apiscaff_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod archive;
pub mod engine;
pub mod filesystem;
pub mod matcher;
pub mod parsers;
pub mod repository;

// Re-export commonly used adapters
pub use archive::ZipArchiveLocator;
pub use engine::ProcessEngine;
pub use filesystem::LocalFilesystem;
pub use matcher::GlobFileMatcher;
pub use parsers::{SpecFileParser, XmlDocumentParser};
pub use repository::EnvironmentRepository;
