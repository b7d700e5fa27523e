//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "resolve a coordinate" or "scaffold an API".

pub mod assembler;
pub mod coordinate_resolver;
pub mod scaffold_service;

pub use assembler::AccessoriesAssembler;
pub use coordinate_resolver::CoordinateResolver;
pub use scaffold_service::{OutputDirs, RunSummary, ScaffoldRequest, ScaffoldService};
