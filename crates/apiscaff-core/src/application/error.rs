//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the ports the
//! application drives. Structural rule violations are `DomainError` from
//! `crate::domain`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No repository settings could be found in the environment.
    #[error("Repository settings not found: {reason}")]
    SettingsNotFound { reason: String },

    /// The repository could not resolve a coordinate.
    #[error("Could not resolve {coordinate}: {reason}")]
    ResolutionFailed { coordinate: String, reason: String },

    /// An archive could not be read or unpacked.
    #[error("Archive error at {path}: {reason}")]
    ArchiveError { path: PathBuf, reason: String },

    /// The scaffolding configuration document is not valid JSON for its shape.
    #[error("Could not parse scaffolding configuration {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// A document the run cannot do without (the domain descriptor) failed to parse.
    #[error("Could not parse {path}: {reason}")]
    DocumentParse { path: PathBuf, reason: String },

    /// The generation engine failed or reported failure.
    #[error("Generation failed for {api}: {reason}")]
    GenerationFailed { api: String, reason: String },

    /// A glob pattern could not be compiled.
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The engine named an artifact that would land outside its output directory.
    #[error("Generated artifact '{name}' would be written outside {}", .directory.display())]
    UnsafeArtifactPath { name: String, directory: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SettingsNotFound { .. } => vec![
                "Create a repository settings file (repository.toml)".into(),
                "Or point APISCAFF_REPOSITORY_SETTINGS at an existing one".into(),
            ],
            Self::ResolutionFailed { coordinate, .. } => vec![
                format!("Check that {coordinate} is published"),
                "Check the remote repositories listed in your repository settings".into(),
            ],
            Self::ArchiveError { path, .. } => vec![
                format!("Inspect the archive at {}", path.display()),
                "Delete it from the local repository to force a fresh download".into(),
            ],
            Self::ConfigParse { path, .. } => vec![
                format!("Check that {} is valid JSON", path.display()),
                "Field names are camelCase, e.g. showConsole, externalCommonFile".into(),
            ],
            Self::DocumentParse { path, .. } => vec![format!(
                "Check that {} is a well-formed domain descriptor",
                path.display()
            )],
            Self::GenerationFailed { .. } => vec![
                "Check the specification for errors".into(),
                "Run with -vv to see the engine's diagnostics".into(),
            ],
            Self::InvalidPattern { pattern, .. } => vec![
                format!("Fix the pattern '{pattern}'"),
                "Use * within a directory and ** across directories".into(),
            ],
            Self::UnsafeArtifactPath { .. } => vec![
                "Artifact names must be relative paths without '..'".into(),
                "Check the generation engine's output".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SettingsNotFound { .. } | Self::ConfigParse { .. } => ErrorCategory::Configuration,
            Self::ResolutionFailed { .. } => ErrorCategory::NotFound,
            Self::DocumentParse { .. } | Self::InvalidPattern { .. } => ErrorCategory::Validation,
            Self::ArchiveError { .. }
            | Self::GenerationFailed { .. }
            | Self::UnsafeArtifactPath { .. }
            | Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }
}

/// A recoverable parse failure reported by a parser port.
///
/// The run logs these and skips the offending input; they never abort it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub location: String,
    pub reason: String,
}

impl ParseFailure {
    pub fn new(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.reason)
    }
}

impl std::error::Error for ParseFailure {}
