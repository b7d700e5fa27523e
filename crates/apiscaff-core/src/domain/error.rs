// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried inside the application error without boxing)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Coordinate Errors
    // ========================================================================
    #[error("Invalid resource descriptor '{descriptor}': {reason}")]
    InvalidDescriptor { descriptor: String, reason: String },

    #[error("Incomplete coordinate: missing {missing}")]
    IncompleteCoordinate { missing: String },

    // ========================================================================
    // Accessories Errors
    // ========================================================================
    #[error("externalCommonFile must end with .xml (got '{file}')")]
    InvalidExternalCommonFile { file: String },

    #[error("format and files must be present for properties")]
    IncompleteProperties,

    #[error("Invalid runtime edition '{0}' (expected EE or CE)")]
    InvalidRuntimeEdition(String),

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidDescriptor { .. } => vec![
                "Descriptors look like resource::<group>:<artifact>:<version>:<classifier>:<type>[:<file>]".into(),
                "Every segment must be non-empty".into(),
            ],
            Self::IncompleteCoordinate { missing } => vec![
                format!("Also provide: {missing}"),
                "groupId, artifact and version must be given together, or not at all".into(),
            ],
            Self::InvalidExternalCommonFile { file } => vec![
                format!("Rename '{file}' to an .xml file"),
                "Or remove externalCommonFile from the scaffolding configuration".into(),
            ],
            Self::IncompleteProperties => vec![
                "Set both properties.format and properties.files".into(),
                "Or remove the properties section entirely".into(),
            ],
            Self::InvalidRuntimeEdition(_) => vec!["Use --runtime-edition EE or CE".into()],
            Self::MissingRequiredField { field } => {
                vec![format!("'{field}' must be set before building")]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidDescriptor { .. } | Self::InvalidRuntimeEdition(_) => {
                ErrorCategory::Validation
            }
            Self::IncompleteCoordinate { .. }
            | Self::InvalidExternalCommonFile { .. }
            | Self::IncompleteProperties => ErrorCategory::Configuration,
            Self::MissingRequiredField { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}
