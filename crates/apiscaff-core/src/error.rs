//! Unified error handling for apiscaff core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for apiscaff core operations.
#[derive(Debug, Error, Clone)]
pub enum ScaffError {
    /// Structural rule violations (coordinates, accessories).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Orchestration and port failures.
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl ScaffError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ScaffResult<T> = Result<T, ScaffError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_categories_carry_through() {
        let err: ScaffError = DomainError::IncompleteProperties.into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn resolution_failure_is_not_found() {
        let err: ScaffError = ApplicationError::ResolutionFailed {
            coordinate: "resource::a:b:1:fat-raml:zip".into(),
            reason: "missing".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }
}
