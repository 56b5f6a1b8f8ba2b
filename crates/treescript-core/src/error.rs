//! Unified error handling for treescript core.
//!
//! Wraps domain and application errors behind one type with suggestions and
//! a display category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for treescript core operations.
#[derive(Debug, Error, Clone)]
pub enum TreescriptError {
    /// Script synthesis rule violations.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Orchestration and port failures.
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl TreescriptError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your config file and TREESCRIPT_* variables".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in treescript".into(),
                "Please report it together with the command you ran".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Compatibility => ErrorCategory::Compatibility,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::StoreLockError | ApplicationError::Export { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Configuration,
    Io,
    Internal,
}

/// Convenient result type alias.
pub type TreescriptResult<T> = Result<T, TreescriptError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> TreescriptResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> TreescriptResult<T> {
        self.map_err(|e| TreescriptError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DialectId;
    use std::str::FromStr;

    #[test]
    fn domain_errors_keep_their_category() {
        let err: TreescriptError = DialectId::from_str("cobol").unwrap_err().into();
        assert_eq!(err.category(), ErrorCategory::Compatibility);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn context_wraps_as_internal() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::other("boom"));
        let err = result.context("writing manifest").unwrap_err();
        assert!(matches!(err, TreescriptError::Internal { .. }));
        assert!(err.to_string().contains("writing manifest: boom"));
    }

    #[test]
    fn export_failures_are_retryable() {
        let err = TreescriptError::from(ApplicationError::Export {
            path: "x".into(),
            reason: "disk full".into(),
        });
        assert!(err.is_retryable());
    }
}
