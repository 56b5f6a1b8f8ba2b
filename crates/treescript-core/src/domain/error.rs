// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (batch generation hands one copy to each caller)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("unsupported dialect '{dialect}': {reason}")]
    UnsupportedDialect { dialect: String, reason: String },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("invalid script name '{name}': only letters, digits, '-' and '_' are allowed")]
    InvalidScriptName { name: String },

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("duplicate path in snapshot: {path}")]
    DuplicatePath { path: String },

    #[error("absolute paths not allowed in snapshot: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Encoding Errors (should never reach users)
    // ========================================================================
    #[error("cannot encode content of '{path}' for {dialect}: {reason}")]
    ContentEncoding {
        path: String,
        dialect: String,
        reason: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnsupportedDialect { dialect, .. } => vec![
                format!("'{}' cannot be generated for the selected platform", dialect),
                "List what is available: treescript dialects --platform <PLATFORM>".into(),
                "Windows: powershell, batch; macOS/Linux: bash, zsh, fish".into(),
                "python, nodejs, ruby and perl are offered everywhere".into(),
            ],
            Self::InvalidScriptName { name } => vec![
                format!("'{}' cannot be used as a script name", name),
                "Use letters, digits, hyphens and underscores only".into(),
                "Examples: scaffold, setup_project, make-tree".into(),
            ],
            Self::InvalidSettings(msg) => vec![
                "Check your generation settings".into(),
                format!("Details: {}", msg),
            ],
            Self::ContentEncoding { path, .. } => vec![
                format!("'{}' looks like binary content", path),
                "Binary files should be filtered out before generation".into(),
                "Please report this issue if the file is plain text".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedDialect { .. } => ErrorCategory::Compatibility,
            Self::InvalidSettings(_) | Self::InvalidScriptName { .. } => {
                ErrorCategory::Validation
            }
            Self::InvalidSnapshot(_)
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Validation,
            Self::ContentEncoding { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_dialect_is_compatibility() {
        let err = DomainError::UnsupportedDialect {
            dialect: "bash".into(),
            reason: "not offered for windows".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Compatibility);
        assert!(err.suggestions().iter().any(|s| s.contains("treescript dialects")));
    }

    #[test]
    fn encoding_failure_is_internal() {
        let err = DomainError::ContentEncoding {
            path: "a.bin".into(),
            dialect: "bash".into(),
            reason: "NUL byte".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.to_string().contains("a.bin"));
    }
}
