//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the ports, not
//! in script synthesis rules. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Emitted statement counts diverged from the snapshot.
    #[error(
        "Structural invariant violated for {dialect}: emitted {emitted} {kind} statements, snapshot has {expected}"
    )]
    StructuralInvariant {
        dialect: String,
        kind: &'static str,
        expected: usize,
        emitted: usize,
    },

    /// Source root is missing or not a directory.
    #[error("Source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Walking the source tree failed.
    #[error("Ingestion failed at {path}: {reason}")]
    Ingestion { path: PathBuf, reason: String },

    /// Writing an artifact failed.
    #[error("Export failed at {path}: {reason}")]
    Export { path: PathBuf, reason: String },

    /// Output file exists and overwriting was not requested.
    #[error("Output already exists at {path}")]
    OutputExists { path: PathBuf },

    /// Shared adapter state is unusable (lock poisoned).
    #[error("Artifact store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::StructuralInvariant { .. } => vec![
                "The generated script did not match the scanned tree".into(),
                "This is a bug, please report it with the command you ran".into(),
            ],
            Self::SourceNotFound { path } => vec![
                format!("No directory at: {}", path.display()),
                "Check the path and try again".into(),
            ],
            Self::Ingestion { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Check that you have read permissions".into(),
            ],
            Self::Export { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the disk is not full".into(),
            ],
            Self::OutputExists { path } => vec![
                format!("File already exists: {}", path.display()),
                "Use --force to overwrite".into(),
                "Or choose another --output directory or --name".into(),
            ],
            Self::StoreLockError => vec!["Try again; another writer panicked".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StructuralInvariant { .. } => ErrorCategory::Internal,
            Self::SourceNotFound { .. } => ErrorCategory::NotFound,
            Self::Ingestion { .. } | Self::Export { .. } => ErrorCategory::Io,
            Self::OutputExists { .. } => ErrorCategory::Validation,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_message_names_counts() {
        let err = ApplicationError::StructuralInvariant {
            dialect: "bash".into(),
            kind: "directory",
            expected: 3,
            emitted: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("emitted 2 directory"));
        assert!(msg.contains("has 3"));
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn output_exists_suggests_force() {
        let err = ApplicationError::OutputExists {
            path: PathBuf::from("out/scaffold.sh"),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }
}
