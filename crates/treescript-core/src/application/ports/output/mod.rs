//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from the outside world.
//! The `treescript-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{FileSystemSnapshot, GeneratedArtifact, GenerationSettings};
use crate::error::TreescriptResult;

/// Port producing a snapshot of a directory tree.
///
/// Implemented by:
/// - `treescript_adapters::ingestion::LocalSnapshotSource` (walks the disk)
///
/// Implementations honour `settings.include_content`,
/// `settings.directories_only` and `settings.supported_file_types`; the core
/// never filters entries itself.
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotSource: Send + Sync {
    fn snapshot(
        &self,
        root: &Path,
        settings: &GenerationSettings,
    ) -> TreescriptResult<FileSystemSnapshot>;
}

/// Options for one export call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Overwrite files that already exist.
    pub overwrite: bool,
}

/// Port persisting generated artifacts.
///
/// Implemented by:
/// - `treescript_adapters::export::LocalExporter` (production)
/// - `treescript_adapters::export::MemoryExporter` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactSink: Send + Sync {
    /// Write every artifact and return the written locations in order.
    ///
    /// Marking scripts executable is best-effort and never fails the call.
    fn export(
        &self,
        artifacts: &[GeneratedArtifact],
        options: &ExportOptions,
    ) -> TreescriptResult<Vec<PathBuf>>;
}
