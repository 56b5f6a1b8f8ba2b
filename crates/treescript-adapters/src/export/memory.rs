//! In-memory exporter for testing.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use treescript_core::{
    application::{
        ApplicationError,
        ports::{ArtifactSink, ExportOptions},
    },
    domain::GeneratedArtifact,
    error::TreescriptResult,
};

/// In-memory artifact sink for testing.
///
/// Clones share storage, so a test can keep one handle and give another to
/// the service.
#[derive(Debug, Clone)]
pub struct MemoryExporter {
    inner: Arc<RwLock<MemoryExporterInner>>,
}

#[derive(Debug)]
struct MemoryExporterInner {
    base: PathBuf,
    files: BTreeMap<PathBuf, String>,
    executables: HashSet<PathBuf>,
}

impl MemoryExporter {
    /// Create an empty exporter rooted at `/out`.
    pub fn new() -> Self {
        Self::with_base("/out")
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryExporterInner {
                base: base.into(),
                files: BTreeMap::new(),
                executables: HashSet::new(),
            })),
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.executables.contains(path))
            .unwrap_or(false)
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Clear all contents.
    pub fn clear(&self) -> TreescriptResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.files.clear();
        inner.executables.clear();
        Ok(())
    }
}

impl Default for MemoryExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactSink for MemoryExporter {
    fn export(
        &self,
        artifacts: &[GeneratedArtifact],
        options: &ExportOptions,
    ) -> TreescriptResult<Vec<PathBuf>> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let targets: Vec<PathBuf> = artifacts
            .iter()
            .map(|a| inner.base.join(a.file_name()))
            .collect();

        if !options.overwrite {
            if let Some(existing) = targets.iter().find(|p| inner.files.contains_key(*p)) {
                return Err(ApplicationError::OutputExists {
                    path: existing.clone(),
                }
                .into());
            }
        }

        for (artifact, path) in artifacts.iter().zip(&targets) {
            inner
                .files
                .insert(path.clone(), artifact.content().to_string());
            if artifact.is_script() {
                inner.executables.insert(path.clone());
            }
        }

        Ok(targets)
    }
}
