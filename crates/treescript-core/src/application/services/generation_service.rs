//! Generation Service - main application orchestrator.
//!
//! Coordinates the workflow used by the CLI:
//! 1. Ingest a directory tree through a `SnapshotSource`
//! 2. Assemble the script (and README) for the requested dialect
//! 3. Hand the artifacts to an `ArtifactSink`
//!
//! `generate_all` fans one snapshot out to every dialect offered for the
//! platform scope; each dialect succeeds or fails on its own.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::{ArtifactSink, ExportOptions, SnapshotSource},
        services::{ReadmeSynthesizer, ScriptAssembler},
    },
    domain::{DialectId, FileSystemSnapshot, FormatRegistry, GeneratedArtifact, GenerationSettings},
    error::TreescriptResult,
};

/// Result of generating one dialect in a batch.
#[derive(Debug)]
pub struct DialectOutcome {
    pub dialect: DialectId,
    pub result: TreescriptResult<GeneratedArtifact>,
}

impl DialectOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Façade over the assembler and README synthesizer.
#[derive(Debug, Clone, Copy)]
pub struct GenerationService {
    registry: &'static FormatRegistry,
    assembler: ScriptAssembler,
    readme: ReadmeSynthesizer,
}

impl Default for GenerationService {
    fn default() -> Self {
        Self::new(FormatRegistry::builtin())
    }
}

impl GenerationService {
    pub fn new(registry: &'static FormatRegistry) -> Self {
        Self {
            registry,
            assembler: ScriptAssembler::new(registry),
            readme: ReadmeSynthesizer::new(registry),
        }
    }

    pub fn registry(&self) -> &'static FormatRegistry {
        self.registry
    }

    /// Script for `settings.dialect`, followed by the README when
    /// `settings.include_readme` is set.
    #[instrument(
        skip_all,
        fields(dialect = %settings.dialect, platform = %settings.platform)
    )]
    pub fn generate(
        &self,
        snapshot: &FileSystemSnapshot,
        settings: &GenerationSettings,
    ) -> TreescriptResult<Vec<GeneratedArtifact>> {
        let script = self.assembler.assemble(snapshot, settings)?;
        let mut artifacts = vec![script];

        if settings.include_readme {
            artifacts.push(self.readme.synthesize(snapshot, settings));
        }

        info!(artifacts = artifacts.len(), "Generation complete");
        Ok(artifacts)
    }

    /// One script per dialect offered for `settings.platform`, in registry
    /// order. `settings.dialect` is ignored.
    #[instrument(skip_all, fields(platform = %settings.platform))]
    pub fn generate_all(
        &self,
        snapshot: &FileSystemSnapshot,
        settings: &GenerationSettings,
    ) -> Vec<DialectOutcome> {
        let dialects = self.registry.supported_dialects(settings.platform);

        let outcomes: Vec<DialectOutcome> = dialects
            .par_iter()
            .map(|&dialect| DialectOutcome {
                dialect,
                result: self
                    .assembler
                    .assemble(snapshot, &settings.for_dialect(dialect)),
            })
            .collect();

        for outcome in &outcomes {
            if let Err(e) = &outcome.result {
                warn!(dialect = %outcome.dialect, error = %e, "Dialect failed");
            }
        }
        info!(
            succeeded = outcomes.iter().filter(|o| o.is_ok()).count(),
            total = outcomes.len(),
            "Batch generation complete"
        );
        outcomes
    }

    /// README for `settings`, for callers assembling batches themselves.
    pub fn readme(
        &self,
        snapshot: &FileSystemSnapshot,
        settings: &GenerationSettings,
    ) -> GeneratedArtifact {
        self.readme.synthesize(snapshot, settings)
    }

    /// Ingest `root`, generate, and export. Returns the written locations.
    #[instrument(
        skip_all,
        fields(root = %root.as_ref().display(), dialect = %settings.dialect)
    )]
    pub fn scaffold(
        &self,
        root: impl AsRef<Path>,
        settings: &GenerationSettings,
        source: &dyn SnapshotSource,
        sink: &dyn ArtifactSink,
        options: &ExportOptions,
    ) -> TreescriptResult<Vec<PathBuf>> {
        let root = root.as_ref();

        // Fail before touching the disk.
        settings.validate()?;
        self.registry
            .resolve_for(settings.dialect, settings.platform)?;

        let snapshot = source.snapshot(root, settings)?;
        info!(
            directories = snapshot.directory_count(),
            files = snapshot.file_count(),
            "Snapshot taken"
        );

        let artifacts = self.generate(&snapshot, settings)?;
        let written = sink.export(&artifacts, options)?;

        info!(written = written.len(), "Scaffold exported");
        Ok(written)
    }
}
