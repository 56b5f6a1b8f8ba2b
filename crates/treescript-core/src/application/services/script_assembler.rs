//! Script Assembler - one script artifact per (snapshot, settings).
//!
//! Layout of every generated script:
//! 1. Header: shebang (unless the scope ignores it) and prelude
//! 2. Optional comment banner
//! 3. Directory block, parents before children
//! 4. File block, in snapshot order (skipped for `directories_only`)
//! 5. Completion message
//!
//! Any failure aborts the whole artifact; no partial script is returned.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, instrument};

use crate::{
    application::ApplicationError,
    domain::{
        DialectDescriptor, DomainValidator as validator, FileSystemSnapshot, FormatRegistry,
        GeneratedArtifact, GenerationSettings, encoding, paths,
    },
    error::TreescriptResult,
};

/// Final line printed by every generated script.
pub const COMPLETION_MESSAGE: &str = "Project structure created successfully!";

const BANNER_RULE: &str = "==================================================";

/// Builds script artifacts from snapshots.
#[derive(Debug, Clone, Copy)]
pub struct ScriptAssembler {
    registry: &'static FormatRegistry,
}

impl Default for ScriptAssembler {
    fn default() -> Self {
        Self::new(FormatRegistry::builtin())
    }
}

impl ScriptAssembler {
    pub fn new(registry: &'static FormatRegistry) -> Self {
        Self { registry }
    }

    /// Assemble a script stamped with the current time.
    pub fn assemble(
        &self,
        snapshot: &FileSystemSnapshot,
        settings: &GenerationSettings,
    ) -> TreescriptResult<GeneratedArtifact> {
        self.assemble_at(snapshot, settings, Utc::now())
    }

    /// Assemble a script stamped with `generated_at`.
    ///
    /// Output is a pure function of the three arguments.
    #[instrument(
        skip_all,
        fields(
            dialect = %settings.dialect,
            platform = %settings.platform,
            directories = snapshot.directory_count(),
            files = snapshot.file_count()
        )
    )]
    pub fn assemble_at(
        &self,
        snapshot: &FileSystemSnapshot,
        settings: &GenerationSettings,
        generated_at: DateTime<Utc>,
    ) -> TreescriptResult<GeneratedArtifact> {
        let descriptor = validator::validate_settings(self.registry, settings)?;
        validator::validate_snapshot(snapshot)?;

        let mut script = ScriptWriter::new(descriptor);

        script.header(settings);
        if settings.add_comments {
            script.banner(snapshot, settings, generated_at);
        }
        let directories = script.directory_block(snapshot, settings);
        let files = if settings.directories_only {
            0
        } else {
            script.file_block(snapshot, settings)?
        };
        script.push(descriptor.syntax.completion(COMPLETION_MESSAGE));

        check_counts(descriptor, "directory", snapshot.directory_count(), directories)?;
        if !settings.directories_only {
            check_counts(descriptor, "file", snapshot.file_count(), files)?;
        }

        let content = script.finish();
        debug!(bytes = content.len(), "Script assembled");

        Ok(GeneratedArtifact::script(
            settings.script_name.clone(),
            content,
            descriptor.id,
            settings.platform.label(),
            snapshot.file_count(),
            snapshot.directory_count(),
        ))
    }
}

fn check_counts(
    descriptor: &DialectDescriptor,
    kind: &'static str,
    expected: usize,
    emitted: usize,
) -> TreescriptResult<()> {
    if expected == emitted {
        return Ok(());
    }
    Err(ApplicationError::StructuralInvariant {
        dialect: descriptor.id.as_str().to_string(),
        kind,
        expected,
        emitted,
    }
    .into())
}

fn is_statement(line: &str) -> bool {
    !line.trim().is_empty()
}

// ── ScriptWriter ─────────────────────────────────────────────────────────────

/// Line buffer for one script; joined with the dialect's terminator at the end.
struct ScriptWriter {
    descriptor: &'static DialectDescriptor,
    lines: Vec<String>,
}

impl ScriptWriter {
    fn new(descriptor: &'static DialectDescriptor) -> Self {
        Self {
            descriptor,
            lines: Vec::new(),
        }
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn comment(&mut self, text: &str) {
        let line = self.descriptor.comment_line(text);
        self.lines.push(line);
    }

    fn header(&mut self, settings: &GenerationSettings) {
        if let Some(shebang) = self.descriptor.shebang {
            if settings.platform.honours_shebang() {
                self.push(shebang);
            }
        }
        for line in self.descriptor.prelude {
            self.push(*line);
        }
        self.blank();
    }

    fn banner(
        &mut self,
        snapshot: &FileSystemSnapshot,
        settings: &GenerationSettings,
        generated_at: DateTime<Utc>,
    ) {
        let contents = if settings.include_content && !settings.directories_only {
            "included"
        } else {
            "not included"
        };

        self.comment(BANNER_RULE);
        self.comment("Scaffold script generated by treescript");
        self.comment(&format!(
            "Generated: {}",
            generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        self.comment(&format!("Source: {}", snapshot.root().display()));
        self.comment(&format!("Platform: {}", settings.platform.label()));
        self.comment(&format!("Dialect: {}", self.descriptor.display_name));
        self.comment(&format!("Directories: {}", snapshot.directory_count()));
        self.comment(&format!("Files: {}", snapshot.file_count()));
        self.comment(&format!("File contents: {contents}"));
        self.comment(BANNER_RULE);
        self.blank();
    }

    /// Emit one mkdir per directory, shallowest first. Returns how many
    /// statements were emitted.
    fn directory_block(
        &mut self,
        snapshot: &FileSystemSnapshot,
        settings: &GenerationSettings,
    ) -> usize {
        if snapshot.directories().is_empty() {
            return 0;
        }

        let mut ordered: Vec<_> = snapshot.directories().iter().collect();
        ordered.sort_by(|a, b| {
            a.depth()
                .cmp(&b.depth())
                .then_with(|| a.relative_path.cmp(&b.relative_path))
        });

        if settings.add_comments {
            self.comment("Create directories");
        }
        let mut emitted = 0;
        for dir in &ordered {
            let path = paths::normalize(&dir.relative_path, self.descriptor.id);
            let line = self.descriptor.syntax.create_directory(&path);
            if is_statement(&line) {
                emitted += 1;
            }
            self.push(line);
        }
        self.blank();
        emitted
    }

    /// Emit one write (or create) per file in snapshot order. Returns how
    /// many files got a statement.
    fn file_block(
        &mut self,
        snapshot: &FileSystemSnapshot,
        settings: &GenerationSettings,
    ) -> TreescriptResult<usize> {
        if snapshot.files().is_empty() {
            return Ok(0);
        }

        if settings.add_comments {
            self.comment("Create files");
        }
        let dialect = self.descriptor.id;
        let mut emitted = 0;
        for file in snapshot.files() {
            let path = paths::normalize(&file.relative_path, dialect);
            let lines = match file.embeddable_content() {
                Some(content) if settings.include_content => {
                    encoding::encode_file_write(&path, content, dialect)?
                }
                _ => vec![encoding::encode_empty_file(&path, dialect)],
            };
            if lines.iter().any(|line| is_statement(line)) {
                emitted += 1;
            }
            self.lines.extend(lines);
        }
        self.blank();
        Ok(emitted)
    }

    fn finish(self) -> String {
        let terminator = self.descriptor.line_ending.as_str();
        let mut out = self.lines.join(terminator);
        out.push_str(terminator);
        out
    }
}
