//! Local filesystem exporter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use treescript_core::{
    application::{
        ApplicationError,
        ports::{ArtifactSink, ExportOptions},
    },
    domain::GeneratedArtifact,
    error::{TreescriptError, TreescriptResult},
};

/// Production exporter writing artifacts into one output directory.
#[derive(Debug, Clone)]
pub struct LocalExporter {
    output_dir: PathBuf,
}

impl LocalExporter {
    /// Create an exporter writing into `output_dir` (created on demand).
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn target(&self, artifact: &GeneratedArtifact) -> PathBuf {
        self.output_dir.join(artifact.file_name())
    }
}

impl ArtifactSink for LocalExporter {
    #[instrument(skip_all, fields(dir = %self.output_dir.display(), count = artifacts.len()))]
    fn export(
        &self,
        artifacts: &[GeneratedArtifact],
        options: &ExportOptions,
    ) -> TreescriptResult<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| map_io_error(&self.output_dir, e, "create directory"))?;

        let targets: Vec<PathBuf> = artifacts.iter().map(|a| self.target(a)).collect();

        // Nothing is written if any target conflicts.
        if !options.overwrite {
            if let Some(existing) = targets.iter().find(|path| path.exists()) {
                return Err(ApplicationError::OutputExists {
                    path: existing.clone(),
                }
                .into());
            }
        }

        for (artifact, path) in artifacts.iter().zip(&targets) {
            std::fs::write(path, artifact.content())
                .map_err(|e| map_io_error(path, e, "write file"))?;
            debug!(path = %path.display(), bytes = artifact.size(), "Artifact written");

            if artifact.is_script() {
                if let Err(e) = mark_executable(path) {
                    warn!(path = %path.display(), error = %e, "Could not mark script executable");
                }
            }
        }

        Ok(targets)
    }
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> TreescriptError {
    ApplicationError::Export {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use treescript_core::domain::{DialectId, GeneratedArtifact};

    fn artifacts() -> Vec<GeneratedArtifact> {
        vec![
            GeneratedArtifact::script(
                "scaffold",
                "#!/bin/bash\necho hi\n".into(),
                DialectId::Bash,
                "Linux",
                0,
                0,
            ),
            GeneratedArtifact::readme("README", "# Project\n".into()),
        ]
    }

    #[test]
    fn writes_artifacts_in_order() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let written = LocalExporter::new(&out)
            .export(&artifacts(), &ExportOptions::default())
            .unwrap();

        assert_eq!(written, vec![out.join("scaffold.sh"), out.join("README.md")]);
        assert_eq!(
            std::fs::read_to_string(&written[0]).unwrap(),
            "#!/bin/bash\necho hi\n"
        );
        assert_eq!(std::fs::read_to_string(&written[1]).unwrap(), "# Project\n");
    }

    #[cfg(unix)]
    #[test]
    fn scripts_are_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let written = LocalExporter::new(dir.path())
            .export(&artifacts(), &ExportOptions::default())
            .unwrap();

        let script_mode = std::fs::metadata(&written[0]).unwrap().permissions().mode();
        let readme_mode = std::fs::metadata(&written[1]).unwrap().permissions().mode();
        assert_eq!(script_mode & 0o777, 0o755);
        assert_eq!(readme_mode & 0o111, 0);
    }

    #[test]
    fn refuses_to_overwrite_without_option() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README.md"), "keep me").unwrap();

        let err = LocalExporter::new(dir.path())
            .export(&artifacts(), &ExportOptions::default())
            .unwrap_err();

        assert!(matches!(
            err,
            TreescriptError::Application(ApplicationError::OutputExists { .. })
        ));
        assert!(!dir.path().join("scaffold.sh").exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("README.md")).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn overwrites_when_asked() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README.md"), "old").unwrap();

        LocalExporter::new(dir.path())
            .export(&artifacts(), &ExportOptions { overwrite: true })
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("README.md")).unwrap(),
            "# Project\n"
        );
    }

    #[test]
    fn unwritable_target_is_an_export_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let err = LocalExporter::new(blocker.join("nested"))
            .export(&artifacts(), &ExportOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            TreescriptError::Application(ApplicationError::Export { .. })
        ));
    }
}
