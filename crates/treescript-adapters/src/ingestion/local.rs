//! Local directory walker using `walkdir`.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, trace, warn};
use walkdir::{DirEntry, WalkDir};

use treescript_core::{
    application::{ApplicationError, ports::SnapshotSource},
    domain::{FileEntry, FileSystemSnapshot, GenerationSettings},
    error::TreescriptResult,
};

use super::rules;

/// Production snapshot source walking the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSnapshotSource {
    follow_links: bool,
}

impl LocalSnapshotSource {
    /// Create a new local snapshot source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow symbolic links while walking.
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }
}

impl SnapshotSource for LocalSnapshotSource {
    #[instrument(skip_all, fields(root = %root.display()))]
    fn snapshot(
        &self,
        root: &Path,
        settings: &GenerationSettings,
    ) -> TreescriptResult<FileSystemSnapshot> {
        if !root.is_dir() {
            return Err(ApplicationError::SourceNotFound {
                path: root.to_path_buf(),
            }
            .into());
        }
        settings.validate_allowlist()?;

        let mut snapshot = FileSystemSnapshot::new(root);
        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(self.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_skipped(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(ApplicationError::Ingestion {
                        path: root.to_path_buf(),
                        reason: e.to_string(),
                    }
                    .into());
                }
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            let Some(relative) = relative_path(root, entry.path()) else {
                continue;
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                snapshot.add_directory(relative);
            } else if file_type.is_file() {
                if let Some(file) = read_file_entry(&entry, relative, settings) {
                    snapshot.add_file(file);
                }
            }
        }

        debug!(
            directories = snapshot.directory_count(),
            files = snapshot.file_count(),
            bytes = snapshot.total_size(),
            "Directory scanned"
        );
        Ok(snapshot)
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if rules::has_line_break(&name) {
        warn!(path = %entry.path().display(), "Skipping entry with a line break in its name");
        return true;
    }
    entry.file_type().is_dir() && rules::should_skip_directory(&name)
}

/// `root`-relative path with `/` separators.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    (!joined.is_empty()).then_some(joined)
}

fn read_file_entry(
    entry: &DirEntry,
    relative: String,
    settings: &GenerationSettings,
) -> Option<FileEntry> {
    let name = entry.file_name().to_string_lossy();
    if !rules::should_include_file(&name, settings) {
        trace!(path = %relative, "Filtered out");
        return None;
    }

    let metadata = match entry.metadata() {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!(path = %relative, error = %e, "Skipping file without metadata");
            return None;
        }
    };

    let mut file = FileEntry::new(relative, metadata.len());
    file.last_modified = metadata.modified().ok().map(DateTime::<Utc>::from);

    if settings.include_content
        && !settings.directories_only
        && rules::is_text_extension(&file.extension)
    {
        match fs::read_to_string(entry.path()) {
            Ok(content) => file.content = Some(content),
            Err(e) => warn!(path = %file.relative_path, error = %e, "Content not readable, file left empty"),
        }
    }

    Some(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join(".cache")).unwrap();
        fs::write(root.join("src/main.sh"), "echo hi\n").unwrap();
        fs::write(root.join("src/nested/tool.py"), "print('x')\n").unwrap();
        fs::write(root.join("src/notes.txt"), "notes\n").unwrap();
        fs::write(root.join("logo.png"), [0u8, 1, 2]).unwrap();
        fs::write(root.join("Cargo.toml"), "[package]\n").unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "x").unwrap();
        dir
    }

    fn paths(snapshot: &FileSystemSnapshot) -> (Vec<&str>, Vec<&str>) {
        (
            snapshot
                .directories()
                .iter()
                .map(|d| d.relative_path.as_str())
                .collect(),
            snapshot
                .files()
                .iter()
                .map(|f| f.relative_path.as_str())
                .collect(),
        )
    }

    #[test]
    fn walks_sorted_and_skips_noise() {
        let dir = tree();
        let snapshot = LocalSnapshotSource::new()
            .snapshot(dir.path(), &GenerationSettings::default())
            .unwrap();
        let (dirs, files) = paths(&snapshot);

        assert_eq!(dirs, vec!["src", "src/nested"]);
        assert_eq!(files, vec!["Cargo.toml", "src/main.sh", "src/nested/tool.py"]);
        assert!(snapshot.files().iter().all(|f| f.content.is_none()));
        assert!(snapshot.files().iter().all(|f| f.last_modified.is_some()));
    }

    #[test]
    fn reads_text_content_when_requested() {
        let dir = tree();
        let settings = GenerationSettings {
            include_content: true,
            ..Default::default()
        };
        let snapshot = LocalSnapshotSource::new()
            .snapshot(dir.path(), &settings)
            .unwrap();
        let main = snapshot
            .files()
            .iter()
            .find(|f| f.name == "main.sh")
            .unwrap();
        assert_eq!(main.content.as_deref(), Some("echo hi\n"));
    }

    #[test]
    fn directories_only_keeps_every_non_binary_file() {
        let dir = tree();
        let settings = GenerationSettings {
            directories_only: true,
            include_content: true,
            ..Default::default()
        };
        let snapshot = LocalSnapshotSource::new()
            .snapshot(dir.path(), &settings)
            .unwrap();
        let (_, files) = paths(&snapshot);

        assert!(files.contains(&"src/notes.txt"));
        assert!(!files.contains(&"logo.png"));
        assert!(snapshot.files().iter().all(|f| f.content.is_none()));
    }

    #[test]
    fn total_size_sums_kept_files() {
        let dir = tree();
        let snapshot = LocalSnapshotSource::new()
            .snapshot(dir.path(), &GenerationSettings::default())
            .unwrap();
        let expected: u64 = snapshot.files().iter().map(|f| f.size).sum();
        assert_eq!(snapshot.total_size(), expected);
        assert!(expected > 0);
    }

    #[cfg(unix)]
    #[test]
    fn colon_names_are_kept_and_line_break_names_skipped() {
        let dir = tree();
        fs::write(dir.path().join("src/notes:2024.sh"), "echo\n").unwrap();
        fs::write(dir.path().join("src/a\nb.sh"), "echo\n").unwrap();
        fs::create_dir(dir.path().join("odd\rdir")).unwrap();
        fs::write(dir.path().join("odd\rdir/x.sh"), "echo\n").unwrap();

        let snapshot = LocalSnapshotSource::new()
            .snapshot(dir.path(), &GenerationSettings::default())
            .unwrap();
        let (dirs, files) = paths(&snapshot);

        assert!(files.contains(&"src/notes:2024.sh"));
        assert!(files.iter().all(|f| !f.contains(['\n', '\r'])));
        assert!(dirs.iter().all(|d| !d.contains('\r')));
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn missing_root_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = LocalSnapshotSource::new()
            .snapshot(&dir.path().join("nope"), &GenerationSettings::default())
            .unwrap_err();
        assert!(matches!(
            err,
            treescript_core::error::TreescriptError::Application(
                ApplicationError::SourceNotFound { .. }
            )
        ));
    }

    #[test]
    fn empty_allowlist_is_rejected() {
        let dir = tree();
        let settings = GenerationSettings {
            supported_file_types: Vec::new(),
            ..Default::default()
        };
        assert!(
            LocalSnapshotSource::new()
                .snapshot(dir.path(), &settings)
                .is_err()
        );
    }
}
