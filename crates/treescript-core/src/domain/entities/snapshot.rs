//! Immutable description of a directory tree.
//!
//! A [`FileSystemSnapshot`] is produced once by an ingestion adapter and then
//! only read. Paths are relative and always use `/` as the separator,
//! regardless of the host that walked the tree.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Materialized view of a directory tree, ready for script generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSystemSnapshot {
    pub(crate) root: PathBuf,
    pub(crate) directories: Vec<DirectoryEntry>,
    pub(crate) files: Vec<FileEntry>,
    pub(crate) total_size: u64,
}

impl FileSystemSnapshot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            directories: Vec::new(),
            files: Vec::new(),
            total_size: 0,
        }
    }

    pub fn add_directory(&mut self, relative_path: impl Into<String>) {
        self.directories
            .push(DirectoryEntry::new(canonical(relative_path.into())));
    }

    /// Record a file; the snapshot's total size grows by the entry's size.
    pub fn add_file(&mut self, entry: FileEntry) {
        self.total_size += entry.size;
        self.files.push(entry);
    }

    pub fn with_directory(mut self, relative_path: impl Into<String>) -> Self {
        self.add_directory(relative_path);
        self
    }

    pub fn with_file(mut self, entry: FileEntry) -> Self {
        self.add_file(entry);
        self
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn directories(&self) -> &[DirectoryEntry] {
        &self.directories
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Check that every path is relative, non-empty, free of `..` and unique.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        let paths = self
            .directories
            .iter()
            .map(|d| d.relative_path.as_str())
            .chain(self.files.iter().map(|f| f.relative_path.as_str()));

        for path in paths {
            if path.is_empty() {
                return Err(DomainError::InvalidSnapshot("entry with empty path".into()));
            }
            if path.starts_with('/') || has_drive_prefix(path) {
                return Err(DomainError::AbsolutePathNotAllowed { path: path.into() });
            }
            // No dialect can quote a line break inside a path on one line.
            if path.contains(['\n', '\r']) {
                return Err(DomainError::InvalidSnapshot(format!(
                    "path {path:?} contains a line break"
                )));
            }
            if path.split('/').any(|segment| segment == ".." || segment.is_empty()) {
                return Err(DomainError::InvalidSnapshot(format!(
                    "path '{path}' must not contain empty or '..' segments"
                )));
            }
            if !seen.insert(path) {
                return Err(DomainError::DuplicatePath { path: path.into() });
            }
        }

        Ok(())
    }
}

/// `C:` or `C:/...`. A colon elsewhere is a legal POSIX file name character.
fn has_drive_prefix(path: &str) -> bool {
    let first = path.split('/').next().unwrap_or(path);
    matches!(first.as_bytes(), [letter, b':'] if letter.is_ascii_alphabetic())
}

/// A directory inside the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub relative_path: String,
    pub parent_path: String,
}

impl DirectoryEntry {
    pub fn new(relative_path: impl Into<String>) -> Self {
        let relative_path = canonical(relative_path.into());
        let (parent_path, name) = split_parent(&relative_path);
        Self {
            name,
            relative_path,
            parent_path,
        }
    }

    /// Number of separators in the path; top-level entries have depth 0.
    pub fn depth(&self) -> usize {
        self.relative_path.matches('/').count()
    }
}

/// A file inside the snapshot.
///
/// `content` is only ever populated for text files when content inclusion
/// was requested during ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub relative_path: String,
    pub parent_path: String,
    pub size: u64,
    pub extension: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub content: Option<String>,
}

impl FileEntry {
    pub fn new(relative_path: impl Into<String>, size: u64) -> Self {
        let relative_path = canonical(relative_path.into());
        let (parent_path, name) = split_parent(&relative_path);
        let extension = extension_of(&name);
        Self {
            name,
            relative_path,
            parent_path,
            size,
            extension,
            last_modified: None,
            content: None,
        }
    }

    /// File entry carrying text content; size is taken from the content.
    pub fn with_content(relative_path: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let mut entry = Self::new(relative_path, content.len() as u64);
        entry.content = Some(content);
        entry
    }

    pub fn modified_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_modified = Some(at);
        self
    }

    /// Content worth embedding: present and non-empty.
    pub fn embeddable_content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}

/// Lower-cased extension with its leading dot, or empty when there is none.
///
/// Dotfiles such as `.gitignore` report their whole name, matching how the
/// ingestion allowlists are written.
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(0) => name.to_ascii_lowercase(),
        Some(idx) => name[idx..].to_ascii_lowercase(),
        None => String::new(),
    }
}

fn canonical(path: String) -> String {
    let path = path.replace('\\', "/");
    path.trim_start_matches("./").trim_end_matches('/').to_string()
}

fn split_parent(path: &str) -> (String, String) {
    match path.rsplit_once('/') {
        Some((parent, name)) => (parent.to_string(), name.to_string()),
        None => (String::new(), path.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_entry_derives_name_parent_and_extension() {
        let entry = FileEntry::new("src/lib/Main.RS", 12);
        assert_eq!(entry.name, "Main.RS");
        assert_eq!(entry.parent_path, "src/lib");
        assert_eq!(entry.extension, ".rs");
    }

    #[test]
    fn dotfile_extension_is_whole_name() {
        assert_eq!(extension_of(".gitignore"), ".gitignore");
        assert_eq!(extension_of("Makefile"), "");
    }

    #[test]
    fn backslashes_are_canonicalized() {
        let dir = DirectoryEntry::new("src\\nested\\");
        assert_eq!(dir.relative_path, "src/nested");
        assert_eq!(dir.name, "nested");
        assert_eq!(dir.depth(), 1);
    }

    #[test]
    fn total_size_accumulates() {
        let snapshot = FileSystemSnapshot::new("/tmp/p")
            .with_file(FileEntry::new("a.txt", 10))
            .with_file(FileEntry::with_content("b.txt", "hello"));
        assert_eq!(snapshot.total_size(), 15);
        assert_eq!(snapshot.file_count(), 2);
    }

    #[test]
    fn validate_rejects_duplicates() {
        let snapshot = FileSystemSnapshot::new("/tmp/p")
            .with_directory("src")
            .with_directory("src");
        assert!(matches!(
            snapshot.validate(),
            Err(DomainError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn validate_rejects_parent_traversal() {
        let snapshot = FileSystemSnapshot::new("/tmp/p").with_file(FileEntry::new("../x", 1));
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn validate_rejects_absolute() {
        let snapshot = FileSystemSnapshot::new("/tmp/p").with_directory("C:/Windows");
        assert!(matches!(
            snapshot.validate(),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn colons_inside_names_are_allowed() {
        let snapshot = FileSystemSnapshot::new("/tmp/p")
            .with_directory("logs")
            .with_file(FileEntry::new("notes:2024.txt", 1))
            .with_file(FileEntry::new("logs/a:b", 1));
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn validate_rejects_drive_prefix_only_on_first_segment() {
        for path in ["C:", "c:/x", "Z:/a/b.txt"] {
            let snapshot = FileSystemSnapshot::new("/tmp/p").with_file(FileEntry::new(path, 1));
            assert!(
                matches!(
                    snapshot.validate(),
                    Err(DomainError::AbsolutePathNotAllowed { .. })
                ),
                "{path}"
            );
        }
    }

    #[test]
    fn validate_rejects_line_breaks_in_paths() {
        for path in ["a\nb.txt", "dir\r/x"] {
            let snapshot = FileSystemSnapshot::new("/tmp/p").with_file(FileEntry::new(path, 1));
            assert!(
                matches!(snapshot.validate(), Err(DomainError::InvalidSnapshot(_))),
                "{path:?}"
            );
        }
    }

    #[test]
    fn empty_snapshot_is_valid() {
        assert!(FileSystemSnapshot::new("/tmp/p").validate().is_ok());
    }

    #[test]
    fn empty_content_is_not_embeddable() {
        let entry = FileEntry::with_content("a.txt", "");
        assert!(entry.embeddable_content().is_none());
    }
}
