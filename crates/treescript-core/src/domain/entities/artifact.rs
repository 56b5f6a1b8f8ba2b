//! Generated output units.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    registry,
    value_objects::{ArtifactRole, DialectId},
};

/// Format tag carried by README artifacts.
pub const MARKDOWN_FORMAT: &str = "markdown";

/// One generated script or companion document.
///
/// Fields are private; an artifact is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    id: Uuid,
    name: String,
    content: String,
    format: String,
    dialect: Option<DialectId>,
    platform: String,
    file_count: usize,
    directory_count: usize,
    size: usize,
    created_at: DateTime<Utc>,
    role: ArtifactRole,
}

impl GeneratedArtifact {
    /// A script artifact for `dialect`.
    pub fn script(
        name: impl Into<String>,
        content: String,
        dialect: DialectId,
        platform: impl Into<String>,
        file_count: usize,
        directory_count: usize,
    ) -> Self {
        Self::build(
            name.into(),
            content,
            dialect.as_str().to_string(),
            Some(dialect),
            platform.into(),
            file_count,
            directory_count,
            ArtifactRole::Script,
        )
    }

    /// A markdown README artifact.
    pub fn readme(name: impl Into<String>, content: String) -> Self {
        Self::build(
            name.into(),
            content,
            MARKDOWN_FORMAT.to_string(),
            None,
            "All".to_string(),
            1,
            0,
            ArtifactRole::Readme,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        name: String,
        content: String,
        format: String,
        dialect: Option<DialectId>,
        platform: String,
        file_count: usize,
        directory_count: usize,
        role: ArtifactRole,
    ) -> Self {
        let size = content.len();
        Self {
            id: Uuid::new_v4(),
            name,
            content,
            format,
            dialect,
            platform,
            file_count,
            directory_count,
            size,
            created_at: Utc::now(),
            role,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn dialect(&self) -> Option<DialectId> {
        self.dialect
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn file_count(&self) -> usize {
        self.file_count
    }

    pub fn directory_count(&self) -> usize {
        self.directory_count
    }

    /// Size of the content in bytes (UTF-8).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn role(&self) -> ArtifactRole {
        self.role
    }

    pub fn is_script(&self) -> bool {
        self.role == ArtifactRole::Script
    }

    /// File name used on export: `{name}{ext}` for scripts, `{name}.md`
    /// for READMEs.
    pub fn file_name(&self) -> String {
        match self.dialect {
            Some(dialect) if self.is_script() => {
                format!("{}{}", self.name, registry::descriptor(dialect).extension)
            }
            _ => format!("{}.md", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_artifact_records_size_and_counts() {
        let artifact = GeneratedArtifact::script(
            "scaffold",
            "echo hi\n".into(),
            DialectId::Bash,
            "Linux",
            3,
            2,
        );
        assert_eq!(artifact.size(), 8);
        assert_eq!(artifact.file_count(), 3);
        assert_eq!(artifact.directory_count(), 2);
        assert_eq!(artifact.format(), "bash");
        assert_eq!(artifact.file_name(), "scaffold.sh");
        assert!(artifact.is_script());
    }

    #[test]
    fn readme_uses_markdown_extension() {
        let artifact = GeneratedArtifact::readme("README", "# Hi".into());
        assert_eq!(artifact.file_name(), "README.md");
        assert_eq!(artifact.format(), MARKDOWN_FORMAT);
        assert_eq!(artifact.role(), ArtifactRole::Readme);
        assert_eq!(artifact.file_count(), 1);
    }

    #[test]
    fn ids_are_unique() {
        let a = GeneratedArtifact::readme("README", String::new());
        let b = GeneratedArtifact::readme("README", String::new());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn size_counts_utf8_bytes() {
        let artifact = GeneratedArtifact::readme("README", "├──".into());
        assert_eq!(artifact.size(), 9);
    }
}
