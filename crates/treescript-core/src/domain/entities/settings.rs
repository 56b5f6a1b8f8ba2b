//! Generation settings and their builder.
//!
//! `GenerationSettings` is validated once before any statement is emitted;
//! assembly assumes a validated value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{DialectId, PlatformScope},
};

/// Extensions kept by ingestion when the caller supplies no allowlist.
pub const DEFAULT_SUPPORTED_FILE_TYPES: &[&str] = &[
    ".sh", ".bash", ".ps1", ".bat", ".cmd", ".py", ".py3", ".js", ".mjs", ".ts", ".rb", ".pl",
    ".fish", ".zsh",
];

/// Base name used for the generated script when none is given.
pub const DEFAULT_SCRIPT_NAME: &str = "scaffold";

/// Options controlling one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub dialect: DialectId,
    pub platform: PlatformScope,
    pub include_content: bool,
    pub directories_only: bool,
    pub add_comments: bool,
    pub include_readme: bool,
    pub script_name: String,
    /// Reserved. Keys are validated; values are never interpolated.
    pub template_variables: BTreeMap<String, String>,
    /// Consumed by ingestion only.
    pub supported_file_types: Vec<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            dialect: DialectId::Bash,
            platform: PlatformScope::Linux,
            include_content: false,
            directories_only: false,
            add_comments: true,
            include_readme: true,
            script_name: DEFAULT_SCRIPT_NAME.to_string(),
            template_variables: BTreeMap::new(),
            supported_file_types: DEFAULT_SUPPORTED_FILE_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl GenerationSettings {
    pub fn builder() -> GenerationSettingsBuilder {
        GenerationSettingsBuilder::default()
    }

    /// Copy of these settings retargeted at another dialect.
    pub fn for_dialect(&self, dialect: DialectId) -> Self {
        Self {
            dialect,
            ..self.clone()
        }
    }

    /// Validate everything that does not need the registry.
    ///
    /// Dialect/platform compatibility is checked by the registry itself.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !is_valid_script_name(&self.script_name) {
            return Err(DomainError::InvalidScriptName {
                name: self.script_name.clone(),
            });
        }

        for key in self.template_variables.keys() {
            if !is_valid_script_name(key) {
                return Err(DomainError::InvalidSettings(format!(
                    "template variable key '{key}' must match [A-Za-z0-9_-]+"
                )));
            }
        }

        Ok(())
    }

    /// Ingestion-side check: filtering by file type needs a non-empty list.
    pub fn validate_allowlist(&self) -> Result<(), DomainError> {
        if !self.directories_only && self.supported_file_types.is_empty() {
            return Err(DomainError::InvalidSettings(
                "supported file type allowlist is empty".into(),
            ));
        }
        Ok(())
    }
}

/// `[A-Za-z0-9_-]+`
pub fn is_valid_script_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Fluent builder over [`GenerationSettings::default`].
#[derive(Debug, Clone, Default)]
pub struct GenerationSettingsBuilder {
    settings: GenerationSettings,
}

impl GenerationSettingsBuilder {
    pub fn dialect(mut self, dialect: DialectId) -> Self {
        self.settings.dialect = dialect;
        self
    }

    pub fn platform(mut self, platform: PlatformScope) -> Self {
        self.settings.platform = platform;
        self
    }

    pub fn include_content(mut self, yes: bool) -> Self {
        self.settings.include_content = yes;
        self
    }

    pub fn directories_only(mut self, yes: bool) -> Self {
        self.settings.directories_only = yes;
        self
    }

    pub fn add_comments(mut self, yes: bool) -> Self {
        self.settings.add_comments = yes;
        self
    }

    pub fn include_readme(mut self, yes: bool) -> Self {
        self.settings.include_readme = yes;
        self
    }

    pub fn script_name(mut self, name: impl Into<String>) -> Self {
        self.settings.script_name = name.into();
        self
    }

    pub fn variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings
            .template_variables
            .insert(key.into(), value.into());
        self
    }

    pub fn supported_file_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.supported_file_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Finish and validate.
    pub fn build(self) -> Result<GenerationSettings, DomainError> {
        self.settings.validate()?;
        Ok(self.settings)
    }
}
