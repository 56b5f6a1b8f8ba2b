//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `TREESCRIPT_*` environment variables (`TREESCRIPT_DEFAULTS__DIALECT=zsh`)
//! 3. `.treescript.toml` in the current directory
//! 4. The user config file (or the file given with `--config`)
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use treescript_core::domain::{DEFAULT_SCRIPT_NAME, DEFAULT_SUPPORTED_FILE_TYPES};

/// File name of the per-project config.
pub const LOCAL_CONFIG_FILE: &str = ".treescript.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default generation settings.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Directory scanning settings.
    pub ingestion: IngestionConfig,
    /// Log file settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub dialect: String,
    pub platform: String,
    pub include_content: bool,
    pub add_comments: bool,
    pub include_readme: bool,
    pub script_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    pub supported_file_types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// When set, logs are also written to daily files in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            dialect: "bash".into(),
            platform: "linux".into(),
            include_content: false,
            add_comments: true,
            include_readme: true,
            script_name: DEFAULT_SCRIPT_NAME.into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            supported_file_types: DEFAULT_SUPPORTED_FILE_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path passed via `--config`; it must exist. Without
    /// it the user config file and a local `.treescript.toml` are read when
    /// present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let toml_file =
            |path: &Path, required: bool| File::from(path).format(FileFormat::Toml).required(required);
        let mut builder = Config::builder();

        match config_file {
            Some(path) => {
                builder = builder.add_source(toml_file(path, true));
            }
            None => {
                builder = builder
                    .add_source(toml_file(&Self::config_path(), false))
                    .add_source(toml_file(Path::new(LOCAL_CONFIG_FILE), false));
            }
        }

        let settings = builder
            .add_source(
                Environment::with_prefix("TREESCRIPT")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("ingestion.supported_file_types")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration sources")?;

        settings
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.treescript.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "treescript", "treescript")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Path `config path` reports: the explicit file, else the first existing
    /// of local and user config, else the user config location.
    pub fn active_path(config_file: Option<&PathBuf>) -> PathBuf {
        if let Some(path) = config_file {
            return path.clone();
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            local
        } else {
            Self::config_path()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_dialect_is_bash() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.dialect, "bash");
        assert_eq!(cfg.defaults.platform, "linux");
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[defaults]\ndialect = \"zsh\"\nplatform = \"macos\"\n\n[logging]\ndirectory = \"/tmp/ts-logs\""
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(cfg.defaults.dialect, "zsh");
        assert_eq!(cfg.defaults.platform, "macos");
        assert!(cfg.defaults.add_comments);
        assert_eq!(cfg.logging.directory, Some(PathBuf::from("/tmp/ts-logs")));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let missing = PathBuf::from("/definitely/not/here/treescript.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn config_path_is_non_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
