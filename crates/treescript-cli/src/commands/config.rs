//! `treescript config`: inspect configuration values.

use std::path::PathBuf;

use serde_json::Value;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    config_file: Option<PathBuf>,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.raw(&format!("{value}\n"))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.raw(&serialised)?;
        }

        ConfigCommands::Path => {
            let path = AppConfig::active_path(config_file.as_ref());
            output.raw(&format!("{}\n", path.display()))?;
            if !path.exists() {
                output.warning("File does not exist yet; run `treescript init`")?;
            }
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Look up a dotted key (`defaults.dialect`) in the serialised config.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let root = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    let found = key
        .split('.')
        .try_fold(&root, |node, part| node.get(part))
        .ok_or_else(|| CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        })?;

    Ok(match found {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "defaults.dialect").unwrap(), "bash");
        assert_eq!(
            get_config_value(&cfg, "defaults.script_name").unwrap(),
            "scaffold"
        );
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn get_bool_and_list_values() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "output.no_color").unwrap(), "false");
        let types = get_config_value(&cfg, "ingestion.supported_file_types").unwrap();
        assert!(types.starts_with(".sh,.bash"));
    }

    #[test]
    fn unset_log_directory_is_empty() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "logging.directory").unwrap(), "");
    }
}
