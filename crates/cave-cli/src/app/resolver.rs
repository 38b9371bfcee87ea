//! Path resolution for config and vault files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, read_config, CaveConfig};
use crate::errors::CliError;

/// Resolve the config file path, checking CAVE_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("CAVE_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the effective config.
///
/// A `--vault` path overrides the configured one. Without a config file the
/// defaults apply, but only if a vault path was given on the command line.
pub fn load_config(cli: &Cli) -> anyhow::Result<CaveConfig> {
    let config_path = resolve_config_path()?;
    if config_path.exists() {
        let mut config = read_config(&config_path)?;
        if let Some(path) = &cli.vault {
            config.vault.path = path.clone();
        }
        return Ok(config);
    }

    match &cli.vault {
        Some(path) => Ok(CaveConfig::new(Path::new(path))),
        None => Err(CliError::not_found(
            format!("No config found at {}", config_path.display()),
            missing_config_message(),
        )
        .into()),
    }
}

/// Hint shown when a vault file is missing.
pub fn missing_vault_message(path: &Path) -> String {
    format!(
        "No vault found at {}\n\nRun:\n  cave init\n\nOr specify a vault path:\n  CAVE_PATH=/path/to/my.cave cave init",
        path.display()
    )
}

/// Hint shown when no config file exists.
pub fn missing_config_message() -> String {
    "Run:\n  cave init\n\nOr specify a vault path:\n  cave --vault /path/to/my.cave <COMMAND>".to_string()
}
