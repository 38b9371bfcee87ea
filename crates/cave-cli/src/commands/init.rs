use std::path::PathBuf;

use crate::app::{open_vault_at, resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_vault_path, write_config, CaveConfig};
use crate::errors::CliError;
use crate::output::Message;

/// Create the vault file and write a config pointing at it.
///
/// An existing vault is opened and left as is; an existing config is never
/// overwritten.
pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let vault_path = match args.path.as_ref().or(ctx.cli().vault.as_ref()) {
        Some(path) => PathBuf::from(path),
        None => default_vault_path()?,
    };
    let config_path = match &args.config_path {
        Some(path) => PathBuf::from(path),
        None => resolve_config_path()?,
    };
    if config_path.exists() {
        return Err(CliError::InvalidInput(format!(
            "Config already exists at {}",
            config_path.display()
        ))
        .into());
    }

    if let Some(parent) = vault_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create vault directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }

    let mut config = CaveConfig::new(&vault_path);
    config.permissions.super_admins = args.admins.clone();

    let vault = open_vault_at(&vault_path, &config)?;
    vault.check_integrity()?;
    write_config(&config_path, &config)?;

    let quiet = ctx.quiet();
    Message::Initialized { path: &vault_path }.print(quiet);
    Message::ConfigWritten { path: &config_path }.print(quiet);
    Ok(())
}
