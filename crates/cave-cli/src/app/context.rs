//! Application context for the Cave CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config so handlers do not
//! reload it or thread several parameters around.

use std::path::{Path, PathBuf};

use once_cell::unsync::OnceCell;

use cave_core::{SqliteStore, Vault};

use crate::cli::Cli;
use crate::config::CaveConfig;
use crate::errors::CliError;

use super::resolver::{load_config, missing_vault_message};

/// Account used when `--as` is not given.
const DEFAULT_ACCOUNT: i64 = 0;

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<CaveConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The account the caller acts as.
    pub fn account(&self) -> i64 {
        self.cli.account.unwrap_or(DEFAULT_ACCOUNT)
    }

    /// Get the configuration, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<&CaveConfig> {
        self.config.get_or_try_init(|| load_config(self.cli))
    }

    /// Whether the calling account may remove any entry.
    pub fn is_privileged(&self) -> anyhow::Result<bool> {
        Ok(self.config()?.is_super_admin(self.account()))
    }

    pub fn vault_path(&self) -> anyhow::Result<PathBuf> {
        Ok(PathBuf::from(&self.config()?.vault.path))
    }

    /// Open the configured vault. The file must already exist.
    pub fn open_vault(&self) -> anyhow::Result<Vault<SqliteStore>> {
        let config = self.config()?;
        let path = self.vault_path()?;
        if !path.exists() {
            return Err(CliError::not_found(
                format!("Vault file {} does not exist", path.display()),
                missing_vault_message(&path),
            )
            .into());
        }
        open_vault_at(&path, config)
    }
}

/// Open (creating if needed) the vault at `path` with the config's settings.
pub fn open_vault_at(path: &Path, config: &CaveConfig) -> anyhow::Result<Vault<SqliteStore>> {
    let store = SqliteStore::open_with(path, config.store.clone())?;
    tracing::debug!(path = %path.display(), "vault opened");
    Ok(Vault::new(store, config.limits.clone()))
}
