use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use cave_core::{StoreOptions, VaultLimits};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaveConfig {
    /// Lines appended at random to the confirmation of a new entry
    #[serde(default)]
    pub quotes: Vec<String>,
    pub vault: VaultSection,
    #[serde(default)]
    pub store: StoreOptions,
    #[serde(default)]
    pub limits: VaultLimits,
    #[serde(default)]
    pub permissions: PermissionsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultSection {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PermissionsSection {
    /// Accounts allowed to remove any entry
    #[serde(default)]
    pub super_admins: Vec<i64>,
}

impl CaveConfig {
    pub fn new(vault_path: &Path) -> Self {
        Self {
            quotes: Vec::new(),
            vault: VaultSection {
                path: vault_path.to_string_lossy().to_string(),
            },
            store: StoreOptions::default(),
            limits: VaultLimits::default(),
            permissions: PermissionsSection::default(),
        }
    }

    pub fn is_super_admin(&self, account: i64) -> bool {
        self.permissions.super_admins.contains(&account)
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_vault_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("vault.cave"))
}

pub fn read_config(path: &Path) -> anyhow::Result<CaveConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &CaveConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("cave"));
        }
    }
    Ok(home_dir()?.join(".config").join("cave"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("cave"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("cave"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
