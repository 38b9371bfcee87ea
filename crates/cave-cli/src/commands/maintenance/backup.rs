use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::cli::BackupArgs;
use crate::errors::CliError;
use crate::output::Message;

/// Resolve links and relative parts of a path that may not exist yet.
fn resolve(path: &Path) -> Option<PathBuf> {
    if let Ok(resolved) = std::fs::canonicalize(path) {
        return Some(resolved);
    }
    let name = path.file_name()?;
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::canonicalize(parent).ok().map(|dir| dir.join(name))
}

pub fn handle_backup(ctx: &AppContext, args: &BackupArgs) -> anyhow::Result<()> {
    let vault = ctx.open_vault()?;
    let destination = Path::new(&args.destination);
    let vault_path = ctx.vault_path()?;
    let same_file = destination == vault_path.as_path()
        || matches!(
            (resolve(destination), resolve(&vault_path)),
            (Some(dest), Some(source)) if dest == source
        );
    if same_file {
        return Err(CliError::InvalidInput(
            "Backup destination is the vault itself".to_string(),
        )
        .into());
    }

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create backup directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }

    vault.backup(destination)?;

    let written = std::fs::metadata(destination)
        .map(|meta| meta.len())
        .unwrap_or(0);
    if written == 0 {
        return Err(anyhow::anyhow!("Backup failed: zero bytes written"));
    }
    Message::BackedUp { destination }.print(ctx.quiet());
    Ok(())
}
