use crate::app::AppContext;
use crate::errors::CliError;
use crate::output::Message;

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let vault = ctx.open_vault()?;
    match vault.check_integrity() {
        Ok(()) => {
            Message::IntegrityOk.print(ctx.quiet());
            Ok(())
        }
        Err(err) => {
            eprintln!("Integrity check: FAILED");
            eprintln!("- error: {}", err);
            eprintln!("Hint: Restore from a backup before retrying.");
            Err(CliError::IntegrityFailed("Integrity check failed".to_string()).into())
        }
    }
}
