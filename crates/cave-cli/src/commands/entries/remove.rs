use crate::app::AppContext;
use crate::cli::RemoveArgs;
use crate::output::Message;

pub fn handle_remove(ctx: &AppContext, args: &RemoveArgs) -> anyhow::Result<()> {
    let vault = ctx.open_vault()?;
    let id = vault.remove(&args.id, ctx.account(), ctx.is_privileged()?)?;
    Message::Removed { id }.print(ctx.quiet());
    Ok(())
}
