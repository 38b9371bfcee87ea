use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::output::{entry_json, print_entry, print_json};

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let vault = ctx.open_vault()?;
    let entry = vault.inspect(&args.id)?;
    if args.json {
        print_json(&entry_json(&entry))?;
    } else {
        print_entry(&entry, ctx.quiet());
    }
    Ok(())
}
