use crate::app::AppContext;
use crate::cli::RandomArgs;
use crate::output::{entry_json, print_entry, print_json};

pub fn handle_random(ctx: &AppContext, args: &RandomArgs) -> anyhow::Result<()> {
    let vault = ctx.open_vault()?;
    let entry = vault.pick_random()?;
    if args.json {
        print_json(&entry_json(&entry))?;
    } else {
        print_entry(&entry, ctx.quiet());
    }
    Ok(())
}
