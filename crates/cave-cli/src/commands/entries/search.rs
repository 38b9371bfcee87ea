use crate::app::AppContext;
use crate::cli::SearchArgs;
use crate::output::{entries_json, entry_table, print_json};

pub fn handle_search(ctx: &AppContext, args: &SearchArgs) -> anyhow::Result<()> {
    let vault = ctx.open_vault()?;
    let limit = args.limit.unwrap_or(vault.limits().search_limit);

    let entries = vault.find(&args.keyword, limit)?;

    if args.json {
        print_json(&entries_json(&entries))?;
    } else if ctx.quiet() {
        for entry in &entries {
            println!("{} {}", entry.id, entry.text);
        }
    } else {
        println!("{}", entry_table(&entries));
    }
    Ok(())
}
