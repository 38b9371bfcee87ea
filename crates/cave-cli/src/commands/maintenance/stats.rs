use crate::app::AppContext;
use crate::cli::StatsArgs;
use crate::output::{print_json, stats_json, stats_text};

pub fn handle_stats(ctx: &AppContext, args: &StatsArgs) -> anyhow::Result<()> {
    let vault = ctx.open_vault()?;
    let stats = vault.stats()?;
    if args.json {
        print_json(&stats_json(&stats))?;
    } else if ctx.quiet() {
        println!("{} {} {}", stats.active, stats.deleted, stats.max_id);
    } else {
        println!("{}", stats_text(&stats));
    }
    Ok(())
}
