use rand::seq::SliceRandom;

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::output::Message;

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let vault = ctx.open_vault()?;
    let text = args.text.join(" ");
    let group_id = args.group.unwrap_or(0);
    let label = args.group_name.as_deref().unwrap_or("");

    let id = vault.submit(&text, ctx.account(), group_id, label)?;

    if ctx.quiet() {
        println!("{}", id);
    } else {
        let quote = ctx
            .config()?
            .quotes
            .choose(&mut rand::thread_rng())
            .map(String::as_str);
        Message::Added { id, quote }.print(false);
    }
    Ok(())
}
