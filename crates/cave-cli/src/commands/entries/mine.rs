use crate::app::AppContext;
use crate::cli::MineArgs;
use crate::output::{page_json, page_text, print_json};

pub fn handle_mine(ctx: &AppContext, args: &MineArgs) -> anyhow::Result<()> {
    let vault = ctx.open_vault()?;
    let account = args.account.unwrap_or_else(|| ctx.account());
    let page_size = args.page_size.unwrap_or(vault.limits().page_size);

    let page = vault.list_owned(account, args.page, page_size)?;

    if args.json {
        print_json(&page_json(&page))?;
    } else if ctx.quiet() {
        for id in &page.ids {
            println!("{}", id);
        }
    } else {
        println!("{}", page_text(&page));
    }
    Ok(())
}
