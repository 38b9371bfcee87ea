//! Cave CLI - a shared vault of short text entries
//!
//! Command-line front end over `cave-core`: submit, look up, search and
//! remove entries, plus vault maintenance.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod output;

use cave_core::CaveError;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use app::AppContext;
use cli::{Cli, Commands};
use errors::{exit_code_for, CliError};

/// Env var holding the log filter, e.g. `CAVE_LOG=cave_core=debug`.
const LOG_ENV: &str = "CAVE_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        match err.downcast::<CliError>() {
            Ok(cli_err) => cli_err.exit(),
            Err(err) => {
                // Empty results are an answer, not a failure.
                if let Some(CaveError::EmptyResult(empty)) = err.downcast_ref::<CaveError>() {
                    if !cli.quiet {
                        println!("{}", empty);
                    }
                } else {
                    eprintln!("Error: {}", err);
                }
                std::process::exit(exit_code_for(&err));
            }
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli);

    match &cli.command {
        Some(Commands::Init(args)) => commands::handle_init(&ctx, args),
        Some(Commands::Add(args)) => commands::handle_add(&ctx, args),
        Some(Commands::Show(args)) => commands::handle_show(&ctx, args),
        Some(Commands::Random(args)) => commands::handle_random(&ctx, args),
        Some(Commands::Mine(args)) => commands::handle_mine(&ctx, args),
        Some(Commands::Search(args)) => commands::handle_search(&ctx, args),
        Some(Commands::Remove(args)) => commands::handle_remove(&ctx, args),
        Some(Commands::Stats(args)) => commands::handle_stats(&ctx, args),
        Some(Commands::Check) => commands::handle_check(&ctx),
        Some(Commands::Backup(args)) => commands::handle_backup(&ctx, args),
        Some(Commands::Completions(args)) => commands::handle_completions(args),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
