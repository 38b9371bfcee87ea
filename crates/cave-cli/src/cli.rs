use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use cave_core::VERSION;

/// Cave - a shared vault of short text entries
#[derive(Parser)]
#[command(name = "cave")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the vault file
    #[arg(short, long, global = true, env = "CAVE_PATH")]
    pub vault: Option<String>,

    /// Account id to act as
    #[arg(
        long = "as",
        global = true,
        env = "CAVE_ACCOUNT",
        value_name = "ACCOUNT",
        allow_hyphen_values = true
    )]
    pub account: Option<i64>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the vault will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Accounts allowed to remove any entry
    #[arg(long = "admin", value_name = "ACCOUNT", allow_hyphen_values = true)]
    pub admins: Vec<i64>,

    /// Config path override
    #[arg(long)]
    pub config_path: Option<String>,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Entry text (multiple words are joined with spaces)
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Group the entry is submitted from
    #[arg(long, value_name = "ID", allow_hyphen_values = true)]
    pub group: Option<i64>,

    /// Display name of the group
    #[arg(long, value_name = "NAME", requires = "group")]
    pub group_name: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Entry ID
    #[arg(value_name = "ID", allow_hyphen_values = true)]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `random` command
#[derive(Args)]
pub struct RandomArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `mine` command
#[derive(Args)]
pub struct MineArgs {
    /// Account whose entries to list (defaults to --as)
    #[arg(value_name = "ACCOUNT", allow_hyphen_values = true)]
    pub account: Option<i64>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Entries per page (defaults to the configured page size)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `search` command
#[derive(Args)]
pub struct SearchArgs {
    /// Case-sensitive substring to look for
    #[arg(value_name = "KEYWORD")]
    pub keyword: String,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `remove` command
#[derive(Args)]
pub struct RemoveArgs {
    /// Entry ID
    #[arg(value_name = "ID", allow_hyphen_values = true)]
    pub id: String,
}

/// Arguments for the `stats` command
#[derive(Args)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `backup` command
#[derive(Args)]
pub struct BackupArgs {
    /// Destination path
    #[arg(value_name = "DEST")]
    pub destination: String,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new vault and write the config
    Init(InitArgs),

    /// Submit a new entry
    Add(AddArgs),

    /// Show an entry by ID (counts as a view)
    Show(ShowArgs),

    /// Show a random entry (counts as a view)
    Random(RandomArgs),

    /// List entry IDs submitted by an account
    Mine(MineArgs),

    /// Search entries for a keyword
    Search(SearchArgs),

    /// Delete an entry (submitter or admin only)
    Remove(RemoveArgs),

    /// Show vault counters
    Stats(StatsArgs),

    /// Run an integrity check
    Check,

    /// Copy the vault to a new file
    Backup(BackupArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
