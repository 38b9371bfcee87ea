//! Command handlers, one per subcommand.

pub mod entries;
pub mod init;
pub mod maintenance;
pub mod misc;

pub use entries::{
    handle_add, handle_mine, handle_random, handle_remove, handle_search, handle_show,
};
pub use init::handle_init;
pub use maintenance::{handle_backup, handle_check, handle_stats};
pub use misc::handle_completions;
