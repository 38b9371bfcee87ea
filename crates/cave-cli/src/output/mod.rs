//! Output formatting for the CLI.
//!
//! Status lines come from the closed [`Message`] set; entries, pages and
//! stats render either as text tables or as JSON.

mod json;
mod message;
mod text;

// Re-export public API
pub use json::{entries_json, entry_json, page_json, print_json, stats_json};
pub use message::Message;
pub use text::{entry_table, page_text, print_entry, stats_text};
