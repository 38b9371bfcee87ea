//! Storage engine for the entry vault.
//!
//! - **traits**: the `EntryStore` interface the query facade depends on
//! - **types**: entries and page/stat records
//! - **sqlite**: the SQLite implementation

mod sqlite;
mod traits;
mod types;

pub use sqlite::SqliteStore;
pub use traits::EntryStore;
pub use types::{
    Entry, EntryId, NewEntry, OwnerPage, VaultStats, PRIVATE_ORIGIN_LABEL, UNKNOWN_GROUP_LABEL,
};
