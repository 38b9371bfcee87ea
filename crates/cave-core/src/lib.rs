//! # Cave Core
//!
//! Core library for Cave - a shared vault of short text entries submitted
//! by members of a chat community.
//!
//! This crate owns the durable entry store and the typed operations the
//! command layer calls. It knows nothing about chat transports or message
//! formatting.
//!
//! ## Architecture
//!
//! - **storage**: `EntryStore` trait and the SQLite engine
//! - **vault**: query facade with caller-facing validation
//! - **config**: store options and vault limits
//! - **clock**: timestamp source for new entries

pub mod clock;
pub mod config;
pub mod error;
pub mod fs;
pub mod storage;
pub mod vault;

pub use config::{StoreOptions, VaultLimits};
pub use error::{CaveError, Empty, ErrorKind, Result};
pub use storage::{Entry, EntryId, EntryStore, NewEntry, SqliteStore};
pub use vault::{parse_entry_id, OwnedPage, Vault};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
