//! Tunables for the store and the query facade.
//!
//! Both structs deserialize from partial config tables; missing keys fall
//! back to the defaults below.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default wait for a locked database before reporting a storage failure.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Default number of idle reader connections kept open.
pub const DEFAULT_MAX_IDLE_READERS: usize = 4;

/// Default maximum length of an entry, in characters.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 2_000;

/// Default cap on search results.
pub const DEFAULT_SEARCH_LIMIT: u32 = 100;

/// Default owner listing page size.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Connection settings for [`crate::storage::SqliteStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// How long a connection waits on a locked database, in milliseconds
    pub busy_timeout_ms: u64,

    /// Idle reader connections retained by the pool
    pub max_idle_readers: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            max_idle_readers: DEFAULT_MAX_IDLE_READERS,
        }
    }
}

impl StoreOptions {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

/// Caller-facing limits enforced by [`crate::vault::Vault`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultLimits {
    /// Longest accepted entry text, in characters
    pub max_text_chars: usize,

    /// Most results a single search may return
    pub search_limit: u32,

    /// Page size used when the caller does not pick one
    pub page_size: u32,
}

impl Default for VaultLimits {
    fn default() -> Self {
        Self {
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            search_limit: DEFAULT_SEARCH_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
