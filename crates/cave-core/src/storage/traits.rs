//! Storage engine trait definition.
//!
//! The `EntryStore` trait is the boundary between the query facade and the
//! durable medium. Implementations are shared between concurrent callers,
//! so every method takes `&self`.

use std::path::Path;

use super::types::{Entry, EntryId, NewEntry, OwnerPage, VaultStats};
use crate::error::Result;

/// Storage engine interface for the entry vault.
///
/// All implementations must ensure:
/// - Ids are unique, strictly increasing and never reused
/// - View count increments are never lost under concurrency
/// - Deleted entries stay addressable by id but are hidden elsewhere
/// - A successful mutation survives an immediate crash
pub trait EntryStore: Send + Sync {
    /// Persist a new entry and return its id.
    ///
    /// The text is stored as given; validation belongs to the caller.
    ///
    /// # Errors
    ///
    /// Returns `CaveError::StorageUnavailable` if the write fails. Nothing is
    /// persisted in that case.
    fn create(&self, entry: &NewEntry) -> Result<EntryId>;

    /// Get an entry by id, deleted or not.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(entry))` if found, `Ok(None)` if the id was never
    /// assigned.
    fn get(&self, id: EntryId) -> Result<Option<Entry>>;

    /// Increment the view count of an active entry by one.
    ///
    /// # Returns
    ///
    /// Returns the view count after the increment.
    ///
    /// # Errors
    ///
    /// Returns `CaveError::NotFound` for an unknown id and
    /// `CaveError::AlreadyDeleted` for a deleted entry, which is left
    /// untouched.
    fn increment_view(&self, id: EntryId) -> Result<u64>;

    /// Pick one active entry uniformly at random.
    ///
    /// Returns `Ok(None)` when there are no active entries.
    fn random_active(&self) -> Result<Option<Entry>>;

    /// List the ids of a submitter's active entries, newest first.
    ///
    /// An offset past the end yields an empty window with the correct total.
    fn list_by_owner(&self, submitter_id: i64, page_size: u32, offset: u64) -> Result<OwnerPage>;

    /// Active entries whose text contains `substring` (case-sensitive),
    /// newest first, at most `limit` of them.
    fn search(&self, substring: &str, limit: u32) -> Result<Vec<Entry>>;

    /// Mark an entry deleted. Deleting a deleted entry is a no-op.
    ///
    /// Returns `true` if this call flipped the flag, `false` if the entry
    /// was already deleted.
    ///
    /// # Errors
    ///
    /// Returns `CaveError::NotFound` for an unknown id.
    fn soft_delete(&self, id: EntryId) -> Result<bool>;

    // --- Maintenance operations ---

    /// Highest id ever assigned, or 0 for a fresh vault.
    fn max_id(&self) -> Result<EntryId>;

    /// Counters over the whole vault.
    fn stats(&self) -> Result<VaultStats>;

    /// Check the durable file and row invariants.
    fn check_integrity(&self) -> Result<()>;

    /// Write a consistent copy of the vault to `destination`.
    fn backup(&self, destination: &Path) -> Result<()>;
}
