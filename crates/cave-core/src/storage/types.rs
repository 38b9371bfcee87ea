//! Core data types for the storage layer.

use serde::{Deserialize, Serialize};

/// Identifier of an entry. Assigned by the store, starting at 1.
pub type EntryId = u64;

/// Label stored for entries submitted outside any group.
pub const PRIVATE_ORIGIN_LABEL: &str = "private";

/// Label stored for group entries whose group name is unknown.
pub const UNKNOWN_GROUP_LABEL: &str = "unknown group";

/// A persisted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Permanent identifier, never reused
    pub id: EntryId,

    /// Submitted content
    pub text: String,

    /// Account id of the submitter
    pub submitter_id: i64,

    /// Group the entry was submitted from (0 = private context)
    pub origin_group_id: i64,

    /// Display name of the origin at submission time
    pub origin_label: String,

    /// Number of successful retrievals
    pub view_count: u64,

    /// Creation time, seconds since the Unix epoch
    pub created_at: u64,

    /// Soft-delete flag
    pub deleted: bool,
}

impl Entry {
    /// Whether the entry is visible to random picks, search and listings.
    pub fn is_active(&self) -> bool {
        !self.deleted
    }

    /// Whether the entry came from a private context.
    pub fn is_private(&self) -> bool {
        self.origin_group_id == 0
    }
}

/// Builder for creating new entries.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub text: String,
    pub submitter_id: i64,
    pub origin_group_id: i64,
    pub origin_label: String,
}

impl NewEntry {
    pub fn new(
        text: impl Into<String>,
        submitter_id: i64,
        origin_group_id: i64,
        origin_label: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            submitter_id,
            origin_group_id,
            origin_label: origin_label.into(),
        }
    }

    /// An entry submitted from a private context.
    pub fn private(text: impl Into<String>, submitter_id: i64) -> Self {
        Self::new(text, submitter_id, 0, PRIVATE_ORIGIN_LABEL)
    }
}

/// One window of an owner's active entry ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OwnerPage {
    /// Ids in the window, newest first
    pub ids: Vec<EntryId>,

    /// Active entries the owner has in total
    pub total_count: u64,
}

/// Aggregate counters over the whole vault.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VaultStats {
    pub total: u64,
    pub active: u64,
    pub deleted: u64,

    /// Highest id ever assigned (0 if none)
    pub max_id: EntryId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_entry_builder() {
        let entry = NewEntry::private("hello", 42);

        assert_eq!(entry.text, "hello");
        assert_eq!(entry.submitter_id, 42);
        assert_eq!(entry.origin_group_id, 0);
        assert_eq!(entry.origin_label, PRIVATE_ORIGIN_LABEL);
    }

    #[test]
    fn test_entry_flags() {
        let entry = Entry {
            id: 1,
            text: "x".to_string(),
            submitter_id: 1,
            origin_group_id: 0,
            origin_label: PRIVATE_ORIGIN_LABEL.to_string(),
            view_count: 0,
            created_at: 0,
            deleted: true,
        };

        assert!(!entry.is_active());
        assert!(entry.is_private());
    }
}
