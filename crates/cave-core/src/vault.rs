//! Query facade over an [`EntryStore`].
//!
//! `Vault` is the only surface the command layer talks to. It validates raw
//! caller input before touching storage and turns zero-result cases into the
//! precise [`Empty`] reasons instead of a generic "not found".

use std::path::Path;

use serde::Serialize;

use crate::config::VaultLimits;
use crate::error::{CaveError, Empty, Result};
use crate::storage::{
    Entry, EntryId, EntryStore, NewEntry, VaultStats, PRIVATE_ORIGIN_LABEL, UNKNOWN_GROUP_LABEL,
};

/// A random pick can land on an entry deleted a moment later; retry this many
/// times before giving up.
const RANDOM_PICK_ATTEMPTS: usize = 8;

/// One page of an owner's entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnedPage {
    pub submitter_id: i64,

    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,

    /// Entry ids on this page, newest first
    pub ids: Vec<EntryId>,
}

/// Parse a caller-supplied entry id. Only plain positive decimal integers
/// are accepted.
pub fn parse_entry_id(raw: &str) -> Result<EntryId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CaveError::invalid(format!(
            "Entry id must be a positive integer, got \"{}\"",
            trimmed
        )));
    }

    match trimmed.parse::<EntryId>() {
        Ok(0) => Err(CaveError::invalid("Entry id must be greater than zero")),
        Ok(id) => Ok(id),
        Err(_) => Err(CaveError::invalid(format!("Entry id {} is out of range", trimmed))),
    }
}

/// Text that is nothing but an integer is almost certainly a mistyped lookup.
fn is_bare_number(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn page_count(total: u64, page_size: u32) -> u32 {
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Typed vault operations.
pub struct Vault<S> {
    store: S,
    limits: VaultLimits,
}

impl<S: EntryStore> Vault<S> {
    pub fn new(store: S, limits: VaultLimits) -> Self {
        Self { store, limits }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn limits(&self) -> &VaultLimits {
        &self.limits
    }

    /// Submit a new entry and return its id.
    ///
    /// Surrounding whitespace is trimmed. An empty origin label is stored as
    /// [`PRIVATE_ORIGIN_LABEL`] for a private context and as
    /// [`UNKNOWN_GROUP_LABEL`] for a group.
    pub fn submit(
        &self,
        text: &str,
        submitter_id: i64,
        origin_group_id: i64,
        origin_label: &str,
    ) -> Result<EntryId> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CaveError::invalid("Entry text is empty"));
        }

        let chars = text.chars().count();
        if chars > self.limits.max_text_chars {
            return Err(CaveError::invalid(format!(
                "Entry text is too long ({} characters, max {})",
                chars, self.limits.max_text_chars
            )));
        }

        if is_bare_number(text) {
            return Err(CaveError::invalid(
                "Entry text is only a number; entries are looked up by id",
            ));
        }

        let origin_label = match origin_label.trim() {
            "" if origin_group_id == 0 => PRIVATE_ORIGIN_LABEL,
            "" => UNKNOWN_GROUP_LABEL,
            label => label,
        };

        let id = self.store.create(&NewEntry::new(
            text,
            submitter_id,
            origin_group_id,
            origin_label,
        ))?;
        tracing::info!(id, submitter_id, origin_group_id, "entry submitted");
        Ok(id)
    }

    /// Look up an entry by a raw id string.
    ///
    /// Active entries count the lookup as a view and come back with the
    /// updated count. Deleted entries are returned untouched, flag set.
    pub fn inspect(&self, raw_id: &str) -> Result<Entry> {
        let id = parse_entry_id(raw_id)?;
        let mut entry = self.store.get(id)?.ok_or(CaveError::NotFound(id))?;
        if !entry.is_active() {
            return Ok(entry);
        }

        match self.store.increment_view(id) {
            Ok(count) => entry.view_count = count,
            // Deleted between the read and the increment.
            Err(CaveError::AlreadyDeleted(_)) => entry.deleted = true,
            Err(err) => return Err(err),
        }
        Ok(entry)
    }

    /// Pick an active entry at random and count it as a view.
    pub fn pick_random(&self) -> Result<Entry> {
        for _ in 0..RANDOM_PICK_ATTEMPTS {
            let Some(mut entry) = self.store.random_active()? else {
                return Err(CaveError::EmptyResult(Empty::EmptyVault));
            };

            match self.store.increment_view(entry.id) {
                Ok(count) => {
                    entry.view_count = count;
                    return Ok(entry);
                }
                Err(CaveError::AlreadyDeleted(_)) => continue,
                Err(err) => return Err(err),
            }
        }

        Err(CaveError::EmptyResult(Empty::EmptyVault))
    }

    /// List one page of a submitter's active entries, newest first.
    pub fn list_owned(&self, submitter_id: i64, page: u32, page_size: u32) -> Result<OwnedPage> {
        if page == 0 {
            return Err(CaveError::invalid("Page numbers start at 1"));
        }
        if page_size == 0 {
            return Err(CaveError::invalid("Page size must be at least 1"));
        }

        let offset = u64::from(page - 1) * u64::from(page_size);
        let window = self.store.list_by_owner(submitter_id, page_size, offset)?;
        let total_pages = page_count(window.total_count, page_size);

        if window.total_count == 0 && page == 1 {
            return Err(CaveError::EmptyResult(Empty::NoRecords));
        }
        if page > total_pages {
            return Err(CaveError::EmptyResult(Empty::PageOutOfRange { page, total_pages }));
        }

        Ok(OwnedPage {
            submitter_id,
            page,
            page_size,
            total_count: window.total_count,
            total_pages,
            ids: window.ids,
        })
    }

    /// Search active entries for a keyword, newest first.
    ///
    /// `limit` is capped at the configured search limit. Every returned
    /// entry counts as viewed.
    pub fn find(&self, keyword: &str, limit: u32) -> Result<Vec<Entry>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(CaveError::invalid("Search keyword is empty"));
        }
        if limit == 0 {
            return Err(CaveError::invalid("Search limit must be at least 1"));
        }

        let limit = limit.min(self.limits.search_limit);
        let matches = self.store.search(keyword, limit)?;

        let mut found = Vec::with_capacity(matches.len());
        for mut entry in matches {
            match self.store.increment_view(entry.id) {
                Ok(count) => {
                    entry.view_count = count;
                    found.push(entry);
                }
                Err(CaveError::AlreadyDeleted(_)) => continue,
                Err(err) => return Err(err),
            }
        }

        if found.is_empty() {
            return Err(CaveError::EmptyResult(Empty::NoMatches));
        }
        Ok(found)
    }

    /// Soft-delete an entry.
    ///
    /// Allowed for privileged requesters and for the entry's submitter.
    pub fn remove(&self, raw_id: &str, requester_id: i64, is_privileged: bool) -> Result<EntryId> {
        let id = parse_entry_id(raw_id)?;
        let entry = self.store.get(id)?.ok_or(CaveError::NotFound(id))?;

        if !entry.is_active() {
            return Err(CaveError::AlreadyDeleted(id));
        }
        if !is_privileged && requester_id != entry.submitter_id {
            return Err(CaveError::Forbidden { id, requester_id });
        }

        // A concurrent remove may have won since the read.
        if !self.store.soft_delete(id)? {
            return Err(CaveError::AlreadyDeleted(id));
        }
        tracing::info!(id, requester_id, is_privileged, "entry removed");
        Ok(id)
    }

    // --- Maintenance ---

    pub fn stats(&self) -> Result<VaultStats> {
        self.store.stats()
    }

    pub fn check_integrity(&self) -> Result<()> {
        self.store.check_integrity()
    }

    pub fn backup(&self, destination: &Path) -> Result<()> {
        self.store.backup(destination)
    }
}
