//! Entry row type for database queries.

use rusqlite::Row;

use crate::error::{CaveError, Result};
use crate::storage::types::Entry;

/// Column list matching [`EntryRow::from_row`].
pub const ENTRY_COLUMNS: &str =
    "id, text, submitter_id, origin_group_id, origin_label, view_count, created_at, deleted";

/// Raw row data from the entries table, before parsing into domain types.
#[derive(Debug)]
pub struct EntryRow {
    pub id: i64,
    pub text: String,
    pub submitter_id: i64,
    pub origin_group_id: i64,
    pub origin_label: String,
    pub view_count: i64,
    pub created_at: i64,
    pub deleted: i64,
}

impl EntryRow {
    /// Read a row selected with [`ENTRY_COLUMNS`].
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            text: row.get(1)?,
            submitter_id: row.get(2)?,
            origin_group_id: row.get(3)?,
            origin_label: row.get(4)?,
            view_count: row.get(5)?,
            created_at: row.get(6)?,
            deleted: row.get(7)?,
        })
    }
}

impl TryFrom<EntryRow> for Entry {
    type Error = CaveError;

    fn try_from(row: EntryRow) -> Result<Self> {
        let id = u64::try_from(row.id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| CaveError::StorageUnavailable(format!("Invalid entry id: {}", row.id)))?;
        let view_count = u64::try_from(row.view_count).map_err(|_| {
            CaveError::StorageUnavailable(format!(
                "Invalid view count {} for entry #{}",
                row.view_count, id
            ))
        })?;
        let created_at = u64::try_from(row.created_at).map_err(|_| {
            CaveError::StorageUnavailable(format!(
                "Invalid timestamp {} for entry #{}",
                row.created_at, id
            ))
        })?;
        let deleted = match row.deleted {
            0 => false,
            1 => true,
            other => {
                return Err(CaveError::StorageUnavailable(format!(
                    "Invalid deleted flag {} for entry #{}",
                    other, id
                )))
            }
        };

        Ok(Entry {
            id,
            text: row.text,
            submitter_id: row.submitter_id,
            origin_group_id: row.origin_group_id,
            origin_label: row.origin_label,
            view_count,
            created_at,
            deleted,
        })
    }
}
