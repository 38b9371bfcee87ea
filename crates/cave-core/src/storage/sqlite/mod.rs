//! SQLite storage backend.
//!
//! Entries live in a single WAL-mode SQLite file. Ids come from
//! `AUTOINCREMENT`, counters are bumped in single statements, and reads that
//! need a consistent view (random pick, paging) run inside one read
//! transaction.

mod pool;
mod row;
mod schema;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::Rng;
use rusqlite::{params, OptionalExtension};

use crate::clock::{Clock, SystemClock};
use crate::config::StoreOptions;
use crate::error::{CaveError, Result};
use crate::storage::traits::EntryStore;
use crate::storage::types::{Entry, EntryId, NewEntry, OwnerPage, VaultStats};

use pool::ConnectionPool;
use row::{EntryRow, ENTRY_COLUMNS};
use schema::{FORMAT_VERSION, SCHEMA};

/// SQLite-backed entry store, safe to share between threads.
pub struct SqliteStore {
    path: PathBuf,
    pool: ConnectionPool,
    clock: Arc<dyn Clock>,
}

/// Convert an entry id to its SQL key. Ids outside the SQLite integer
/// range can never have been assigned.
fn sql_id(id: EntryId) -> Option<i64> {
    i64::try_from(id).ok().filter(|key| *key > 0)
}

fn to_u64(value: i64, what: &str) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| CaveError::StorageUnavailable(format!("Negative {}: {}", what, value)))
}

impl SqliteStore {
    /// Open (or create) a vault file with default options.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with(path, StoreOptions::default())
    }

    /// Open (or create) a vault file.
    pub fn open_with(path: &Path, options: StoreOptions) -> Result<Self> {
        Self::open_with_clock(path, options, Arc::new(SystemClock))
    }

    /// Open (or create) a vault file with a custom timestamp source.
    pub fn open_with_clock(
        path: &Path,
        options: StoreOptions,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let pool = ConnectionPool::open(path, options)?;

        {
            let mut conn = pool.writer()?;
            let tx = conn.transaction()?;
            tx.execute_batch(SCHEMA)?;
            tx.execute(
                "INSERT OR IGNORE INTO meta (key, value) VALUES ('format_version', ?1)",
                [FORMAT_VERSION],
            )?;
            tx.execute(
                "INSERT OR IGNORE INTO meta (key, value) VALUES ('created_at', ?1)",
                [clock.now().to_string()],
            )?;
            let format_version: String = tx.query_row(
                "SELECT value FROM meta WHERE key = 'format_version'",
                [],
                |row| row.get(0),
            )?;
            if format_version != FORMAT_VERSION {
                return Err(CaveError::StorageUnavailable(format!(
                    "Unsupported vault format {} (expected {})",
                    format_version, FORMAT_VERSION
                )));
            }
            tx.commit()?;
        }

        tracing::debug!(path = %path.display(), "opened vault");

        Ok(Self {
            path: path.to_path_buf(),
            pool,
            clock,
        })
    }

    /// Path of the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntryStore for SqliteStore {
    fn create(&self, entry: &NewEntry) -> Result<EntryId> {
        let created_at = i64::try_from(self.clock.now())
            .map_err(|_| CaveError::StorageUnavailable("Clock out of range".to_string()))?;

        let conn = self.pool.writer()?;
        conn.execute(
            r#"
            INSERT INTO entries (
                text,
                submitter_id,
                origin_group_id,
                origin_label,
                view_count,
                created_at,
                deleted
            )
            VALUES (?1, ?2, ?3, ?4, 0, ?5, 0)
            "#,
            params![
                entry.text,
                entry.submitter_id,
                entry.origin_group_id,
                entry.origin_label,
                created_at,
            ],
        )?;
        let id = to_u64(conn.last_insert_rowid(), "entry id")?;
        drop(conn);

        tracing::debug!(id, submitter_id = entry.submitter_id, "created entry");
        Ok(id)
    }

    fn get(&self, id: EntryId) -> Result<Option<Entry>> {
        let Some(key) = sql_id(id) else {
            return Ok(None);
        };

        let conn = self.pool.reader()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM entries WHERE id = ?1", ENTRY_COLUMNS),
                [key],
                EntryRow::from_row,
            )
            .optional()?;

        row.map(Entry::try_from).transpose()
    }

    fn increment_view(&self, id: EntryId) -> Result<u64> {
        let key = sql_id(id).ok_or(CaveError::NotFound(id))?;

        let conn = self.pool.writer()?;
        let updated: Option<i64> = conn
            .query_row(
                "UPDATE entries SET view_count = view_count + 1 WHERE id = ?1 AND deleted = 0 RETURNING view_count",
                [key],
                |row| row.get(0),
            )
            .optional()?;

        match updated {
            Some(count) => to_u64(count, "view count"),
            None => {
                let exists = conn
                    .query_row("SELECT 1 FROM entries WHERE id = ?1", [key], |_| Ok(()))
                    .optional()?;
                match exists {
                    Some(()) => Err(CaveError::AlreadyDeleted(id)),
                    None => Err(CaveError::NotFound(id)),
                }
            }
        }
    }

    fn random_active(&self) -> Result<Option<Entry>> {
        let conn = self.pool.reader()?;
        let tx = conn.unchecked_transaction()?;

        let active: i64 =
            tx.query_row("SELECT COUNT(*) FROM entries WHERE deleted = 0", [], |row| {
                row.get(0)
            })?;
        if active <= 0 {
            return Ok(None);
        }

        let offset = rand::thread_rng().gen_range(0..active);
        let row = tx
            .query_row(
                &format!(
                    "SELECT {} FROM entries WHERE deleted = 0 ORDER BY id LIMIT 1 OFFSET ?1",
                    ENTRY_COLUMNS
                ),
                [offset],
                EntryRow::from_row,
            )
            .optional()?;
        tx.commit()?;

        row.map(Entry::try_from).transpose()
    }

    fn list_by_owner(&self, submitter_id: i64, page_size: u32, offset: u64) -> Result<OwnerPage> {
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let conn = self.pool.reader()?;
        let tx = conn.unchecked_transaction()?;

        let total: i64 = tx.query_row(
            "SELECT COUNT(*) FROM entries WHERE submitter_id = ?1 AND deleted = 0",
            [submitter_id],
            |row| row.get(0),
        )?;

        let mut stmt = tx.prepare(
            r#"
            SELECT id FROM entries
            WHERE submitter_id = ?1 AND deleted = 0
            ORDER BY id DESC
            LIMIT ?2 OFFSET ?3
            "#,
        )?;
        let rows = stmt.query_map(params![submitter_id, page_size, offset], |row| {
            row.get::<_, i64>(0)
        })?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(to_u64(row?, "entry id")?);
        }
        drop(stmt);
        tx.commit()?;

        Ok(OwnerPage {
            ids,
            total_count: to_u64(total, "entry count")?,
        })
    }

    fn search(&self, substring: &str, limit: u32) -> Result<Vec<Entry>> {
        let conn = self.pool.reader()?;

        // instr() keeps matching case-sensitive and treats % and _ literally.
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {} FROM entries
            WHERE deleted = 0 AND instr(text, ?1) > 0
            ORDER BY id DESC
            LIMIT ?2
            "#,
            ENTRY_COLUMNS
        ))?;
        let rows = stmt.query_map(params![substring, limit], EntryRow::from_row)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(Entry::try_from(row?)?);
        }

        Ok(entries)
    }

    fn soft_delete(&self, id: EntryId) -> Result<bool> {
        let key = sql_id(id).ok_or(CaveError::NotFound(id))?;

        let conn = self.pool.writer()?;
        let changed = conn.execute(
            "UPDATE entries SET deleted = 1 WHERE id = ?1 AND deleted = 0",
            [key],
        )?;
        if changed == 0 {
            let exists = conn
                .query_row("SELECT 1 FROM entries WHERE id = ?1", [key], |_| Ok(()))
                .optional()?;
            return match exists {
                Some(()) => Ok(false),
                None => Err(CaveError::NotFound(id)),
            };
        }
        drop(conn);

        tracing::debug!(id, "soft-deleted entry");
        Ok(true)
    }

    fn max_id(&self) -> Result<EntryId> {
        let conn = self.pool.reader()?;
        let seq: Option<i64> = conn
            .query_row(
                "SELECT seq FROM sqlite_sequence WHERE name = 'entries'",
                [],
                |row| row.get(0),
            )
            .optional()?;

        to_u64(seq.unwrap_or(0), "sequence")
    }

    fn stats(&self) -> Result<VaultStats> {
        let conn = self.pool.reader()?;
        let tx = conn.unchecked_transaction()?;

        let (total, deleted): (i64, i64) = tx.query_row(
            "SELECT COUNT(*), COALESCE(SUM(deleted), 0) FROM entries",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let seq: Option<i64> = tx
            .query_row(
                "SELECT seq FROM sqlite_sequence WHERE name = 'entries'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        tx.commit()?;

        let total = to_u64(total, "entry count")?;
        let deleted = to_u64(deleted, "deleted count")?;
        Ok(VaultStats {
            total,
            active: total.saturating_sub(deleted),
            deleted,
            max_id: to_u64(seq.unwrap_or(0), "sequence")?,
        })
    }

    fn check_integrity(&self) -> Result<()> {
        let conn = self.pool.reader()?;

        let mut stmt = conn.prepare("PRAGMA integrity_check")?;
        let problems = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        drop(stmt);
        if problems.len() != 1 || problems[0] != "ok" {
            tracing::warn!(path = %self.path.display(), ?problems, "integrity check failed");
            return Err(CaveError::StorageUnavailable(format!(
                "Integrity check failed: {}",
                problems.join("; ")
            )));
        }

        let bad_rows: i64 = conn.query_row(
            "SELECT COUNT(*) FROM entries WHERE id <= 0 OR deleted NOT IN (0, 1) OR view_count < 0",
            [],
            |row| row.get(0),
        )?;
        if bad_rows > 0 {
            tracing::warn!(path = %self.path.display(), bad_rows, "invalid entry rows");
            return Err(CaveError::StorageUnavailable(format!(
                "{} entry rows violate vault invariants",
                bad_rows
            )));
        }

        let (max_row, seq): (i64, i64) = conn.query_row(
            r#"
            SELECT
                COALESCE((SELECT MAX(id) FROM entries), 0),
                COALESCE((SELECT seq FROM sqlite_sequence WHERE name = 'entries'), 0)
            "#,
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        if max_row > seq {
            tracing::warn!(path = %self.path.display(), max_row, seq, "id sequence behind rows");
            return Err(CaveError::StorageUnavailable(format!(
                "Id sequence {} is behind highest entry id {}",
                seq, max_row
            )));
        }

        Ok(())
    }

    fn backup(&self, destination: &Path) -> Result<()> {
        let temp_path = crate::fs::temp_sibling(destination)?;
        let temp_str = temp_path
            .to_str()
            .ok_or_else(|| CaveError::invalid("Backup path is not valid UTF-8"))?
            .to_string();

        {
            let conn = self.pool.writer()?;
            if let Err(err) = conn.execute("VACUUM INTO ?1", [&temp_str]) {
                let _ = std::fs::remove_file(&temp_path);
                return Err(err.into());
            }
        }

        crate::fs::replace_file(&temp_path, destination)?;
        tracing::debug!(
            source = %self.path.display(),
            destination = %destination.display(),
            "wrote vault backup"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use tempfile::tempdir;

    #[test]
    fn test_sql_id_rejects_sentinels() {
        assert_eq!(sql_id(0), None);
        assert_eq!(sql_id(u64::MAX), None);
        assert_eq!(sql_id(7), Some(7));
    }

    #[test]
    fn test_created_at_comes_from_clock() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::open_with_clock(
            &dir.path().join("clock.cave"),
            StoreOptions::default(),
            Arc::new(FixedClock(1_700_000_000)),
        )
        .unwrap();

        let id = store.create(&NewEntry::private("tick", 1)).unwrap();
        let entry = store.get(id).unwrap().unwrap();
        assert_eq!(entry.created_at, 1_700_000_000);
    }

    #[test]
    fn test_reopen_rejects_unknown_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("format.cave");
        {
            let store = SqliteStore::open(&path).unwrap();
            store
                .pool
                .writer()
                .unwrap()
                .execute(
                    "UPDATE meta SET value = '99' WHERE key = 'format_version'",
                    [],
                )
                .unwrap();
        }

        let err = SqliteStore::open(&path).err().expect("open should fail");
        assert!(err.to_string().contains("Unsupported vault format"));
    }
}
