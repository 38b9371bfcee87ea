//! Connection handling for the SQLite store.
//!
//! One writer connection sits behind a mutex so in-process writers queue
//! instead of tripping over SQLite's own lock. Readers are drawn from a small
//! pool of idle connections and handed back when their guard drops, whichever
//! way the borrowing call exits. In WAL mode readers are not blocked by a
//! pending write.

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use super::schema::{CONNECTION_PRAGMAS, JOURNAL_MODE_PRAGMA};
use crate::config::StoreOptions;
use crate::error::{CaveError, Result};

pub struct ConnectionPool {
    path: PathBuf,
    options: StoreOptions,
    writer: Mutex<Connection>,
    idle_readers: Mutex<Vec<Connection>>,
}

impl ConnectionPool {
    /// Open the writer connection, creating the file if needed.
    pub fn open(path: &Path, options: StoreOptions) -> Result<Self> {
        let writer = Self::connect(path, &options)?;
        let mode: String = writer.query_row(JOURNAL_MODE_PRAGMA, [], |row| row.get(0))?;
        if !mode.eq_ignore_ascii_case("wal") {
            tracing::warn!(path = %path.display(), %mode, "vault is not in WAL mode");
        }
        Ok(Self {
            path: path.to_path_buf(),
            options,
            writer: Mutex::new(writer),
            idle_readers: Mutex::new(Vec::new()),
        })
    }

    fn connect(path: &Path, options: &StoreOptions) -> Result<Connection> {
        let conn = Connection::open(path).map_err(|e| {
            CaveError::StorageUnavailable(format!("Cannot open {}: {}", path.display(), e))
        })?;
        conn.busy_timeout(options.busy_timeout())?;
        conn.execute_batch(CONNECTION_PRAGMAS)?;
        Ok(conn)
    }

    /// Lock the writer connection, returning an error if the mutex is poisoned.
    pub fn writer(&self) -> Result<MutexGuard<'_, Connection>> {
        self.writer
            .lock()
            .map_err(|_| CaveError::StorageUnavailable("Writer connection poisoned".to_string()))
    }

    /// Borrow a reader connection, opening a new one if none is idle.
    pub fn reader(&self) -> Result<PooledConnection<'_>> {
        let idle = self
            .idle_readers
            .lock()
            .map_err(|_| CaveError::StorageUnavailable("Reader pool poisoned".to_string()))?
            .pop();

        let conn = match idle {
            Some(conn) => conn,
            None => {
                let conn = Self::connect(&self.path, &self.options)?;
                conn.execute_batch("PRAGMA query_only = ON;")?;
                tracing::trace!(path = %self.path.display(), "opened reader connection");
                conn
            }
        };

        Ok(PooledConnection {
            pool: self,
            conn: Some(conn),
        })
    }

    fn release(&self, conn: Connection) {
        // A poisoned pool just closes the connection.
        if let Ok(mut idle) = self.idle_readers.lock() {
            if idle.len() < self.options.max_idle_readers {
                idle.push(conn);
            }
        }
    }

    #[cfg(test)]
    fn idle_count(&self) -> usize {
        self.idle_readers.lock().map(|idle| idle.len()).unwrap_or(0)
    }
}

/// A reader connection on loan from the pool.
pub struct PooledConnection<'a> {
    pool: &'a ConnectionPool,
    conn: Option<Connection>,
}

impl Deref for PooledConnection<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        self.conn
            .as_ref()
            .expect("pooled connection is only taken on drop")
    }
}

impl Drop for PooledConnection<'_> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.pool.release(conn);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn pool(max_idle_readers: usize) -> (tempfile::TempDir, ConnectionPool) {
        let dir = tempdir().unwrap();
        let options = StoreOptions {
            max_idle_readers,
            ..StoreOptions::default()
        };
        let pool = ConnectionPool::open(&dir.path().join("pool.db"), options).unwrap();
        (dir, pool)
    }

    #[test]
    fn test_reader_returns_to_pool_on_drop() {
        let (_dir, pool) = pool(2);

        {
            let reader = pool.reader().unwrap();
            let one: i64 = reader.query_row("SELECT 1", [], |row| row.get(0)).unwrap();
            assert_eq!(one, 1);
            assert_eq!(pool.idle_count(), 0);
        }

        assert_eq!(pool.idle_count(), 1);
    }

    #[test]
    fn test_reader_returns_to_pool_on_error_path() {
        let (_dir, pool) = pool(2);

        let result = (|| -> Result<i64> {
            let reader = pool.reader()?;
            let value = reader.query_row("SELECT * FROM missing_table", [], |row| row.get(0))?;
            Ok(value)
        })();

        assert!(result.is_err());
        assert_eq!(pool.idle_count(), 1);
    }

    #[test]
    fn test_idle_readers_are_capped() {
        let (_dir, pool) = pool(1);

        let first = pool.reader().unwrap();
        let second = pool.reader().unwrap();
        drop(first);
        drop(second);

        assert_eq!(pool.idle_count(), 1);
    }

    #[test]
    fn test_reader_is_query_only() {
        let (_dir, pool) = pool(1);
        pool.writer()
            .unwrap()
            .execute_batch("CREATE TABLE t (x INTEGER);")
            .unwrap();

        let reader = pool.reader().unwrap();
        assert!(reader.execute("INSERT INTO t (x) VALUES (1)", []).is_err());
    }
}
