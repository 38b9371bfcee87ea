//! Table layout of a vault file.

/// On-disk format version recorded in `meta`.
pub const FORMAT_VERSION: &str = "1";

/// Switches the file to WAL so readers run beside the writer. The mode is
/// persistent, so only the writer connection issues it.
pub const JOURNAL_MODE_PRAGMA: &str = "PRAGMA journal_mode = WAL";

/// Per-connection settings. `synchronous = FULL` makes every commit durable
/// before it returns.
pub const CONNECTION_PRAGMAS: &str = r#"
    PRAGMA synchronous = FULL;
    PRAGMA foreign_keys = ON;
"#;

/// Initial schema. AUTOINCREMENT keeps ids strictly increasing and never
/// hands out an id that was used before, deleted rows included.
pub const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        text TEXT NOT NULL,
        submitter_id INTEGER NOT NULL,
        origin_group_id INTEGER NOT NULL DEFAULT 0,
        origin_label TEXT NOT NULL,
        view_count INTEGER NOT NULL DEFAULT 0 CHECK (view_count >= 0),
        created_at INTEGER NOT NULL,
        deleted INTEGER NOT NULL DEFAULT 0 CHECK (deleted IN (0, 1))
    );

    CREATE INDEX IF NOT EXISTS idx_entries_owner
    ON entries (submitter_id, deleted, id);

    CREATE INDEX IF NOT EXISTS idx_entries_deleted
    ON entries (deleted, id);
"#;
