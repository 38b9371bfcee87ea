//! Error types for Cave core operations.
//!
//! Storage failures and query outcomes share one error type so the command
//! layer can map every failure to a distinct message. `EmptyResult` is a
//! normal outcome rather than a fault; it still travels on the error path so
//! callers are forced to handle it.

use std::fmt;

use thiserror::Error;

use crate::storage::EntryId;

/// Result type alias for Cave operations.
pub type Result<T> = std::result::Result<T, CaveError>;

/// Core error type for Cave operations.
#[derive(Debug, Error)]
pub enum CaveError {
    /// The durable medium is unreachable, corrupt, or a write failed.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// No entry with this id was ever created.
    #[error("Entry #{0} not found")]
    NotFound(EntryId),

    /// The entry exists but has been soft-deleted.
    #[error("Entry #{0} is already deleted")]
    AlreadyDeleted(EntryId),

    /// The requester may not act on this entry.
    #[error("Account {requester_id} may not delete entry #{id}")]
    Forbidden { id: EntryId, requester_id: i64 },

    /// Malformed id, keyword, page, or text.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A valid query that legitimately produced no data.
    #[error("{0}")]
    EmptyResult(Empty),
}

/// Why a valid query produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Empty {
    /// There are no active entries at all.
    EmptyVault,
    /// The owner has no active entries.
    NoRecords,
    /// No active entry contains the keyword.
    NoMatches,
    /// The requested page lies past the last page.
    PageOutOfRange { page: u32, total_pages: u32 },
}

impl fmt::Display for Empty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Empty::EmptyVault => write!(f, "The vault is empty"),
            Empty::NoRecords => write!(f, "No records found"),
            Empty::NoMatches => write!(f, "No matching entries"),
            Empty::PageOutOfRange { page, total_pages } => {
                write!(f, "Page {} is out of range (total pages: {})", page, total_pages)
            }
        }
    }
}

/// Discriminant of [`CaveError`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    StorageUnavailable,
    NotFound,
    AlreadyDeleted,
    Forbidden,
    InvalidInput,
    EmptyResult,
}

impl CaveError {
    /// The kind of this error, for callers that branch on it.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CaveError::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            CaveError::NotFound(_) => ErrorKind::NotFound,
            CaveError::AlreadyDeleted(_) => ErrorKind::AlreadyDeleted,
            CaveError::Forbidden { .. } => ErrorKind::Forbidden,
            CaveError::InvalidInput(_) => ErrorKind::InvalidInput,
            CaveError::EmptyResult(_) => ErrorKind::EmptyResult,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        CaveError::InvalidInput(message.into())
    }
}

impl From<std::io::Error> for CaveError {
    fn from(err: std::io::Error) -> Self {
        CaveError::StorageUnavailable(err.to_string())
    }
}

impl From<rusqlite::Error> for CaveError {
    fn from(err: rusqlite::Error) -> Self {
        CaveError::StorageUnavailable(format!("SQLite error: {}", err))
    }
}
