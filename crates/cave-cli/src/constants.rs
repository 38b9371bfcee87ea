//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (storage failures and anything unhandled)
/// - 2: Misuse of shell command (reserved by shells, used by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, vault, entry).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// The account may not perform this action.
    pub const FORBIDDEN: i32 = 5;

    /// Integrity check failed.
    pub const INTEGRITY_FAILED: i32 = 6;

    /// A valid query produced nothing.
    pub const EMPTY: i32 = 7;

    /// The entry exists but was already deleted.
    pub const ALREADY_DELETED: i32 = 8;
}

/// Maximum characters of entry text shown in list tables.
pub const TABLE_SUMMARY_MAX: usize = 60;
