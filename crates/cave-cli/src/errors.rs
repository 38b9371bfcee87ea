//! CLI error type carrying an exit code and an optional hint.

use std::fmt;

use cave_core::{CaveError, ErrorKind};

use crate::constants::exit_codes;

#[derive(Debug)]
pub enum CliError {
    NotFound { message: String, hint: Option<String> },
    InvalidInput(String),
    IntegrityFailed(String),
}

impl CliError {
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::IntegrityFailed(_) => exit_codes::INTEGRITY_FAILED,
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            CliError::NotFound { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }

    /// Print the error (and hint) to stderr and exit with its code.
    pub fn exit(self) -> ! {
        eprintln!("Error: {}", self);
        if let Some(hint) = self.hint() {
            eprintln!("{}", hint);
        }
        std::process::exit(self.exit_code())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, .. } => write!(f, "{}", message),
            CliError::InvalidInput(message) | CliError::IntegrityFailed(message) => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Exit code for an error bubbling out of a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    if let Some(core_err) = err.downcast_ref::<CaveError>() {
        return match core_err.kind() {
            ErrorKind::NotFound => exit_codes::NOT_FOUND,
            ErrorKind::AlreadyDeleted => exit_codes::ALREADY_DELETED,
            ErrorKind::Forbidden => exit_codes::FORBIDDEN,
            ErrorKind::InvalidInput => exit_codes::INVALID_INPUT,
            ErrorKind::EmptyResult => exit_codes::EMPTY,
            ErrorKind::StorageUnavailable => 1,
        };
    }
    1
}
