//! User-facing status messages.

use std::fmt;
use std::path::Path;

use cave_core::EntryId;

/// Every status line the CLI prints on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message<'a> {
    Initialized { path: &'a Path },
    ConfigWritten { path: &'a Path },
    Added { id: EntryId, quote: Option<&'a str> },
    Removed { id: EntryId },
    BackedUp { destination: &'a Path },
    IntegrityOk,
}

impl Message<'_> {
    /// Print unless quiet.
    pub fn print(&self, quiet: bool) {
        if !quiet {
            println!("{}", self);
        }
    }
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Initialized { path } => write!(f, "Initialized vault at {}", path.display()),
            Message::ConfigWritten { path } => write!(f, "Wrote config to {}", path.display()),
            Message::Added { id, quote } => {
                write!(f, "Added entry #{}", id)?;
                match quote {
                    Some(quote) => write!(f, "\n\n{}", quote),
                    None => Ok(()),
                }
            }
            Message::Removed { id } => write!(f, "Removed entry #{}", id),
            Message::BackedUp { destination } => {
                write!(f, "Backed up vault to {}", destination.display())
            }
            Message::IntegrityOk => write!(f, "Integrity check: OK"),
        }
    }
}
