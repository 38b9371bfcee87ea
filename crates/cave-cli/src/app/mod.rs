//! Application-level utilities for the Cave CLI.
//!
//! This module provides:
//! - Path resolution for config and vault files
//! - A lazily-loaded application context shared by command handlers

mod context;
mod resolver;

// Re-export public API
pub use context::{open_vault_at, AppContext};
pub use resolver::resolve_config_path;
