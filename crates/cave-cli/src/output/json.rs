//! JSON output formatting.

use serde::Serialize;

use cave_core::storage::VaultStats;
use cave_core::{Entry, OwnedPage};

/// Convert an entry to JSON for output.
pub fn entry_json(entry: &Entry) -> serde_json::Value {
    serde_json::json!({
        "id": entry.id,
        "text": entry.text,
        "submitter_id": entry.submitter_id,
        "origin_group_id": entry.origin_group_id,
        "origin_label": entry.origin_label,
        "view_count": entry.view_count,
        "created_at": entry.created_at,
        "deleted": entry.deleted,
    })
}

/// Convert multiple entries to a JSON array for output.
pub fn entries_json(entries: &[Entry]) -> Vec<serde_json::Value> {
    entries.iter().map(entry_json).collect()
}

pub fn page_json(page: &OwnedPage) -> serde_json::Value {
    serde_json::json!({
        "submitter_id": page.submitter_id,
        "page": page.page,
        "page_size": page.page_size,
        "total_count": page.total_count,
        "total_pages": page.total_pages,
        "ids": page.ids,
    })
}

pub fn stats_json(stats: &VaultStats) -> serde_json::Value {
    serde_json::json!({
        "total": stats.total,
        "active": stats.active,
        "deleted": stats.deleted,
        "max_id": stats.max_id,
    })
}

/// Pretty-print any JSON value to stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
