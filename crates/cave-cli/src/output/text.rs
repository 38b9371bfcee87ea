//! Text and table output formatting.

use chrono::DateTime;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use cave_core::storage::VaultStats;
use cave_core::{Entry, OwnedPage};

use crate::constants::TABLE_SUMMARY_MAX;

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Format epoch seconds as an RFC 3339 UTC timestamp.
pub fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}

/// Origin line: the frozen label, plus the group id for group entries.
pub fn origin_text(entry: &Entry) -> String {
    if entry.is_private() {
        entry.origin_label.clone()
    } else {
        format!("{} ({})", entry.origin_label, entry.origin_group_id)
    }
}

/// Print a single entry in human-readable format.
pub fn print_entry(entry: &Entry, quiet: bool) {
    if quiet {
        println!("{}", entry.text);
        return;
    }

    let status = if entry.is_active() { "" } else { " [deleted]" };
    println!("#{}{}", entry.id, status);
    println!("{}", entry.text);
    println!();
    println!("Submitted by: {}", entry.submitter_id);
    println!("From: {}", origin_text(entry));
    println!("Created: {}", format_timestamp(entry.created_at));
    println!("Views: {}", entry.view_count);
}

/// Render entries as a table of id, views and a text summary.
pub fn entry_table(entries: &[Entry]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "VIEWS", "TEXT"]);
    for entry in entries {
        table.add_row(vec![
            entry.id.to_string(),
            entry.view_count.to_string(),
            truncate(&entry.text, TABLE_SUMMARY_MAX),
        ]);
    }
    table.to_string()
}

pub fn page_text(page: &OwnedPage) -> String {
    let ids = page
        .ids
        .iter()
        .map(|id| format!("#{}", id))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Entries by {} (page {}/{}, {} total):\n{}",
        page.submitter_id, page.page, page.total_pages, page.total_count, ids
    )
}

pub fn stats_text(stats: &VaultStats) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["", "COUNT"])
        .add_row(vec!["Active".to_string(), stats.active.to_string()])
        .add_row(vec!["Deleted".to_string(), stats.deleted.to_string()])
        .add_row(vec!["Total".to_string(), stats.total.to_string()])
        .add_row(vec!["Highest ID".to_string(), stats.max_id.to_string()]);
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer piece of text", 10), "a longe...");
        assert_eq!(truncate("äöüäöü", 3), "äöü");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00+00:00");
        assert_eq!(format_timestamp(u64::MAX), u64::MAX.to_string());
    }

    #[test]
    fn test_origin_text() {
        let mut entry = Entry {
            id: 1,
            text: "hi".to_string(),
            submitter_id: 1,
            origin_group_id: 0,
            origin_label: "private".to_string(),
            view_count: 0,
            created_at: 0,
            deleted: false,
        };
        assert_eq!(origin_text(&entry), "private");

        entry.origin_group_id = -100;
        entry.origin_label = "The Den".to_string();
        assert_eq!(origin_text(&entry), "The Den (-100)");
    }

    #[test]
    fn test_page_text_lists_ids() {
        let page = OwnedPage {
            submitter_id: 5,
            page: 1,
            page_size: 2,
            total_count: 3,
            total_pages: 2,
            ids: vec![3, 2],
        };
        assert_eq!(
            page_text(&page),
            "Entries by 5 (page 1/2, 3 total):\n#3, #2"
        );
    }

    #[test]
    fn test_entry_table_contains_rows() {
        let entry = Entry {
            id: 7,
            text: "echo".to_string(),
            submitter_id: 1,
            origin_group_id: 0,
            origin_label: "private".to_string(),
            view_count: 3,
            created_at: 0,
            deleted: false,
        };
        let rendered = entry_table(&[entry]);
        assert!(rendered.contains("echo"));
        assert!(rendered.contains("TEXT"));
    }
}
