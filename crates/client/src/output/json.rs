//! JSON output formatting.

use serde_json::json;
use tablegate_core::item::Item;
use tablegate_core::paging::Page;

/// Format a value as JSON.
pub fn format_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Format a value as indented JSON.
pub fn format_json_pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Format a page as `{"items": [...], "nextCursor": ...}`.
pub fn format_page(page: &Page<Item>) -> String {
    format_json(&json!({
        "items": page.items,
        "nextCursor": page.next_cursor.as_ref().map(|c| c.as_str()),
    }))
}
