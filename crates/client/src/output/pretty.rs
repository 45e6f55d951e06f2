//! Pretty output formatting.

use serde_json::Value;
use tablegate_core::item::{Item, ID_ATTRIBUTE};
use tablegate_core::paging::Page;

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Format an item for display, id first and the other attributes in order.
pub fn format_item(item: &Item) -> String {
    let mut output = match item.get(ID_ATTRIBUTE) {
        Some(id) => format!("ID: {}", format_value(id)),
        None => "(no id)".to_string(),
    };
    for (name, value) in item.iter().filter(|(name, _)| *name != ID_ATTRIBUTE) {
        output.push_str(&format!("\n  {}: {}", name, format_value(value)));
    }
    output
}

/// Format items for display.
pub fn format_items(items: &[Item]) -> String {
    if items.is_empty() {
        return "No items found.".to_string();
    }
    let mut output = format!("ITEMS ({})\n", items.len());
    output.push_str(&"-".repeat(40));
    for item in items {
        output.push_str(&format!("\n{}", format_item(item)));
        output.push('\n');
    }
    output
}

/// Format a page of items, with the cursor for the next page when there is one.
pub fn format_page(page: &Page<Item>) -> String {
    let mut output = format_items(&page.items);
    if let Some(cursor) = &page.next_cursor {
        output.push_str(&format!("\nNext cursor: {}", cursor));
    }
    output
}

/// Format table names for display.
pub fn format_tables(tables: &[String]) -> String {
    if tables.is_empty() {
        return "No tables found.".to_string();
    }
    let mut output = format!("TABLES ({})\n", tables.len());
    output.push_str(&"-".repeat(40));
    for table in tables {
        output.push_str(&format!("\n{}", table));
    }
    output
}
