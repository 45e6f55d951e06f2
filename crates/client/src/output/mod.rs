//! Rendering of command results for the terminal.

pub mod json;
pub mod pretty;

use tablegate_core::item::Item;
use tablegate_core::paging::Page;

use crate::cli::OutputFormat;

/// Renders a serializable result as compact or indented JSON.
pub fn format_output<T: serde::Serialize>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_json(value),
        OutputFormat::Pretty => json::format_json_pretty(value),
    }
}

/// Renders a page of items together with its next cursor.
pub fn format_item_page(page: &Page<Item>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_page(page),
        OutputFormat::Pretty => pretty::format_page(page),
    }
}
