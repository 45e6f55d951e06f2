mod item;
mod table;

pub use item::{CreateItem, CreateItemWithDetails, PageParams, QueryParams, ScanParams, UpdateItem};
pub use table::TableName;

use tablegate_core::storage::{Result, StoreError};

/// Rejects a missing or empty required string field.
fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StoreError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}
