use async_trait::async_trait;

use crate::expression::Expression;
use crate::item::{Item, ItemKey};
use crate::paging::{Page, PageRequest};
use crate::table::TableSpec;
use crate::update::UpdateSpec;

use super::Result;

/// Data-access contract: each method maps onto exactly one remote call.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Writes an item, replacing any item with the same key.
    async fn put_item(&self, table: &str, item: Item) -> Result<()>;

    /// Reads an item by key.
    async fn get_item(&self, table: &str, key: &ItemKey) -> Result<Option<Item>>;

    /// Deletes an item by key. Deleting a missing item is not an error.
    async fn delete_item(&self, table: &str, key: &ItemKey) -> Result<()>;

    /// Sets the attributes in `update` on the item with `key`.
    async fn update_item(&self, table: &str, key: &ItemKey, update: &UpdateSpec) -> Result<()>;

    /// Reads one page of items matching a key condition.
    async fn query(
        &self,
        table: &str,
        key_condition: &Expression,
        page: PageRequest,
    ) -> Result<Page<Item>>;

    /// Reads one page of a table scan, optionally filtered.
    async fn scan(
        &self,
        table: &str,
        filter: Option<&Expression>,
        page: PageRequest,
    ) -> Result<Page<Item>>;

    /// Creates a table.
    async fn create_table(&self, spec: &TableSpec) -> Result<()>;

    /// Deletes a table.
    async fn delete_table(&self, table: &str) -> Result<()>;

    /// Lists table names (first page only).
    async fn list_tables(&self, limit: Option<u32>) -> Result<Vec<String>>;
}
