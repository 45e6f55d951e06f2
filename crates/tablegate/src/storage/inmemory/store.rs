//! In-memory store implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use tablegate_core::expression::Expression;
use tablegate_core::item::{Item, ItemKey};
use tablegate_core::paging::{Cursor, Page, PageRequest};
use tablegate_core::storage::{Result, StoreError, TableStore};
use tablegate_core::table::TableSpec;
use tablegate_core::update::UpdateSpec;

use super::expression::Condition;

const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";
const RESOURCE_IN_USE: &str = "ResourceInUseException";
const VALIDATION: &str = "ValidationException";

#[derive(Debug, Clone)]
struct Table {
    key_attribute: String,
    /// Items ordered by the JSON rendering of their key value.
    items: BTreeMap<String, Item>,
}

impl Table {
    fn slot(&self, key_value: &Value) -> String {
        key_value.to_string()
    }

    fn item_slot(&self, operation: &'static str, item: &Item) -> Result<String> {
        item.get(&self.key_attribute)
            .map(|value| self.slot(value))
            .ok_or_else(|| {
                StoreError::remote_with_code(
                    operation,
                    VALIDATION,
                    "One of the required keys was not given a value",
                )
            })
    }

    fn key_slot(&self, operation: &'static str, key: &ItemKey) -> Result<String> {
        let map = key.as_map();
        match map.get(&self.key_attribute) {
            Some(value) if map.len() == 1 => Ok(self.slot(value)),
            _ => Err(StoreError::remote_with_code(
                operation,
                VALIDATION,
                "The provided key element does not match the schema",
            )),
        }
    }

    fn key_of(&self, item: &Item) -> Map<String, Value> {
        let mut key = Map::new();
        if let Some(value) = item.get(&self.key_attribute) {
            key.insert(self.key_attribute.clone(), value.clone());
        }
        key
    }

    /// Reads one page in key order.
    ///
    /// `key_condition` selects the items that count against `limit`;
    /// `filter` only drops items from the page after they were counted.
    fn read_page(
        &self,
        operation: &'static str,
        key_condition: Option<&Condition>,
        filter: Option<&Condition>,
        page: &PageRequest,
    ) -> Result<Page<Item>> {
        let start = match &page.cursor {
            Some(cursor) => {
                let key = ItemKey::from_map(cursor.to_key()?);
                Some(self.key_slot(operation, &key)?)
            }
            None => None,
        };

        let mut remaining = self
            .items
            .iter()
            .filter(|(slot, _)| start.as_ref().is_none_or(|start| *slot > start))
            .filter(|(_, item)| key_condition.is_none_or(|c| c.matches(item)))
            .peekable();

        let limit = page.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        let mut items = Vec::new();
        let mut evaluated = 0;
        let mut last_evaluated = None;

        while evaluated < limit {
            let Some((_, item)) = remaining.next() else {
                break;
            };
            evaluated += 1;
            last_evaluated = Some(item);
            if filter.is_none_or(|c| c.matches(item)) {
                items.push(item.clone());
            }
        }

        let next_cursor = match (remaining.peek(), last_evaluated) {
            (Some(_), Some(last)) => Some(Cursor::from_key(&self.key_of(last))?),
            _ => None,
        };

        Ok(Page::new(items, next_cursor))
    }
}

/// In-memory storage backend.
///
/// Uses a map wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<BTreeMap<String, Table>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn table_not_found(operation: &'static str) -> StoreError {
    StoreError::remote_with_code(operation, RESOURCE_NOT_FOUND, "Requested resource not found")
}

fn parse_condition(operation: &'static str, expression: &Expression) -> Result<Condition> {
    Condition::parse(&expression.expression, &expression.names, &expression.values)
        .map_err(|e| StoreError::remote_with_code(operation, VALIDATION, e.to_string()))
}

#[async_trait]
impl TableStore for InMemoryStore {
    async fn put_item(&self, table: &str, item: Item) -> Result<()> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table)
            .ok_or_else(|| table_not_found("PutItem"))?;
        let slot = table.item_slot("PutItem", &item)?;
        table.items.insert(slot, item);
        Ok(())
    }

    async fn get_item(&self, table: &str, key: &ItemKey) -> Result<Option<Item>> {
        let tables = self.tables.read().await;
        let table = tables.get(table).ok_or_else(|| table_not_found("GetItem"))?;
        let slot = table.key_slot("GetItem", key)?;
        Ok(table.items.get(&slot).cloned())
    }

    async fn delete_item(&self, table: &str, key: &ItemKey) -> Result<()> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table)
            .ok_or_else(|| table_not_found("DeleteItem"))?;
        let slot = table.key_slot("DeleteItem", key)?;
        table.items.remove(&slot);
        Ok(())
    }

    async fn update_item(&self, table: &str, key: &ItemKey, update: &UpdateSpec) -> Result<()> {
        update.to_expression()?;

        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table)
            .ok_or_else(|| table_not_found("UpdateItem"))?;
        let slot = table.key_slot("UpdateItem", key)?;

        if let Some((attribute, _)) = update
            .assignments()
            .find(|(attribute, _)| *attribute == table.key_attribute)
        {
            return Err(StoreError::remote_with_code(
                "UpdateItem",
                VALIDATION,
                format!("Cannot update attribute {attribute}. This attribute is part of the key"),
            ));
        }

        // UpdateItem creates the item when it does not exist yet.
        let item = table
            .items
            .entry(slot)
            .or_insert_with(|| key.as_map().clone());
        update.apply_to(item);
        Ok(())
    }

    async fn query(
        &self,
        table: &str,
        key_condition: &Expression,
        page: PageRequest,
    ) -> Result<Page<Item>> {
        let condition = parse_condition("Query", key_condition)?;
        let tables = self.tables.read().await;
        let table = tables.get(table).ok_or_else(|| table_not_found("Query"))?;
        table.read_page("Query", Some(&condition), None, &page)
    }

    async fn scan(
        &self,
        table: &str,
        filter: Option<&Expression>,
        page: PageRequest,
    ) -> Result<Page<Item>> {
        let condition = filter.map(|f| parse_condition("Scan", f)).transpose()?;
        let tables = self.tables.read().await;
        let table = tables.get(table).ok_or_else(|| table_not_found("Scan"))?;
        table.read_page("Scan", None, condition.as_ref(), &page)
    }

    async fn create_table(&self, spec: &TableSpec) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.contains_key(&spec.table_name) {
            return Err(StoreError::remote_with_code(
                "CreateTable",
                RESOURCE_IN_USE,
                format!("Table already exists: {}", spec.table_name),
            ));
        }
        tables.insert(
            spec.table_name.clone(),
            Table {
                key_attribute: spec.partition_key.name.clone(),
                items: BTreeMap::new(),
            },
        );
        Ok(())
    }

    async fn delete_table(&self, table: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .remove(table)
            .map(|_| ())
            .ok_or_else(|| table_not_found("DeleteTable"))
    }

    async fn list_tables(&self, limit: Option<u32>) -> Result<Vec<String>> {
        let tables = self.tables.read().await;
        let limit = limit.map(|l| l as usize).unwrap_or(100);
        Ok(tables.keys().take(limit).cloned().collect())
    }
}
