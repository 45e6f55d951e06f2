//! DynamoDB store implementation.
//!
//! Implements `TableStore` from `tablegate_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;

use tablegate_core::expression::Expression;
use tablegate_core::item::{Item, ItemKey};
use tablegate_core::paging::{Page, PageRequest, MAX_PAGE_LIMIT};
use tablegate_core::storage::{Result, TableStore};
use tablegate_core::table::TableSpec;
use tablegate_core::update::UpdateSpec;

use crate::config::Config;

use super::conversions::{
    exclusive_start_key, expression_names, expression_values, from_attribute_map,
    from_attribute_maps, next_cursor, table_definition, to_attribute_map,
};
use super::error::map_sdk_error;

/// Most table names ListTables returns per call.
const LIST_TABLES_MAX: u32 = 100;

/// DynamoDB-backed store.
///
/// Holds a single client for the process lifetime; the client is cheap to
/// clone and safe to share across concurrent requests.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    /// Creates a store over an already configured client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a client from configuration and wraps it.
    ///
    /// Credentials come from the AWS SDK default chain.
    pub async fn from_config(config: &Config) -> Self {
        let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
        }

        let sdk_config = sdk_config_loader.load().await;
        Self::new(Client::new(&sdk_config))
    }
}

fn page_limit(page: &PageRequest) -> Option<i32> {
    page.limit.map(|limit| limit.min(MAX_PAGE_LIMIT) as i32)
}

#[async_trait]
impl TableStore for DynamoDbStore {
    async fn put_item(&self, table: &str, item: Item) -> Result<()> {
        let item = to_attribute_map(&item)?;

        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "PutItem"))?;

        Ok(())
    }

    async fn get_item(&self, table: &str, key: &ItemKey) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(table)
            .set_key(Some(to_attribute_map(key.as_map())?))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "GetItem"))?;

        result.item.map(from_attribute_map).transpose()
    }

    async fn delete_item(&self, table: &str, key: &ItemKey) -> Result<()> {
        self.client
            .delete_item()
            .table_name(table)
            .set_key(Some(to_attribute_map(key.as_map())?))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "DeleteItem"))?;

        Ok(())
    }

    async fn update_item(&self, table: &str, key: &ItemKey, update: &UpdateSpec) -> Result<()> {
        let update = update.to_expression()?;

        self.client
            .update_item()
            .table_name(table)
            .set_key(Some(to_attribute_map(key.as_map())?))
            .update_expression(update.expression)
            .set_expression_attribute_names(expression_names(&update.names))
            .set_expression_attribute_values(expression_values(&update.values)?)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "UpdateItem"))?;

        Ok(())
    }

    async fn query(
        &self,
        table: &str,
        key_condition: &Expression,
        page: PageRequest,
    ) -> Result<Page<Item>> {
        let result = self
            .client
            .query()
            .table_name(table)
            .key_condition_expression(&key_condition.expression)
            .set_expression_attribute_names(expression_names(&key_condition.names))
            .set_expression_attribute_values(expression_values(&key_condition.values)?)
            .set_limit(page_limit(&page))
            .set_exclusive_start_key(exclusive_start_key(&page)?)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "Query"))?;

        tracing::debug!(table, count = result.count, "Query returned");

        Ok(Page::new(
            from_attribute_maps(result.items)?,
            next_cursor(result.last_evaluated_key)?,
        ))
    }

    async fn scan(
        &self,
        table: &str,
        filter: Option<&Expression>,
        page: PageRequest,
    ) -> Result<Page<Item>> {
        let mut request = self
            .client
            .scan()
            .table_name(table)
            .set_limit(page_limit(&page))
            .set_exclusive_start_key(exclusive_start_key(&page)?);

        if let Some(filter) = filter {
            request = request
                .filter_expression(&filter.expression)
                .set_expression_attribute_names(expression_names(&filter.names))
                .set_expression_attribute_values(expression_values(&filter.values)?);
        }

        let result = request
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "Scan"))?;

        tracing::debug!(
            table,
            count = result.count,
            scanned = result.scanned_count,
            "Scan returned"
        );

        Ok(Page::new(
            from_attribute_maps(result.items)?,
            next_cursor(result.last_evaluated_key)?,
        ))
    }

    async fn create_table(&self, spec: &TableSpec) -> Result<()> {
        let (key_schema, attribute_definition, throughput) = table_definition(spec)?;

        self.client
            .create_table()
            .table_name(&spec.table_name)
            .key_schema(key_schema)
            .attribute_definitions(attribute_definition)
            .provisioned_throughput(throughput)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "CreateTable"))?;

        Ok(())
    }

    async fn delete_table(&self, table: &str) -> Result<()> {
        self.client
            .delete_table()
            .table_name(table)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "DeleteTable"))?;

        Ok(())
    }

    async fn list_tables(&self, limit: Option<u32>) -> Result<Vec<String>> {
        let result = self
            .client
            .list_tables()
            .set_limit(limit.map(|l| l.clamp(1, LIST_TABLES_MAX) as i32))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "ListTables"))?;

        Ok(result.table_names.unwrap_or_default())
    }
}
