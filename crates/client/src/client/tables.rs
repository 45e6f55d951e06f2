//! Table API operations.

use serde_json::json;

use super::TablegateClient;
use crate::error::Result;

impl TablegateClient {
    /// Create a table keyed by `id`.
    pub async fn create_table(&self, name: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("/dynamodb/create-table"))
            .json(&json!({ "tableName": name }))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    /// Delete a table.
    pub async fn delete_table(&self, name: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("/dynamodb/delete-table"))
            .json(&json!({ "tableName": name }))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    /// List table names.
    pub async fn list_tables(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.url("/dynamodb/list-tables"))
            .send()
            .await?;
        self.handle_response(response).await
    }
}
