use serde::Deserialize;
use utoipa::ToSchema;

use tablegate_core::storage::Result;

use super::require;

/// Request payload for POST /dynamodb/create-table and /dynamodb/delete-table.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TableName {
    /// Table name in DynamoDB
    pub table_name: String,
}

impl TableName {
    pub fn into_name(self) -> Result<String> {
        require("tableName", &self.table_name)?;
        Ok(self.table_name)
    }
}
