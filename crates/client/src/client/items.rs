//! Item API operations.

use serde_json::json;
use tablegate_core::expression::Expression;
use tablegate_core::item::Item;
use tablegate_core::paging::{Page, PageRequest};

use super::{page_params, TablegateClient};
use crate::error::Result;

impl TablegateClient {
    /// Create an `{id, name, phone}` item.
    pub async fn create_item_with_details(
        &self,
        table: &str,
        id: &str,
        name: &str,
        phone: &str,
    ) -> Result<()> {
        let response = self
            .client
            .post(self.url("/dynamodb/create-with-details"))
            .json(&json!({ "tableName": table, "id": id, "name": name, "phone": phone }))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    /// Create an arbitrary item.
    pub async fn create_item(&self, table: &str, item: &Item) -> Result<()> {
        let response = self
            .client
            .post(self.url("/dynamodb/create"))
            .json(&json!({ "tableName": table, "item": item }))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    /// Get item by ID.
    pub async fn get_item(&self, table: &str, id: &str) -> Result<Item> {
        let response = self
            .client
            .get(self.segment_url(&["dynamodb", "item", table, id])?)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete item by ID.
    pub async fn delete_item(&self, table: &str, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.segment_url(&["dynamodb", "delete", table, id])?)
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    /// Update name and/or phone of an item.
    pub async fn update_item(
        &self,
        table: &str,
        id: &str,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<()> {
        let response = self
            .client
            .put(self.url("/dynamodb/update"))
            .json(&json!({ "tableName": table, "id": id, "name": name, "phone": phone }))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    /// Query items with a key condition.
    pub async fn query(
        &self,
        table: &str,
        key_condition: &Expression,
        page: &PageRequest,
    ) -> Result<Page<Item>> {
        let mut params = expression_params(table, "keyConditionExpression", key_condition)?;
        params.extend(page_params(page));
        let response = self
            .client
            .get(self.url("/dynamodb/query"))
            .query(&params)
            .send()
            .await?;
        self.handle_page_response(response).await
    }

    /// Scan items with a filter.
    pub async fn scan(
        &self,
        table: &str,
        filter: &Expression,
        page: &PageRequest,
    ) -> Result<Page<Item>> {
        let mut params = expression_params(table, "filterExpression", filter)?;
        params.extend(page_params(page));
        let response = self
            .client
            .get(self.url("/dynamodb/scan"))
            .query(&params)
            .send()
            .await?;
        self.handle_page_response(response).await
    }

    /// List items of a table.
    pub async fn list_items(&self, table: &str, page: &PageRequest) -> Result<Page<Item>> {
        let response = self
            .client
            .get(self.segment_url(&["dynamodb", "items", table])?)
            .query(&page_params(page))
            .send()
            .await?;
        self.handle_page_response(response).await
    }
}

fn expression_params(
    table: &str,
    field: &'static str,
    expression: &Expression,
) -> Result<Vec<(&'static str, String)>> {
    let mut params = vec![
        ("tableName", table.to_string()),
        (field, expression.expression.clone()),
        (
            "expressionAttributeValues",
            serde_json::to_string(&expression.values)?,
        ),
    ];
    if !expression.names.is_empty() {
        params.push((
            "expressionAttributeNames",
            serde_json::to_string(&expression.names)?,
        ));
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_expression_params_without_names() {
        let values = json!({ ":id": "1" }).as_object().cloned().unwrap();
        let expression = Expression::new("id = :id").with_values(values);

        let params = expression_params("Users", "keyConditionExpression", &expression).unwrap();

        assert_eq!(
            params,
            vec![
                ("tableName", "Users".to_string()),
                ("keyConditionExpression", "id = :id".to_string()),
                ("expressionAttributeValues", r#"{":id":"1"}"#.to_string()),
            ]
        );
    }

    #[test]
    fn test_expression_params_with_names() {
        let values = json!({ ":n": "Alice" }).as_object().cloned().unwrap();
        let names = HashMap::from([("#n".to_string(), "name".to_string())]);
        let expression = Expression::new("#n = :n")
            .with_values(values)
            .with_names(names);

        let params = expression_params("Users", "filterExpression", &expression).unwrap();

        assert_eq!(params.len(), 4);
        assert_eq!(
            params[3],
            ("expressionAttributeNames", r##"{"#n":"name"}"##.to_string())
        );
    }
}
