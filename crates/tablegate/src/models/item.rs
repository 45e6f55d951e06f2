use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use tablegate_core::expression::{parse_attribute_names, parse_attribute_values, Expression};
use tablegate_core::item::{item_with_details, Item, ItemKey};
use tablegate_core::paging::PageRequest;
use tablegate_core::storage::Result;
use tablegate_core::update::UpdateSpec;

use super::require;

/// Request payload for POST /dynamodb/create-with-details.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateItemWithDetails {
    /// Table name in DynamoDB
    pub table_name: String,
    /// Item ID
    pub id: String,
    /// Item name
    pub name: String,
    /// Item phone number
    pub phone: String,
}

impl CreateItemWithDetails {
    /// Validates the payload and builds the `{id, name, phone}` item.
    pub fn into_item(self) -> Result<(String, Item)> {
        require("tableName", &self.table_name)?;
        require("id", &self.id)?;
        require("name", &self.name)?;
        require("phone", &self.phone)?;
        let item = item_with_details(&self.id, &self.name, &self.phone);
        Ok((self.table_name, item))
    }
}

/// Request payload for POST /dynamodb/create.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateItem {
    /// Table name in DynamoDB
    pub table_name: String,
    /// Any JSON object carrying the table's key attribute
    #[schema(value_type = Object)]
    pub item: Item,
}

impl CreateItem {
    pub fn validate(&self) -> Result<()> {
        require("tableName", &self.table_name)
    }
}

/// Request payload for PUT /dynamodb/update.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateItem {
    /// Table name in DynamoDB
    pub table_name: String,
    /// Item ID
    pub id: String,
    /// New item name
    pub name: Option<String>,
    /// New item phone number
    pub phone: Option<String>,
}

impl UpdateItem {
    /// Validates the payload and builds the key and update specification.
    ///
    /// Absent and empty optional fields are left out; with nothing left to
    /// set the request is rejected.
    pub fn into_update(self) -> Result<(String, ItemKey, UpdateSpec)> {
        require("tableName", &self.table_name)?;
        require("id", &self.id)?;

        let update = UpdateSpec::new()
            .set_if_present("name", self.name.as_deref())
            .set_if_present("phone", self.phone.as_deref());
        // Reject before any remote call.
        update.to_expression()?;

        Ok((self.table_name, ItemKey::id(self.id), update))
    }
}

/// Query string for GET /dynamodb/query.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct QueryParams {
    /// Table name in DynamoDB
    pub table_name: String,
    /// Key condition, e.g. `id = :id`
    pub key_condition_expression: String,
    /// JSON object of `:placeholder` values, e.g. `{":id":"1"}`
    pub expression_attribute_values: String,
    /// JSON object of `#placeholder` attribute names, e.g. `{"#n":"name"}`
    pub expression_attribute_names: Option<String>,
    /// Maximum items to evaluate (1-1000)
    pub limit: Option<u32>,
    /// Cursor from a previous page's `x-next-cursor` header
    pub cursor: Option<String>,
}

impl QueryParams {
    pub fn into_parts(self) -> Result<(String, Expression, PageRequest)> {
        require("tableName", &self.table_name)?;
        require("keyConditionExpression", &self.key_condition_expression)?;
        let expression = bind_expression(
            self.key_condition_expression,
            &self.expression_attribute_values,
            self.expression_attribute_names.as_deref(),
        )?;
        let page = PageRequest::from_params(self.limit, self.cursor.as_deref())?;
        Ok((self.table_name, expression, page))
    }
}

/// Query string for GET /dynamodb/scan.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct ScanParams {
    /// Table name in DynamoDB
    pub table_name: String,
    /// Filter applied to evaluated items, e.g. `#n = :n`
    pub filter_expression: String,
    /// JSON object of `:placeholder` values
    pub expression_attribute_values: String,
    /// JSON object of `#placeholder` attribute names
    pub expression_attribute_names: Option<String>,
    /// Maximum items to evaluate (1-1000)
    pub limit: Option<u32>,
    /// Cursor from a previous page's `x-next-cursor` header
    pub cursor: Option<String>,
}

impl ScanParams {
    pub fn into_parts(self) -> Result<(String, Expression, PageRequest)> {
        require("tableName", &self.table_name)?;
        require("filterExpression", &self.filter_expression)?;
        let expression = bind_expression(
            self.filter_expression,
            &self.expression_attribute_values,
            self.expression_attribute_names.as_deref(),
        )?;
        let page = PageRequest::from_params(self.limit, self.cursor.as_deref())?;
        Ok((self.table_name, expression, page))
    }
}

/// Query string for paged reads without an expression.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Maximum items per page (1-1000)
    pub limit: Option<u32>,
    /// Cursor from a previous page's `x-next-cursor` header
    pub cursor: Option<String>,
}

impl PageParams {
    pub fn into_page(self) -> Result<PageRequest> {
        PageRequest::from_params(self.limit, self.cursor.as_deref())
    }
}

fn bind_expression(
    expression: String,
    raw_values: &str,
    raw_names: Option<&str>,
) -> Result<Expression> {
    require("expressionAttributeValues", raw_values)?;
    let values = parse_attribute_values(raw_values)?;
    let names = match raw_names {
        Some(raw) if !raw.is_empty() => parse_attribute_names(raw)?,
        _ => Default::default(),
    };
    Ok(Expression::new(expression)
        .with_values(values)
        .with_names(names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tablegate_core::storage::StoreError;

    #[test]
    fn test_details_payload_uses_camel_case() {
        let payload: CreateItemWithDetails = serde_json::from_value(json!({
            "tableName": "Users",
            "id": "1",
            "name": "Alice",
            "phone": "555-0100"
        }))
        .unwrap();

        let (table, item) = payload.into_item().unwrap();

        assert_eq!(table, "Users");
        assert_eq!(
            serde_json::Value::Object(item),
            json!({ "id": "1", "name": "Alice", "phone": "555-0100" })
        );
    }

    #[test]
    fn test_details_payload_requires_every_field() {
        let payload: CreateItemWithDetails =
            serde_json::from_value(json!({ "tableName": "Users", "id": "1", "name": "Alice" }))
                .unwrap();

        let err = payload.into_item().unwrap_err();

        assert_eq!(err, StoreError::InvalidInput("phone is required".to_string()));
    }

    #[test]
    fn test_update_with_one_field() {
        let payload: UpdateItem =
            serde_json::from_value(json!({ "tableName": "Users", "id": "1", "name": "Bob" }))
                .unwrap();

        let (table, key, update) = payload.into_update().unwrap();

        assert_eq!(table, "Users");
        assert_eq!(key, ItemKey::id("1"));
        assert_eq!(update.assignments().count(), 1);
    }

    #[test]
    fn test_update_without_fields_is_rejected() {
        let payload: UpdateItem =
            serde_json::from_value(json!({ "tableName": "Users", "id": "1", "phone": "" }))
                .unwrap();

        assert!(matches!(
            payload.into_update(),
            Err(StoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_query_params_parse_values_and_names() {
        let params = QueryParams {
            table_name: "Users".to_string(),
            key_condition_expression: "#k = :id".to_string(),
            expression_attribute_values: r#"{":id":"1"}"#.to_string(),
            expression_attribute_names: Some(r##"{"#k":"id"}"##.to_string()),
            limit: Some(10),
            cursor: None,
        };

        let (table, expression, page) = params.into_parts().unwrap();

        assert_eq!(table, "Users");
        assert_eq!(expression.values[":id"], json!("1"));
        assert_eq!(expression.names["#k"], "id");
        assert_eq!(page.limit, Some(10));
    }

    #[test]
    fn test_scan_params_reject_malformed_values() {
        let params = ScanParams {
            table_name: "Users".to_string(),
            filter_expression: "name = :n".to_string(),
            expression_attribute_values: "{oops".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            params.into_parts(),
            Err(StoreError::InvalidInput(_))
        ));
    }
}
