//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between JSON items and DynamoDB
//! AttributeValue maps. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput,
    ScalarAttributeType,
};
use serde_json::{Map, Value};

use tablegate_core::item::Item;
use tablegate_core::paging::{Cursor, PageRequest};
use tablegate_core::storage::Result;
use tablegate_core::table::{AttributeType, TableSpec};

use super::error::{map_build_error, map_marshal_error};

pub type AttributeMap = HashMap<String, AttributeValue>;

/// Marshal a JSON object into a DynamoDB item.
pub fn to_attribute_map(item: &Map<String, Value>) -> Result<AttributeMap> {
    serde_dynamo::to_item(item).map_err(map_marshal_error)
}

/// Unmarshal a DynamoDB item into a JSON object.
pub fn from_attribute_map(item: AttributeMap) -> Result<Item> {
    serde_dynamo::from_item(item).map_err(map_marshal_error)
}

/// Unmarshal every item of a result page.
pub fn from_attribute_maps(items: Option<Vec<AttributeMap>>) -> Result<Vec<Item>> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(from_attribute_map)
        .collect()
}

/// Marshal expression attribute values.
///
/// DynamoDB rejects an empty `ExpressionAttributeValues` map, so an empty
/// mapping becomes `None`.
pub fn expression_values(values: &Map<String, Value>) -> Result<Option<AttributeMap>> {
    if values.is_empty() {
        return Ok(None);
    }
    values
        .iter()
        .map(|(placeholder, value)| {
            serde_dynamo::to_attribute_value::<_, AttributeValue>(value)
                .map(|av| (placeholder.clone(), av))
                .map_err(map_marshal_error)
        })
        .collect::<Result<AttributeMap>>()
        .map(Some)
}

/// Expression attribute names, `None` when empty.
pub fn expression_names(names: &HashMap<String, String>) -> Option<HashMap<String, String>> {
    if names.is_empty() {
        None
    } else {
        Some(names.clone())
    }
}

/// The `ExclusiveStartKey` for a page request.
pub fn exclusive_start_key(page: &PageRequest) -> Result<Option<AttributeMap>> {
    match &page.cursor {
        Some(cursor) => to_attribute_map(&cursor.to_key()?).map(Some),
        None => Ok(None),
    }
}

/// The cursor for the page after one that returned `last_evaluated_key`.
pub fn next_cursor(last_evaluated_key: Option<AttributeMap>) -> Result<Option<Cursor>> {
    match last_evaluated_key {
        Some(key) if !key.is_empty() => Cursor::from_key(&from_attribute_map(key)?).map(Some),
        _ => Ok(None),
    }
}

/// Key schema, attribute definitions and throughput for CreateTable.
pub fn table_definition(
    spec: &TableSpec,
) -> Result<(KeySchemaElement, AttributeDefinition, ProvisionedThroughput)> {
    let key_schema = KeySchemaElement::builder()
        .attribute_name(&spec.partition_key.name)
        .key_type(KeyType::Hash)
        .build()
        .map_err(map_build_error)?;

    let attribute_type = match spec.partition_key.attribute_type {
        AttributeType::String => ScalarAttributeType::S,
        AttributeType::Number => ScalarAttributeType::N,
    };
    let attribute_definition = AttributeDefinition::builder()
        .attribute_name(&spec.partition_key.name)
        .attribute_type(attribute_type)
        .build()
        .map_err(map_build_error)?;

    let throughput = ProvisionedThroughput::builder()
        .read_capacity_units(spec.throughput.read_capacity_units)
        .write_capacity_units(spec.throughput.write_capacity_units)
        .build()
        .map_err(map_build_error)?;

    Ok((key_schema, attribute_definition, throughput))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tablegate_core::item::{item_with_details, ItemKey};
    use tablegate_core::table::Throughput;

    #[test]
    fn test_details_item_marshals_to_strings() {
        let item = item_with_details("1", "Alice", "555-0100");

        let attrs = to_attribute_map(&item).unwrap();

        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs["id"], AttributeValue::S("1".to_string()));
        assert_eq!(attrs["name"], AttributeValue::S("Alice".to_string()));
        assert_eq!(attrs["phone"], AttributeValue::S("555-0100".to_string()));
    }

    #[test]
    fn test_nested_values_marshal() {
        let item = json!({
            "id": "1",
            "age": 30,
            "active": true,
            "nickname": null,
            "tags": ["a", "b"],
            "address": { "city": "Montevideo" }
        });

        let attrs = to_attribute_map(item.as_object().unwrap()).unwrap();

        assert_eq!(attrs["age"], AttributeValue::N("30".to_string()));
        assert_eq!(attrs["active"], AttributeValue::Bool(true));
        assert_eq!(attrs["nickname"], AttributeValue::Null(true));
        assert_eq!(
            attrs["tags"],
            AttributeValue::L(vec![
                AttributeValue::S("a".to_string()),
                AttributeValue::S("b".to_string()),
            ])
        );
        assert!(matches!(&attrs["address"], AttributeValue::M(m) if m.contains_key("city")));
    }

    #[test]
    fn test_unmarshal_remote_item() {
        let mut attrs = AttributeMap::new();
        attrs.insert("id".to_string(), AttributeValue::S("7".to_string()));
        attrs.insert("score".to_string(), AttributeValue::N("12".to_string()));
        attrs.insert("verified".to_string(), AttributeValue::Bool(false));

        let item = from_attribute_map(attrs).unwrap();

        assert_eq!(
            Value::Object(item),
            json!({ "id": "7", "score": 12, "verified": false })
        );
    }

    #[test]
    fn test_missing_items_unmarshal_to_empty() {
        assert!(from_attribute_maps(None).unwrap().is_empty());
    }

    #[test]
    fn test_empty_expression_values_are_omitted() {
        assert_eq!(expression_values(&Map::new()).unwrap(), None);
        assert_eq!(expression_names(&HashMap::new()), None);
    }

    #[test]
    fn test_expression_values_marshal_each_placeholder() {
        let values = json!({ ":id": "1", ":min": 3 });

        let attrs = expression_values(values.as_object().unwrap())
            .unwrap()
            .unwrap();

        assert_eq!(attrs[":id"], AttributeValue::S("1".to_string()));
        assert_eq!(attrs[":min"], AttributeValue::N("3".to_string()));
    }

    #[test]
    fn test_cursor_carries_last_evaluated_key() {
        let mut last_key = AttributeMap::new();
        last_key.insert("id".to_string(), AttributeValue::S("42".to_string()));

        let cursor = next_cursor(Some(last_key.clone())).unwrap().unwrap();
        let page = PageRequest {
            limit: None,
            cursor: Some(cursor),
        };

        assert_eq!(exclusive_start_key(&page).unwrap(), Some(last_key));
    }

    #[test]
    fn test_no_last_key_means_no_cursor() {
        assert_eq!(next_cursor(None).unwrap(), None);
        assert_eq!(next_cursor(Some(AttributeMap::new())).unwrap(), None);
    }

    #[test]
    fn test_key_marshals_like_item() {
        let key = ItemKey::id("1");
        let attrs = to_attribute_map(key.as_map()).unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs["id"], AttributeValue::S("1".to_string()));
    }

    #[test]
    fn test_table_definition() {
        let spec = TableSpec::keyed_by_id(
            "Users",
            Throughput {
                read_capacity_units: 5,
                write_capacity_units: 7,
            },
        );

        let (key_schema, attribute, throughput) = table_definition(&spec).unwrap();

        assert_eq!(key_schema.attribute_name(), "id");
        assert_eq!(key_schema.key_type(), &KeyType::Hash);
        assert_eq!(attribute.attribute_type(), &ScalarAttributeType::S);
        assert_eq!(throughput.read_capacity_units(), 5);
        assert_eq!(throughput.write_capacity_units(), 7);
    }
}
