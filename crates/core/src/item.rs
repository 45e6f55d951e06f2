//! Item and key representations.
//!
//! Items stay dynamic: any JSON object is a valid item, and the remote
//! table's key schema is the only thing that constrains them.

use serde_json::{Map, Value};

/// Name of the partition key attribute used by tables this gateway creates.
pub const ID_ATTRIBUTE: &str = "id";

/// A single record: attribute name to JSON value.
pub type Item = Map<String, Value>;

/// The key attributes that identify an item within a table.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemKey(Item);

impl ItemKey {
    /// Key for a table whose partition key is the string attribute `id`.
    pub fn id(id: impl Into<String>) -> Self {
        let mut key = Map::new();
        key.insert(ID_ATTRIBUTE.to_string(), Value::String(id.into()));
        Self(key)
    }

    /// Wraps an arbitrary key mapping.
    pub fn from_map(key: Item) -> Self {
        Self(key)
    }

    /// The key attributes.
    pub fn as_map(&self) -> &Item {
        &self.0
    }

    pub fn into_map(self) -> Item {
        self.0
    }

    /// Whether `item` carries every attribute of this key with the same value.
    pub fn matches(&self, item: &Item) -> bool {
        self.0
            .iter()
            .all(|(name, value)| item.get(name) == Some(value))
    }
}

/// Human-readable form used in logs and not-found messages, e.g. `id=1`.
impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (name, value) in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            match value {
                Value::String(s) => write!(f, "{name}={s}")?,
                other => write!(f, "{name}={other}")?,
            }
        }
        Ok(())
    }
}

/// Builds the `{id, name, phone}` record written by create-with-details.
pub fn item_with_details(id: &str, name: &str, phone: &str) -> Item {
    let mut item = Map::new();
    item.insert(ID_ATTRIBUTE.to_string(), Value::String(id.to_string()));
    item.insert("name".to_string(), Value::String(name.to_string()));
    item.insert("phone".to_string(), Value::String(phone.to_string()));
    item
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_key_holds_single_string_attribute() {
        let key = ItemKey::id("42");
        assert_eq!(Value::Object(key.into_map()), json!({ "id": "42" }));
    }

    #[test]
    fn test_item_with_details_fields() {
        let item = item_with_details("1", "Alice", "555-0100");
        assert_eq!(
            Value::Object(item),
            json!({ "id": "1", "name": "Alice", "phone": "555-0100" })
        );
    }

    #[test]
    fn test_key_matches_item_with_same_id() {
        let item = item_with_details("1", "Alice", "555-0100");
        assert!(ItemKey::id("1").matches(&item));
        assert!(!ItemKey::id("2").matches(&item));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(ItemKey::id("7").to_string(), "id=7");

        let mut composite = Map::new();
        composite.insert("pk".to_string(), json!("user"));
        composite.insert("sk".to_string(), json!(3));
        assert_eq!(ItemKey::from_map(composite).to_string(), "pk=user,sk=3");
    }
}
