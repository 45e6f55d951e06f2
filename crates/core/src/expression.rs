//! Pass-through condition expressions.
//!
//! Key-condition and filter expressions are opaque strings evaluated by the
//! remote service. The gateway only decodes the JSON-encoded placeholder
//! mappings that travel with them.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::storage::{Result, StoreError};

/// A condition expression with its placeholder bindings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    /// Expression text, e.g. `id = :id`.
    pub expression: String,
    /// `:placeholder` -> literal value.
    pub values: Map<String, Value>,
    /// `#placeholder` -> attribute name.
    pub names: HashMap<String, String>,
}

impl Expression {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            ..Default::default()
        }
    }

    pub fn with_values(mut self, values: Map<String, Value>) -> Self {
        self.values = values;
        self
    }

    pub fn with_names(mut self, names: HashMap<String, String>) -> Self {
        self.names = names;
        self
    }

    /// Binds a single `:placeholder`.
    pub fn value(mut self, placeholder: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(placeholder.into(), value.into());
        self
    }
}

/// Decodes an `expressionAttributeValues` parameter.
///
/// The parameter must be a JSON object; anything else is `InvalidInput`.
pub fn parse_attribute_values(raw: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(values)) => Ok(values),
        Ok(_) => Err(StoreError::InvalidInput(
            "expressionAttributeValues must be a JSON object".to_string(),
        )),
        Err(e) => Err(StoreError::InvalidInput(format!(
            "expressionAttributeValues is not valid JSON: {e}"
        ))),
    }
}

/// Decodes an `expressionAttributeNames` parameter (JSON object of strings).
pub fn parse_attribute_names(raw: &str) -> Result<HashMap<String, String>> {
    serde_json::from_str(raw).map_err(|e| {
        StoreError::InvalidInput(format!(
            "expressionAttributeNames must be a JSON object of strings: {e}"
        ))
    })
}
