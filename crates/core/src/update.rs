//! Structured update specifications.
//!
//! Callers describe an update as "attribute -> new value". The translation
//! into a DynamoDB `SET` expression happens here, with every attribute name
//! and value bound through placeholders so nothing the caller supplies is
//! spliced into the expression text.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use crate::storage::{Result, StoreError};

/// The attributes to overwrite on an item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSpec {
    assignments: BTreeMap<String, Value>,
}

/// An update expression ready to hand to the database service.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: Map<String, Value>,
}

impl UpdateSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `attribute` to `value`, replacing an earlier assignment.
    pub fn set(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assignments.insert(attribute.into(), value.into());
        self
    }

    /// Sets `attribute` only when `value` is present and non-empty.
    pub fn set_if_present(self, attribute: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.set(attribute, v),
            _ => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Assignments in attribute-name order.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.assignments.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Translates the specification into `SET #u0 = :u0, #u1 = :u1, ...`.
    ///
    /// Returns `InvalidInput` for an empty specification: a bare `SET ` is
    /// not a valid expression.
    pub fn to_expression(&self) -> Result<UpdateExpression> {
        if self.is_empty() {
            return Err(StoreError::InvalidInput(
                "update requires at least one attribute to set".to_string(),
            ));
        }

        let mut clauses = Vec::with_capacity(self.assignments.len());
        let mut names = HashMap::with_capacity(self.assignments.len());
        let mut values = Map::new();

        for (index, (attribute, value)) in self.assignments.iter().enumerate() {
            let name_placeholder = format!("#u{index}");
            let value_placeholder = format!(":u{index}");
            clauses.push(format!("{name_placeholder} = {value_placeholder}"));
            names.insert(name_placeholder, attribute.clone());
            values.insert(value_placeholder, value.clone());
        }

        Ok(UpdateExpression {
            expression: format!("SET {}", clauses.join(", ")),
            names,
            values,
        })
    }

    /// Applies the assignments to a local copy of an item.
    pub fn apply_to(&self, item: &mut Map<String, Value>) {
        for (attribute, value) in &self.assignments {
            item.insert(attribute.clone(), value.clone());
        }
    }
}
