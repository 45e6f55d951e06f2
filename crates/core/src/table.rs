//! Table configuration types (pure data).

use crate::item::ID_ATTRIBUTE;

/// Scalar types a key attribute may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Number,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// Provisioned read/write capacity units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throughput {
    pub read_capacity_units: i64,
    pub write_capacity_units: i64,
}

impl Default for Throughput {
    fn default() -> Self {
        Self {
            read_capacity_units: 5,
            write_capacity_units: 5,
        }
    }
}

/// Everything needed to create a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub throughput: Throughput,
}

impl TableSpec {
    /// A table keyed by the string attribute `id`.
    pub fn keyed_by_id(table_name: impl Into<String>, throughput: Throughput) -> Self {
        Self {
            table_name: table_name.into(),
            partition_key: KeyAttribute {
                name: ID_ATTRIBUTE.to_string(),
                attribute_type: AttributeType::String,
            },
            throughput,
        }
    }
}
