//! Application state.
//!
//! The store is constructed once at startup and injected here; handlers
//! reach it through a cloned `Arc<dyn TableStore>`.

use std::sync::Arc;

use tablegate_core::storage::TableStore;
use tablegate_core::table::{TableSpec, Throughput};

use crate::storage::InMemoryStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Data-access layer.
    pub store: Arc<dyn TableStore>,
    /// Provisioned capacity for tables created through the API.
    pub throughput: Throughput,
}

impl AppState {
    pub fn new(store: Arc<dyn TableStore>, throughput: Throughput) -> Self {
        Self { store, throughput }
    }

    /// The definition used by create-table.
    pub fn table_spec(&self, table_name: impl Into<String>) -> TableSpec {
        TableSpec::keyed_by_id(table_name, self.throughput)
    }
}

impl Default for AppState {
    /// In-memory state with default throughput.
    fn default() -> Self {
        Self::new(Arc::new(InMemoryStore::new()), Throughput::default())
    }
}
