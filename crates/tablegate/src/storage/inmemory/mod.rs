//! In-memory storage backend.
//!
//! Keeps tables in process memory and evaluates a subset of the DynamoDB
//! condition expression grammar locally. Used by the router tests and by
//! `--storage memory` runs that have no DynamoDB endpoint at hand.
//!
//! # Example
//!
//! ```rust,ignore
//! use tablegate::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! // Use store for testing...
//! ```

mod expression;
mod store;

pub use store::InMemoryStore;
