//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `TableStore` trait
//! defined in `tablegate_core::storage`. The backend is picked at startup
//! with `--storage`.
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB backend using `aws-sdk-dynamodb`
//!
//! The in-memory backend has no dependencies and is always compiled.
//!
//! # Examples
//!
//! Build without the DynamoDB backend:
//! ```bash
//! cargo build -p tablegate --no-default-features
//! ```

pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub use inmemory::InMemoryStore;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbStore;
