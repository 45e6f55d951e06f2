//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of `TableStore`
//! using `aws-sdk-dynamodb`, with `serde_dynamo` doing the marshalling.

mod conversions;
mod error;
mod store;

pub use store::DynamoDbStore;
