//! tablegate_client - CLI client for the tablegate API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::TablegateClient;
pub use error::{ClientError, Result};
