//! Explicit paging for query, scan and list-items.
//!
//! A [`Cursor`] is the remote service's last evaluated key, encoded as
//! URL-safe base64 of its JSON form so it can travel in a query string or
//! header untouched.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde_json::{Map, Value};

use crate::storage::{Result, StoreError};

/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 1000;

/// Opaque continuation token for a paged read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor(String);

impl Cursor {
    /// Encodes a last-evaluated key.
    pub fn from_key(key: &Map<String, Value>) -> Result<Self> {
        let json = serde_json::to_vec(key).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Self(URL_SAFE_NO_PAD.encode(json)))
    }

    /// Parses a cursor received from a caller, checking that it decodes.
    pub fn parse(raw: &str) -> Result<Self> {
        let cursor = Self(raw.to_string());
        cursor.to_key()?;
        Ok(cursor)
    }

    /// Decodes the cursor back into the start key for the next page.
    pub fn to_key(&self) -> Result<Map<String, Value>> {
        let bytes = URL_SAFE_NO_PAD
            .decode(&self.0)
            .map_err(|_| invalid_cursor())?;
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(key)) if !key.is_empty() => Ok(key),
            _ => Err(invalid_cursor()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn invalid_cursor() -> StoreError {
    StoreError::InvalidInput("cursor is not valid".to_string())
}

/// Paging input for a read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: Option<u32>,
    pub cursor: Option<Cursor>,
}

impl PageRequest {
    /// Builds a paging request from raw query parameters.
    pub fn from_params(limit: Option<u32>, cursor: Option<&str>) -> Result<Self> {
        if let Some(limit) = limit {
            if limit == 0 || limit > MAX_PAGE_LIMIT {
                return Err(StoreError::InvalidInput(format!(
                    "limit must be between 1 and {MAX_PAGE_LIMIT}"
                )));
            }
        }
        let cursor = match cursor {
            Some(raw) if !raw.is_empty() => Some(Cursor::parse(raw)?),
            _ => None,
        };
        Ok(Self { limit, cursor })
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Present when the service has more results after this page.
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_cursor: Option<Cursor>) -> Self {
        Self { items, next_cursor }
    }

    /// A final page.
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }
}
