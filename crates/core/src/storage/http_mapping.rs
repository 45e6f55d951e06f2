//! Pure functions for mapping store errors to HTTP status codes.

use super::StoreError;

/// Maps a [`StoreError`] to an HTTP status code.
///
/// - `InvalidInput` -> 400 (Bad Request)
/// - `NotFound` -> 404 (Not Found)
/// - `Remote` -> 500 (Internal Server Error)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `Serialization` -> 500 (Internal Server Error)
///
/// Remote errors keep the 500 mapping whatever the service code is, so a
/// missing table or a throttled request reaches the caller as a server error
/// carrying the service message.
///
/// # Examples
///
/// ```
/// use tablegate_core::storage::{store_error_to_status_code, StoreError};
///
/// let error = StoreError::InvalidInput("tableName is required".to_string());
/// assert_eq!(store_error_to_status_code(&error), 400);
/// ```
pub fn store_error_to_status_code(error: &StoreError) -> u16 {
    match error {
        StoreError::InvalidInput(_) => 400,
        StoreError::NotFound { .. } => 404,
        StoreError::Remote { .. } => 500,
        StoreError::ConnectionFailed(_) => 503,
        StoreError::Serialization(_) => 500,
    }
}
