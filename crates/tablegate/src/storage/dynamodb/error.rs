//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `tablegate_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{BuildError, DisplayErrorContext, ProvideErrorMetadata, SdkError};
use tablegate_core::storage::StoreError;

/// Map any operation's SDK error to StoreError.
///
/// Transport failures and SDK timeouts become `ConnectionFailed`; everything
/// the service answered with, and request construction failures, become
/// `Remote` carrying the service code and message unmodified.
pub fn map_sdk_error<E, R>(err: SdkError<E, R>, operation: &'static str) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    match &err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => StoreError::ConnectionFailed(
            format!("{operation}: {}", DisplayErrorContext(&err)),
        ),
        _ => {
            let message = err
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
            match err.code() {
                Some(code) => StoreError::remote_with_code(operation, code, message),
                None => StoreError::remote(operation, message),
            }
        }
    }
}

/// Map a request-builder error (missing required field) to StoreError.
pub fn map_build_error(err: BuildError) -> StoreError {
    StoreError::Serialization(err.to_string())
}

/// Map a marshalling error from serde_dynamo to StoreError.
pub fn map_marshal_error(err: serde_dynamo::Error) -> StoreError {
    StoreError::Serialization(err.to_string())
}
