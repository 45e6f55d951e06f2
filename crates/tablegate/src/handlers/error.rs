use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tablegate_core::storage::{store_error_to_status_code, StoreError};
use utoipa::ToSchema;

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable failure message
    pub error: String,
}

/// Application error type that wraps `anyhow::Error`.
///
/// Store errors pick their status through `store_error_to_status_code`;
/// anything else is a 500.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<StoreError>() {
            Some(store_error) => StatusCode::from_u16(store_error_to_status_code(store_error))
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %message, "Request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Turns an extractor rejection into a 400 carrying its message.
pub fn bad_request(rejection: impl std::fmt::Display) -> AppError {
    AppError::from(StoreError::InvalidInput(rejection.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_keep_their_status() {
        let err = AppError::from(StoreError::InvalidInput("bad".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = AppError::from(StoreError::remote("Scan", "throttled"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::from(StoreError::ConnectionFailed("down".into()));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_other_errors_are_500() {
        let err = AppError::from(anyhow::anyhow!("unexpected"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_bad_request_from_rejection_text() {
        let err = bad_request("Failed to parse the request body as JSON");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.0.to_string().contains("Failed to parse"));
    }
}
