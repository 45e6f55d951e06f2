//! Health check endpoints for Kubernetes-style checks.
//!
//! - `/livez` - Basic liveness check (immediate 200, no checks)
//! - `/readyz` - Readiness check (one cheap call against the store)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Body of the readiness response.
#[derive(Debug, Serialize, ToSchema)]
pub struct Readiness {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /livez - Basic liveness check.
///
/// Returns 200 immediately. Does NOT contact the store.
#[utoipa::path(
    get,
    path = "/livez",
    tag = "health",
    responses((status = 200, description = "Process is alive"))
)]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /readyz - Readiness check.
///
/// Lists at most one table to verify the store is reachable with the
/// configured credentials. Returns 200 if it is, 503 otherwise.
#[utoipa::path(
    get,
    path = "/readyz",
    tag = "health",
    responses(
        (status = 200, description = "Store is reachable", body = Readiness),
        (status = 503, description = "Store is unreachable", body = Readiness)
    )
)]
pub async fn readyz(State(state): State<AppState>) -> Response {
    match state.store.list_tables(Some(1)).await {
        Ok(_) => (
            StatusCode::OK,
            Json(Readiness {
                ready: true,
                error: None,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Readiness {
                    ready: false,
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}
