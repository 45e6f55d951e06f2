//! Table handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::{
    handlers::{
        error::{bad_request, ErrorResponse},
        AppError,
    },
    models::TableName,
    state::AppState,
};

/// Create a table keyed by `id` (POST /dynamodb/create-table).
#[utoipa::path(
    post,
    path = "/dynamodb/create-table",
    tag = "dynamodb",
    request_body = TableName,
    responses(
        (status = 201, description = "Table created"),
        (status = 400, description = "Missing table name", body = ErrorResponse),
        (status = 500, description = "DynamoDB rejected the request", body = ErrorResponse)
    )
)]
pub async fn create_table(
    State(state): State<AppState>,
    payload: Result<Json<TableName>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload.map_err(bad_request)?;
    let spec = state.table_spec(payload.into_name()?);

    state.store.create_table(&spec).await?;

    tracing::info!(
        table = %spec.table_name,
        read_capacity = spec.throughput.read_capacity_units,
        write_capacity = spec.throughput.write_capacity_units,
        "Created table"
    );
    Ok(StatusCode::CREATED)
}

/// Delete a table (POST /dynamodb/delete-table).
#[utoipa::path(
    post,
    path = "/dynamodb/delete-table",
    tag = "dynamodb",
    request_body = TableName,
    responses(
        (status = 204, description = "Table deleted"),
        (status = 400, description = "Missing table name", body = ErrorResponse),
        (status = 500, description = "DynamoDB rejected the request", body = ErrorResponse)
    )
)]
pub async fn delete_table(
    State(state): State<AppState>,
    payload: Result<Json<TableName>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload.map_err(bad_request)?;
    let table = payload.into_name()?;

    state.store.delete_table(&table).await?;

    tracing::info!(table = %table, "Deleted table");
    Ok(StatusCode::NO_CONTENT)
}

/// List table names (GET /dynamodb/list-tables).
#[utoipa::path(
    get,
    path = "/dynamodb/list-tables",
    tag = "dynamodb",
    responses(
        (status = 200, description = "Table names", body = Vec<String>),
        (status = 500, description = "DynamoDB rejected the request", body = ErrorResponse)
    )
)]
pub async fn list_tables(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let tables = state.store.list_tables(None).await?;
    Ok(Json(tables))
}
