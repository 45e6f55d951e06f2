//! Item handlers.
//!
//! Each handler validates its input, makes one store call and returns the
//! result. Paged reads answer with a JSON array of items and put the cursor
//! for the next page, when there is one, in the `x-next-cursor` header.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use tablegate_core::item::{Item, ItemKey};
use tablegate_core::paging::Page;
use tablegate_core::storage::StoreError;

use crate::{
    handlers::{
        error::{bad_request, ErrorResponse},
        AppError,
    },
    models::{CreateItem, CreateItemWithDetails, PageParams, QueryParams, ScanParams, UpdateItem},
    state::AppState,
};

/// Response header carrying the cursor for the next page.
pub const NEXT_CURSOR_HEADER: &str = "x-next-cursor";

fn page_response(page: Page<Item>) -> Result<Response, AppError> {
    let mut headers = HeaderMap::new();
    if let Some(cursor) = page.next_cursor {
        headers.insert(NEXT_CURSOR_HEADER, HeaderValue::from_str(cursor.as_str())?);
    }
    Ok((headers, Json(page.items)).into_response())
}

/// Create an item with id, name and phone (POST /dynamodb/create-with-details).
#[utoipa::path(
    post,
    path = "/dynamodb/create-with-details",
    tag = "dynamodb",
    request_body = CreateItemWithDetails,
    responses(
        (status = 201, description = "Item created"),
        (status = 400, description = "Missing or malformed field", body = ErrorResponse),
        (status = 500, description = "DynamoDB rejected the request", body = ErrorResponse)
    )
)]
pub async fn create_item_with_details(
    State(state): State<AppState>,
    payload: Result<Json<CreateItemWithDetails>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload.map_err(bad_request)?;
    let id = payload.id.clone();
    let (table, item) = payload.into_item()?;

    state.store.put_item(&table, item).await?;

    tracing::info!(table = %table, id = %id, "Created item");
    Ok(StatusCode::CREATED)
}

/// Create an arbitrary item (POST /dynamodb/create).
#[utoipa::path(
    post,
    path = "/dynamodb/create",
    tag = "dynamodb",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created"),
        (status = 400, description = "Missing or malformed field", body = ErrorResponse),
        (status = 500, description = "DynamoDB rejected the request", body = ErrorResponse)
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateItem>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload.map_err(bad_request)?;
    payload.validate()?;

    let attributes = payload.item.len();
    state.store.put_item(&payload.table_name, payload.item).await?;

    tracing::info!(table = %payload.table_name, attributes, "Created item");
    Ok(StatusCode::CREATED)
}

/// Get an item by id (GET /dynamodb/item/{tableName}/{id}).
#[utoipa::path(
    get,
    path = "/dynamodb/item/{tableName}/{id}",
    tag = "dynamodb",
    params(("tableName" = String, Path, description = "Table name in DynamoDB"), ("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "The stored item", body = Object),
        (status = 404, description = "No item with this id", body = ErrorResponse),
        (status = 500, description = "DynamoDB rejected the request", body = ErrorResponse)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path((table_name, id)): Path<(String, String)>,
) -> Result<Json<Item>, AppError> {
    let item = state
        .store
        .get_item(&table_name, &ItemKey::id(id.as_str()))
        .await?
        .ok_or_else(|| StoreError::NotFound {
            entity: "Item",
            id: format!("{table_name}/{id}"),
        })?;

    Ok(Json(item))
}

/// Delete an item by id (DELETE /dynamodb/delete/{tableName}/{id}).
#[utoipa::path(
    delete,
    path = "/dynamodb/delete/{tableName}/{id}",
    tag = "dynamodb",
    params(("tableName" = String, Path, description = "Table name in DynamoDB"), ("id" = String, Path, description = "Item ID")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 500, description = "DynamoDB rejected the request", body = ErrorResponse)
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path((table_name, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .delete_item(&table_name, &ItemKey::id(id.as_str()))
        .await?;

    tracing::info!(table = %table_name, id = %id, "Deleted item");
    Ok(StatusCode::NO_CONTENT)
}

/// Update name and/or phone of an item (PUT /dynamodb/update).
#[utoipa::path(
    put,
    path = "/dynamodb/update",
    tag = "dynamodb",
    request_body = UpdateItem,
    responses(
        (status = 204, description = "Item updated"),
        (status = 400, description = "Neither name nor phone given", body = ErrorResponse),
        (status = 500, description = "DynamoDB rejected the request", body = ErrorResponse)
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    payload: Result<Json<UpdateItem>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload.map_err(bad_request)?;
    let (table, key, update) = payload.into_update()?;

    state.store.update_item(&table, &key, &update).await?;

    tracing::info!(table = %table, key = %key, attributes = update.len(), "Updated item");
    Ok(StatusCode::NO_CONTENT)
}

/// Query items by key condition (GET /dynamodb/query).
#[utoipa::path(
    get,
    path = "/dynamodb/query",
    tag = "dynamodb",
    params(QueryParams),
    responses(
        (status = 200, description = "Matching items", body = Vec<Object>, headers(("x-next-cursor" = String, description = "Cursor for the next page, absent on the last page"))),
        (status = 400, description = "Missing or malformed parameter", body = ErrorResponse),
        (status = 500, description = "DynamoDB rejected the request", body = ErrorResponse)
    )
)]
pub async fn query_items(
    State(state): State<AppState>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params.map_err(bad_request)?;
    let (table, key_condition, page) = params.into_parts()?;

    let page = state.store.query(&table, &key_condition, page).await?;

    tracing::debug!(table = %table, count = page.items.len(), "Queried items");
    page_response(page)
}

/// Scan items with a filter (GET /dynamodb/scan).
#[utoipa::path(
    get,
    path = "/dynamodb/scan",
    tag = "dynamodb",
    params(ScanParams),
    responses(
        (status = 200, description = "Items passing the filter", body = Vec<Object>, headers(("x-next-cursor" = String, description = "Cursor for the next page, absent on the last page"))),
        (status = 400, description = "Missing or malformed parameter", body = ErrorResponse),
        (status = 500, description = "DynamoDB rejected the request", body = ErrorResponse)
    )
)]
pub async fn scan_items(
    State(state): State<AppState>,
    params: Result<Query<ScanParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params.map_err(bad_request)?;
    let (table, filter, page) = params.into_parts()?;

    let page = state.store.scan(&table, Some(&filter), page).await?;

    tracing::debug!(table = %table, count = page.items.len(), "Scanned items");
    page_response(page)
}

/// List all items of a table (GET /dynamodb/items/{tableName}).
#[utoipa::path(
    get,
    path = "/dynamodb/items/{tableName}",
    tag = "dynamodb",
    params(("tableName" = String, Path, description = "Table name in DynamoDB"), PageParams),
    responses(
        (status = 200, description = "One page of items", body = Vec<Object>, headers(("x-next-cursor" = String, description = "Cursor for the next page, absent on the last page"))),
        (status = 400, description = "Malformed limit or cursor", body = ErrorResponse),
        (status = 500, description = "DynamoDB rejected the request", body = ErrorResponse)
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    Path(table_name): Path<String>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params.map_err(bad_request)?;
    let page = params.into_page()?;

    let page = state.store.scan(&table_name, None, page).await?;

    page_response(page)
}
