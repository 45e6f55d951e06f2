//! OpenAPI document for the gateway routes.

use axum::Json;
use utoipa::OpenApi;

use crate::handlers::{error::ErrorResponse, health, health::Readiness, items, tables};
use crate::models::{CreateItem, CreateItemWithDetails, TableName, UpdateItem};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "tablegate",
        description = "REST gateway onto DynamoDB tables and items"
    ),
    paths(
        items::create_item_with_details,
        items::create_item,
        items::get_item,
        items::delete_item,
        items::update_item,
        items::query_items,
        items::scan_items,
        items::list_items,
        tables::create_table,
        tables::delete_table,
        tables::list_tables,
        health::livez,
        health::readyz,
    ),
    components(schemas(
        CreateItemWithDetails,
        CreateItem,
        UpdateItem,
        TableName,
        ErrorResponse,
        Readiness,
    )),
    tags(
        (name = "dynamodb", description = "Item and table operations"),
        (name = "health", description = "Liveness and readiness checks")
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json - The OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
