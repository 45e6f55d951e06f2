use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::{livez, readyz},
        items::{
            create_item, create_item_with_details, delete_item, get_item, list_items, query_items,
            scan_items, update_item, NEXT_CURSOR_HEADER,
        },
        tables::{create_table, delete_table, list_tables},
    },
    openapi::openapi_json,
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([HeaderName::from_static(NEXT_CURSOR_HEADER)]);

    let api_routes = Router::new()
        // Item routes
        .route("/create-with-details", post(create_item_with_details))
        .route("/create", post(create_item))
        .route("/item/{tableName}/{id}", get(get_item))
        .route("/delete/{tableName}/{id}", delete(delete_item))
        .route("/update", put(update_item))
        .route("/query", get(query_items))
        .route("/scan", get(scan_items))
        .route("/items/{tableName}", get(list_items))
        // Table routes
        .route("/create-table", post(create_table))
        .route("/delete-table", post(delete_table))
        .route("/list-tables", get(list_tables))
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/dynamodb", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> Router {
        create_app(AppState::default(), Duration::from_secs(10))
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn create_users_table(app: &Router) {
        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/dynamodb/create-table",
                json!({ "tableName": "Users" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    async fn create_user(app: &Router, id: &str, name: &str, phone: &str) {
        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/dynamodb/create-with-details",
                json!({ "tableName": "Users", "id": id, "name": name, "phone": phone }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_livez() {
        let response = test_app().oneshot(get_request("/livez")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readyz_with_memory_store() {
        let response = test_app().oneshot(get_request("/readyz")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "ready": true }));
    }

    #[tokio::test]
    async fn test_openapi_document_lists_every_route() {
        let response = test_app()
            .oneshot(get_request("/api-docs/openapi.json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let doc = body_json(response).await;
        let paths = doc["paths"].as_object().expect("paths object");
        for path in [
            "/dynamodb/create-with-details",
            "/dynamodb/create",
            "/dynamodb/item/{tableName}/{id}",
            "/dynamodb/delete/{tableName}/{id}",
            "/dynamodb/update",
            "/dynamodb/query",
            "/dynamodb/scan",
            "/dynamodb/items/{tableName}",
            "/dynamodb/create-table",
            "/dynamodb/delete-table",
            "/dynamodb/list-tables",
            "/livez",
            "/readyz",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
        assert_eq!(paths.len(), 13);
        assert!(doc["paths"]["/dynamodb/update"]["put"].is_object());
        assert!(doc["paths"]["/dynamodb/delete/{tableName}/{id}"]["delete"].is_object());
    }

    #[tokio::test]
    async fn test_create_and_list_items() {
        let app = test_app();
        create_users_table(&app).await;
        create_user(&app, "1", "Alice", "555-0100").await;

        let response = app
            .oneshot(get_request("/dynamodb/items/Users"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(NEXT_CURSOR_HEADER).is_none());
        assert_eq!(
            body_json(response).await,
            json!([{ "id": "1", "name": "Alice", "phone": "555-0100" }])
        );
    }

    #[tokio::test]
    async fn test_create_with_missing_field_is_400() {
        let app = test_app();
        create_users_table(&app).await;

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/dynamodb/create-with-details",
                json!({ "tableName": "Users", "id": "1", "name": "Alice" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Invalid input: phone is required" })
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/dynamodb/create-with-details")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_create_arbitrary_item_and_get_it() {
        let app = test_app();
        create_users_table(&app).await;

        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/dynamodb/create",
                json!({ "tableName": "Users", "item": { "id": "7", "tags": ["a", "b"], "age": 30 } }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(get_request("/dynamodb/item/Users/7"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "id": "7", "tags": ["a", "b"], "age": 30 })
        );
    }

    #[tokio::test]
    async fn test_get_missing_item_is_404() {
        let app = test_app();
        create_users_table(&app).await;

        let response = app
            .oneshot(get_request("/dynamodb/item/Users/nope"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_name_keeps_phone() {
        let app = test_app();
        create_users_table(&app).await;
        create_user(&app, "1", "Alice", "555-0100").await;

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                "/dynamodb/update",
                json!({ "tableName": "Users", "id": "1", "name": "Bob" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(get_request("/dynamodb/item/Users/1"))
            .await
            .unwrap();

        assert_eq!(
            body_json(response).await,
            json!({ "id": "1", "name": "Bob", "phone": "555-0100" })
        );
    }

    #[tokio::test]
    async fn test_update_phone_keeps_name() {
        let app = test_app();
        create_users_table(&app).await;
        create_user(&app, "1", "Alice", "555-0100").await;

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                "/dynamodb/update",
                json!({ "tableName": "Users", "id": "1", "phone": "555-0199" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(get_request("/dynamodb/item/Users/1"))
            .await
            .unwrap();

        assert_eq!(
            body_json(response).await,
            json!({ "id": "1", "name": "Alice", "phone": "555-0199" })
        );
    }

    #[tokio::test]
    async fn test_update_name_and_phone() {
        let app = test_app();
        create_users_table(&app).await;
        create_user(&app, "1", "Alice", "555-0100").await;

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                "/dynamodb/update",
                json!({ "tableName": "Users", "id": "1", "name": "Carol", "phone": "555-0300" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(get_request("/dynamodb/item/Users/1"))
            .await
            .unwrap();

        assert_eq!(
            body_json(response).await,
            json!({ "id": "1", "name": "Carol", "phone": "555-0300" })
        );
    }

    #[tokio::test]
    async fn test_empty_update_is_400() {
        let app = test_app();
        create_users_table(&app).await;
        create_user(&app, "1", "Alice", "555-0100").await;

        let response = app
            .oneshot(json_request(
                Method::PUT,
                "/dynamodb/update",
                json!({ "tableName": "Users", "id": "1" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_item() {
        let app = test_app();
        create_users_table(&app).await;
        create_user(&app, "1", "Alice", "555-0100").await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/dynamodb/delete/Users/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(get_request("/dynamodb/items/Users"))
            .await
            .unwrap();
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_query_by_id() {
        let app = test_app();
        create_users_table(&app).await;
        create_user(&app, "1", "Alice", "555-0100").await;
        create_user(&app, "2", "Bob", "555-0200").await;

        let response = app
            .oneshot(get_request(
                "/dynamodb/query?tableName=Users&keyConditionExpression=id%20%3D%20%3Aid&expressionAttributeValues=%7B%22%3Aid%22%3A%222%22%7D",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!([{ "id": "2", "name": "Bob", "phone": "555-0200" }])
        );
    }

    #[tokio::test]
    async fn test_query_without_values_is_400() {
        let response = test_app()
            .oneshot(get_request(
                "/dynamodb/query?tableName=Users&keyConditionExpression=id%20%3D%20%3Aid",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_query_with_malformed_values_is_400() {
        let app = test_app();
        create_users_table(&app).await;

        let response = app
            .oneshot(get_request(
                "/dynamodb/query?tableName=Users&keyConditionExpression=id%20%3D%20%3Aid&expressionAttributeValues=%7Boops",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .is_some_and(|e| e.contains("expressionAttributeValues")));
    }

    #[tokio::test]
    async fn test_scan_with_malformed_values_is_400() {
        let app = test_app();
        create_users_table(&app).await;

        let response = app
            .oneshot(get_request(
                "/dynamodb/scan?tableName=Users&filterExpression=phone%20%3D%20%3Ap&expressionAttributeValues=%5B1%2C2%5D",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_scan_with_reserved_word_name() {
        let app = test_app();
        create_users_table(&app).await;
        create_user(&app, "1", "Alice", "555-0100").await;
        create_user(&app, "2", "Bob", "555-0200").await;

        // filterExpression=#n = :n, values {":n":"Alice"}, names {"#n":"name"}
        let response = app
            .oneshot(get_request(
                "/dynamodb/scan?tableName=Users&filterExpression=%23n%20%3D%20%3An&expressionAttributeValues=%7B%22%3An%22%3A%22Alice%22%7D&expressionAttributeNames=%7B%22%23n%22%3A%22name%22%7D",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!([{ "id": "1", "name": "Alice", "phone": "555-0100" }])
        );
    }

    #[tokio::test]
    async fn test_list_items_in_pages() {
        let app = test_app();
        create_users_table(&app).await;
        create_user(&app, "1", "Alice", "555-0100").await;
        create_user(&app, "2", "Bob", "555-0200").await;
        create_user(&app, "3", "Carol", "555-0300").await;

        let response = app
            .clone()
            .oneshot(get_request("/dynamodb/items/Users?limit=2"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cursor = response
            .headers()
            .get(NEXT_CURSOR_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let first: Vec<Value> = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(first.len(), 2);

        let response = app
            .oneshot(get_request(&format!(
                "/dynamodb/items/Users?limit=2&cursor={cursor}"
            )))
            .await
            .unwrap();

        assert!(response.headers().get(NEXT_CURSOR_HEADER).is_none());
        let second: Vec<Value> = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(second.len(), 1);
        assert!(!first.contains(&second[0]));
    }

    #[tokio::test]
    async fn test_limit_out_of_range_is_400() {
        let app = test_app();
        create_users_table(&app).await;

        let response = app
            .oneshot(get_request("/dynamodb/items/Users?limit=0"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_table_is_500() {
        let response = test_app()
            .oneshot(get_request("/dynamodb/items/Missing"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("Scan failed"));
    }

    #[tokio::test]
    async fn test_create_list_and_delete_tables() {
        let app = test_app();
        create_users_table(&app).await;

        let response = app
            .clone()
            .oneshot(get_request("/dynamodb/list-tables"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!(["Users"]));

        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/dynamodb/delete-table",
                json!({ "tableName": "Users" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(get_request("/dynamodb/list-tables"))
            .await
            .unwrap();
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_create_existing_table_is_500() {
        let app = test_app();
        create_users_table(&app).await;

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/dynamodb/create-table",
                json!({ "tableName": "Users" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
