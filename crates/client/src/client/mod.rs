//! HTTP client for the tablegate API.

pub mod health;
pub mod items;
pub mod tables;

use tablegate_core::item::Item;
use tablegate_core::paging::{Cursor, Page, PageRequest};

use crate::error::{ClientError, Result};

/// Response header carrying the cursor for the next page.
pub const NEXT_CURSOR_HEADER: &str = "x-next-cursor";

/// HTTP client for the tablegate API.
#[derive(Debug, Clone)]
pub struct TablegateClient {
    client: reqwest::Client,
    base_url: String,
}

impl TablegateClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create from environment (TABLEGATE_URL or default).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("TABLEGATE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        Self::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a URL from path segments, escaping each one.
    ///
    /// Table names and item ids are arbitrary strings; `/`, `?` and `#` in
    /// them must not change the route.
    fn segment_url(&self, segments: &[&str]) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            ClientError::InvalidInput(format!("invalid base URL {}: {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidInput(format!("base URL cannot take a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Handle responses with a JSON body.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let response = check_status(response).await?;
        response.json().await.map_err(ClientError::from)
    }

    /// Handle responses where no body is expected.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        check_status(response).await.map(|_| ())
    }

    /// Handle paged responses: a JSON array plus an optional next cursor header.
    async fn handle_page_response(&self, response: reqwest::Response) -> Result<Page<Item>> {
        let response = check_status(response).await?;
        let next_cursor = match response.headers().get(NEXT_CURSOR_HEADER) {
            Some(value) => {
                let raw = value
                    .to_str()
                    .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
                Some(
                    Cursor::parse(raw)
                        .map_err(|e| ClientError::InvalidResponse(e.to_string()))?,
                )
            }
            None => None,
        };
        let items: Vec<Item> = response.json().await?;
        Ok(Page::new(items, next_cursor))
    }
}

/// Query pairs for a page request.
fn page_params(page: &PageRequest) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(limit) = page.limit {
        params.push(("limit", limit.to_string()));
    }
    if let Some(cursor) = &page.cursor {
        params.push(("cursor", cursor.to_string()));
    }
    params
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    if status.as_u16() == 404 {
        Err(ClientError::NotFound { resource: url })
    } else {
        Err(ClientError::ServerError {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// Extracts the message from an `{"error": ...}` body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
