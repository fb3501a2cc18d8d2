//! Product search collaborator
//!
//! The catalog never talks to the product service directly; it goes through
//! the [`ProductSearch`] seam so pages can be driven by the HTTP client in
//! production and by an in-memory fake in tests.

use std::time::Duration;

use futures_util::future::BoxFuture;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

use super::models::{SearchRequest, SearchResponse};
use crate::error::CatalogError;

const DEFAULT_STATUS_MESSAGE: &str = "Product search failed";

/// Remote product search service.
pub trait ProductSearch: Send + Sync {
    fn search<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> BoxFuture<'a, Result<SearchResponse, CatalogError>>;
}

/// HTTP transport for the product search service.
///
/// One POST per call; failures are never retried here.
#[derive(Debug, Clone)]
pub struct HttpProductSearch {
    search_url: Url,
    client: Client,
}

impl HttpProductSearch {
    pub fn new(search_url: Url, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::FetchFailed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { search_url, client })
    }

    async fn send_request(&self, request: &SearchRequest) -> Result<SearchResponse, CatalogError> {
        let response = self
            .client
            .post(self.search_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| CatalogError::FetchFailed(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body_text = response.text().await.unwrap_or_default();

        if status.is_success() {
            return serde_json::from_str(&body_text)
                .map_err(|e| CatalogError::FetchFailed(format!("Failed to parse response: {}", e)));
        }

        let message = extract_error_message(&body_text).unwrap_or_else(|| {
            if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        tracing::warn!(status = status.as_u16(), %message, "product search returned an error");
        Err(CatalogError::FetchFailed(message))
    }
}

impl ProductSearch for HttpProductSearch {
    fn search<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> BoxFuture<'a, Result<SearchResponse, CatalogError>> {
        Box::pin(self.send_request(request))
    }
}

/// Pulls a human-readable message out of an error body, if it has one.
fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(parsed) => parsed,
        Err(_) => return Some(body.trim().to_string()),
    };

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed
        .get("message")
        .and_then(|message| message.as_str())
        .map(ToOwned::to_owned)
}
