//! HTTP plumbing shared by all endpoint modules.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::Category;
use super::{ApiError, Identity};
use crate::config::CommerceApiConfig;

/// Header carrying the anonymous cart identity.
pub const GUEST_SESSION_HEADER: &str = "X-Guest-Session-ID";

/// Cached lookups expire after this long.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Structured error payload returned by the commerce API on failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Values stored in the lookup cache.
#[derive(Clone)]
pub(super) enum CacheValue {
    Categories(Vec<Category>),
    Colors(Vec<String>),
}

/// Client for the Voidwear commerce REST API.
///
/// Cheaply cloneable; all state lives behind an `Arc`.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl ApiClient {
    /// Create a new commerce API client.
    #[must_use]
    pub fn new(config: &CommerceApiConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(100)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    /// Build an absolute URL for an API path.
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    pub(super) fn get(&self, path: &str, identity: &Identity) -> RequestBuilder {
        self.request(self.inner.client.get(self.url(path)), identity)
    }

    pub(super) fn post(&self, path: &str, identity: &Identity) -> RequestBuilder {
        self.request(self.inner.client.post(self.url(path)), identity)
    }

    pub(super) fn put(&self, path: &str, identity: &Identity) -> RequestBuilder {
        self.request(self.inner.client.put(self.url(path)), identity)
    }

    pub(super) fn delete(&self, path: &str, identity: &Identity) -> RequestBuilder {
        self.request(self.inner.client.delete(self.url(path)), identity)
    }

    /// Attach identity headers to a request.
    ///
    /// The bearer token is read from the session for every request, mirroring
    /// the interceptor the original client installed on its HTTP stack.
    fn request(&self, builder: RequestBuilder, identity: &Identity) -> RequestBuilder {
        let builder = match &identity.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        match &identity.guest_session_id {
            Some(guest_id) => builder.header(GUEST_SESSION_HEADER, guest_id),
            None => builder,
        }
    }

    /// Send a request and decode the JSON response.
    ///
    /// Non-success statuses are decoded as `{"detail": ...}` and surfaced as
    /// [`ApiError::Status`]; 401 and 404 get their own variants so callers
    /// can branch without string matching.
    pub(super) async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            return Ok(serde_json::from_slice(&body)?);
        }

        let detail = response
            .bytes()
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
            .map(|body| body.detail);

        debug!(%status, detail = detail.as_deref(), "commerce API request failed");

        match status {
            reqwest::StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            reqwest::StatusCode::NOT_FOUND => Err(ApiError::NotFound(
                detail.unwrap_or_else(|| "resource".to_string()),
            )),
            _ => Err(ApiError::Status {
                status,
                detail: detail.unwrap_or_else(|| "Unexpected server error".to_string()),
            }),
        }
    }

    /// Read from the lookup cache.
    pub(super) async fn cached(&self, key: &str) -> Option<CacheValue> {
        self.inner.cache.get(key).await
    }

    /// Store into the lookup cache.
    pub(super) async fn store(&self, key: &str, value: CacheValue) {
        self.inner.cache.insert(key.to_string(), value).await;
    }

    /// Drop all cached lookups.
    pub async fn invalidate_cache(&self) {
        self.inner.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base: &str) -> ApiClient {
        ApiClient::new(&CommerceApiConfig {
            base_url: base.to_string(),
        })
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = test_client("http://localhost:8000/api/");
        assert_eq!(client.url("/cart/"), "http://localhost:8000/api/cart/");

        let client = test_client("http://localhost:8000/api");
        assert_eq!(client.url("/products/1"), "http://localhost:8000/api/products/1");
    }
}
