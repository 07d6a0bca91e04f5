//! HTTP plumbing shared by all endpoint modules.

use std::sync::Arc;

use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::ApiError;

/// Structured error payload returned by the commerce API on failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Client for the admin surface of the Voidwear commerce REST API.
///
/// Cheaply cloneable; all state lives behind an `Arc`. Every method except
/// login takes the operator's bearer token, read from the session per
/// request.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl AdminClient {
    /// Create a new admin API client.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
            }),
        }
    }

    /// Build an absolute URL for an API path.
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    pub(super) fn get(&self, path: &str, token: &str) -> RequestBuilder {
        self.inner.client.get(self.url(path)).bearer_auth(token)
    }

    pub(super) fn post(&self, path: &str, token: &str) -> RequestBuilder {
        self.inner.client.post(self.url(path)).bearer_auth(token)
    }

    pub(super) fn put(&self, path: &str, token: &str) -> RequestBuilder {
        self.inner.client.put(self.url(path)).bearer_auth(token)
    }

    pub(super) fn delete(&self, path: &str, token: &str) -> RequestBuilder {
        self.inner.client.delete(self.url(path)).bearer_auth(token)
    }

    /// An unauthenticated POST, for login only.
    pub(super) fn post_bare(&self, path: &str) -> RequestBuilder {
        self.inner.client.post(self.url(path))
    }

    /// Send a request and decode the JSON response.
    ///
    /// Non-success statuses are decoded as `{"detail": ...}`; 401 and 404 get
    /// their own variants so callers can branch without string matching.
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = AdminClient::new("http://localhost:8000/api/");
        assert_eq!(client.url("/admin/users"), "http://localhost:8000/api/admin/users");
    }
}
