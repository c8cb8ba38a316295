//! Direct HTTP transport to a node's REST endpoint.

use crate::error::ClientError;
use std::time::Duration;

/// Default timeout for node requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Header carrying the node API token.
const TOKEN_HEADER: &str = "X-Lumen-API-Token";

/// Direct HTTP provider: base URL plus API token.
pub struct HttpProvider {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpProvider {
    /// Create a provider for a node endpoint with default timeout settings.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Create a provider with a custom request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");
        let mut request = self.http_client.get(&url).header("Accept", "application/json");
        // Empty query values are dropped rather than sent as `key=`.
        let filtered: Vec<_> = query.iter().filter(|(_, v)| !v.is_empty()).collect();
        if !filtered.is_empty() {
            request = request.query(&filtered);
        }
        request = self.apply_headers(request, headers);
        self.dispatch(request).await
    }

    pub async fn post(
        &self,
        path: &str,
        body: &[u8],
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, body_len = body.len(), "POST");
        let request = self.http_client.post(&url).body(body.to_vec());
        let request = self.apply_headers(request, headers);
        self.dispatch(request).await
    }

    pub async fn delete(
        &self,
        path: &str,
        body: &[u8],
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "DELETE");
        let request = self.http_client.delete(&url).body(body.to_vec());
        let request = self.apply_headers(request, headers);
        self.dispatch(request).await
    }

    fn apply_headers(
        &self,
        mut request: reqwest::RequestBuilder,
        headers: &[(&str, &str)],
    ) -> reqwest::RequestBuilder {
        if !self.token.is_empty() {
            request = request.header(TOKEN_HEADER, &self.token);
        }
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        request
    }

    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, ClientError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Unreachable(format!("request timed out: {e}"))
            } else if e.is_connect() {
                ClientError::Unreachable(format!("connection failed: {e}"))
            } else {
                ClientError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::RequestFailed(format!("HTTP status {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("failed to read body: {e}")))?;
        tracing::debug!(body_len = body.len(), "response received");
        Ok(body.to_vec())
    }
}
