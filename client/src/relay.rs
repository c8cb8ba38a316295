//! Relay-network transport.
//!
//! Instead of talking to a node directly, requests are wrapped in a relay
//! envelope and posted to a dispatcher, which forwards them to a node on
//! the target chain and returns the node's response payload. The envelope
//! carries the original method, path, and hex-encoded body.

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Default timeout for relay round-trips (dispatch plus forwarding).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Dispatcher endpoint accepting relay envelopes.
const RELAY_PATH: &str = "/v1/relay";

/// A request envelope forwarded by the dispatcher.
#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    chain: &'a str,
    method: &'a str,
    path: &'a str,
    /// Hex-encoded request body or query string.
    payload: String,
    headers: BTreeMap<String, String>,
}

/// The dispatcher's response wrapper.
#[derive(Debug, Deserialize)]
struct RelayResponse {
    /// Hex-encoded node response body.
    payload: String,
}

/// Relay-network provider: dispatcher URL, API token, and target chain id.
pub struct RelayProvider {
    http_client: reqwest::Client,
    dispatcher_url: String,
    token: String,
    chain: String,
}

impl RelayProvider {
    pub fn new(
        dispatcher_url: impl Into<String>,
        token: impl Into<String>,
        chain: impl Into<String>,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            dispatcher_url: dispatcher_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            chain: chain.into(),
        }
    }

    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, ClientError> {
        let query_string = encode_query(query);
        self.send_relay("GET", path, query_string.as_bytes(), headers)
            .await
    }

    pub async fn post(
        &self,
        path: &str,
        body: &[u8],
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, ClientError> {
        self.send_relay("POST", path, body, headers).await
    }

    pub async fn delete(
        &self,
        path: &str,
        body: &[u8],
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, ClientError> {
        self.send_relay("DELETE", path, body, headers).await
    }

    async fn send_relay(
        &self,
        method: &str,
        path: &str,
        payload: &[u8],
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, ClientError> {
        let mut header_map: BTreeMap<String, String> = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        if !self.token.is_empty() {
            header_map.insert("X-Lumen-API-Token".to_string(), self.token.clone());
        }

        let envelope = RelayRequest {
            chain: &self.chain,
            method,
            path,
            payload: hex::encode(payload),
            headers: header_map,
        };

        let url = format!("{}{}", self.dispatcher_url, RELAY_PATH);
        tracing::debug!(%url, method, path, "relay dispatch");

        let response = self
            .http_client
            .post(&url)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Unreachable(format!("relay timed out: {e}"))
                } else if e.is_connect() {
                    ClientError::Unreachable(format!("dispatcher connection failed: {e}"))
                } else {
                    ClientError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::RequestFailed(format!(
                "relay HTTP status {status}"
            )));
        }

        let relay_response: RelayResponse = response.json().await.map_err(|e| {
            ClientError::InvalidResponse(format!("failed to parse relay response: {e}"))
        })?;

        hex::decode(&relay_response.payload)
            .map_err(|e| ClientError::InvalidResponse(format!("bad relay payload: {e}")))
    }
}

/// Flatten query parameters into a query string, dropping empty values.
fn encode_query(query: &[(&str, &str)]) -> String {
    query
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}
