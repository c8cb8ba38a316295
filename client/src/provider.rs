//! The provider capability surface.

use crate::error::ClientError;
use crate::http::HttpProvider;
use crate::relay::RelayProvider;

/// A transport strategy, selected at construction.
///
/// Strategies form a closed set dispatched by match rather than an open
/// trait hierarchy; both expose the same `get`/`post`/`delete` capability
/// and only ever carry opaque bytes.
pub enum Provider {
    Http(HttpProvider),
    Relay(RelayProvider),
}

impl Provider {
    /// Direct HTTP to a node endpoint.
    pub fn direct(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Provider::Http(HttpProvider::new(base_url, token))
    }

    /// Dispatch through a relay network.
    pub fn relay(
        dispatcher_url: impl Into<String>,
        token: impl Into<String>,
        chain: impl Into<String>,
    ) -> Self {
        Provider::Relay(RelayProvider::new(dispatcher_url, token, chain))
    }

    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, ClientError> {
        match self {
            Provider::Http(p) => p.get(path, query, headers).await,
            Provider::Relay(p) => p.get(path, query, headers).await,
        }
    }

    pub async fn post(
        &self,
        path: &str,
        body: &[u8],
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, ClientError> {
        match self {
            Provider::Http(p) => p.post(path, body, headers).await,
            Provider::Relay(p) => p.post(path, body, headers).await,
        }
    }

    pub async fn delete(
        &self,
        path: &str,
        body: &[u8],
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, ClientError> {
        match self {
            Provider::Http(p) => p.delete(path, body, headers).await,
            Provider::Relay(p) => p.delete(path, body, headers).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies_construct() {
        let direct = Provider::direct("http://localhost:4180", "token");
        assert!(matches!(direct, Provider::Http(_)));

        let relay = Provider::relay("http://dispatch.example", "token", "lumen-mainnet");
        assert!(matches!(relay, Provider::Relay(_)));
    }
}
