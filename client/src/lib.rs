//! Node transport for the Lumen client core.
//!
//! The signing core never talks to the network itself; it hands opaque
//! signed blobs to a [`Provider`] and receives opaque response bodies back.
//! Two transport strategies exist behind one capability surface
//! (`get`/`post`/`delete`), selected at construction:
//! - [`HttpProvider`] — direct HTTP to a node's REST endpoint
//! - [`RelayProvider`] — dispatch through a relay network
//!
//! Secret keys and unsigned records never cross this boundary.

pub mod error;
pub mod http;
pub mod provider;
pub mod relay;

pub use error::ClientError;
pub use http::HttpProvider;
pub use provider::Provider;
pub use relay::RelayProvider;

/// Initialize the tracing subscriber with sensible defaults.
///
/// Respects the `RUST_LOG` environment variable for filtering.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}
