use thiserror::Error;

/// Transport-layer errors. The signing core does not interpret these; they
/// surface to the caller as-is.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("node unreachable: {0}")]
    Unreachable(String),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
