//! Provider gateway error types.

use gist_core::config::Provider;
use std::sync::Arc;

/// Errors from a summarization provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// No API key configured for the selected provider.
    #[error("missing API key for {0}")]
    MissingCredentials(Provider),

    /// Nothing to summarize.
    #[error("no text to summarize")]
    EmptyInput,

    /// Provider answered with a non-success status.
    #[error("provider rejected request: HTTP {status}")]
    ProviderRejected { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    NetworkFailure(Arc<reqwest::Error>),

    /// Reply parsed but carried no summary text, or did not parse at all.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { GatewayError::Timeout } else { GatewayError::NetworkFailure(Arc::new(err)) }
    }
}
