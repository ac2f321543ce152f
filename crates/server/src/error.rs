//! Structured errors for the gist server.

use gist_client::GatewayError;
use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Structured errors for the gist server.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Invalid input parameters (e.g., neither text nor html).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The provider gateway failed.
    #[error("SUMMARIZE_FAILED: {0}")]
    Gateway(#[from] GatewayError),
}

impl From<WebError> for McpError {
    fn from(err: WebError) -> Self {
        let message = err.to_string();
        let code = match &err {
            WebError::InvalidInput(_) => -32602,
            WebError::Gateway(e) => match e {
                GatewayError::EmptyInput => -32602,
                GatewayError::MissingCredentials(_) => -32009,
                GatewayError::ProviderRejected { .. } => -32008,
                GatewayError::Timeout => -32006,
                GatewayError::NetworkFailure(_) => -32013,
                GatewayError::MalformedResponse(_) => -32000,
            },
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
