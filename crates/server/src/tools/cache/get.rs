//! cache_get tool implementation.
//!
//! Retrieves a cached summary by page URL or raw fingerprint.

use gist_core::{CacheEntry, Error, Fingerprint};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::tools::json_result;

/// Parameters for the cache_get tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// Page URL; canonicalized before lookup.
    #[serde(default)]
    pub url: Option<String>,

    /// Fingerprint exactly as returned by summarize.
    #[serde(default)]
    pub fingerprint: Option<String>,
}

/// Output from the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetOutput {
    pub entry: CacheEntry,
}

/// Implementation of the cache_get tool.
pub async fn get_impl(state: &AppState, params: CacheGetParams) -> Result<CallToolResult, McpError> {
    let fingerprint = match (params.fingerprint, params.url) {
        (Some(fp), _) => Fingerprint::from(fp),
        (None, Some(url)) => Fingerprint::from_url(&url)?,
        (None, None) => return Err(Error::InvalidInput("one of url or fingerprint must be given".into()).into()),
    };

    let entry = state
        .store
        .cache
        .lookup(fingerprint.as_str())
        .await?
        .ok_or_else(|| Error::CacheMiss(fingerprint.to_string()))?;

    json_result(&CacheGetOutput { entry })
}
