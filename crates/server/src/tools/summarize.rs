//! summarize tool implementation.
//!
//! Checks the summary cache for the page fingerprint and only calls the
//! provider gateway on a miss. Fresh summaries are written to both the cache
//! and the history; a failed save is logged and the summary is still
//! returned.

use chrono::{DateTime, SecondsFormat, Utc};
use gist_client::{Provider, SummaryRequest, visible_text};
use gist_core::{Error, Fingerprint};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;
use crate::error::WebError;
use crate::state::AppState;

/// Input parameters for the summarize tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SummarizeParams {
    /// Extracted page text or transcript.
    #[serde(default)]
    pub text: Option<String>,

    /// Raw page HTML; its visible text is used when `text` is absent.
    #[serde(default)]
    pub html: Option<String>,

    /// Page URL. Used as the cache key when present.
    #[serde(default)]
    pub url: Option<String>,

    /// Whether the text is a video/audio transcript.
    #[serde(default)]
    pub is_transcript: bool,

    /// Provider override: "openai", "claude" or "gemini".
    #[serde(default)]
    pub provider: Option<Provider>,

    /// Skip the cache lookup and summarize again.
    #[serde(default)]
    pub force_refresh: bool,
}

/// Output structure for the summarize tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SummarizeOutput {
    pub summary: String,
    /// Cache key the summary is stored under.
    pub fingerprint: String,
    /// Whether the summary came from the cache.
    pub cached: bool,
    /// Whether a fresh summary reached both cache and history.
    pub saved: bool,
    /// ISO8601 creation time of the summary.
    pub summarized_at: String,
}

fn format_ms(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Implementation of the summarize tool.
pub async fn summarize_impl(state: &AppState, params: SummarizeParams) -> Result<CallToolResult, McpError> {
    let text = match (params.text, params.html) {
        (Some(text), _) => text,
        (None, Some(html)) => visible_text(&html),
        (None, None) => String::new(),
    };

    let url = params.url.filter(|u| !u.trim().is_empty());
    let fingerprint = match &url {
        Some(url) => match Fingerprint::from_url(url) {
            Ok(fingerprint) => fingerprint,
            Err(e) if !text.trim().is_empty() => {
                tracing::debug!("keying by text, url not cacheable: {}", e);
                Fingerprint::from_text(&text)
            }
            Err(e) => return Err(e.into()),
        },
        None if text.trim().is_empty() => {
            return Err(WebError::InvalidInput("one of text, html or url must be given".into()).into());
        }
        None => Fingerprint::from_text(&text),
    };

    if !params.force_refresh {
        match state.store.cache.lookup(fingerprint.as_str()).await {
            Ok(Some(entry)) => {
                tracing::debug!("cache hit for {}", fingerprint);
                return json_result(&SummarizeOutput {
                    summary: entry.summary,
                    fingerprint: entry.fingerprint,
                    cached: true,
                    saved: true,
                    summarized_at: format_ms(entry.timestamp),
                });
            }
            Ok(None) => tracing::debug!("cache miss for {}", fingerprint),
            Err(e) => tracing::warn!("cache lookup failed, summarizing anyway: {}", e),
        }
    }

    if text.trim().is_empty() {
        return Err(Error::CacheMiss(format!("{fingerprint} (no text given to summarize)")).into());
    }

    let provider = params.provider.unwrap_or(state.provider);
    let request = SummaryRequest { text, is_transcript: params.is_transcript, url: url.clone() };
    let summary = state
        .gateway
        .summarize(&request, &state.credentials, provider)
        .await
        .map_err(WebError::from)?;

    let mut saved = true;
    let summarized_at = match state.store.cache.put(fingerprint.as_str(), &summary).await {
        Ok(timestamp) => timestamp,
        Err(e) => {
            tracing::warn!("failed to cache summary: {}", e);
            saved = false;
            state.store.cache.now_ms()
        }
    };
    if let Err(e) = state.store.history.append(&summary, url.as_deref()).await {
        tracing::warn!("failed to record summary in history: {}", e);
        saved = false;
    }

    json_result(&SummarizeOutput {
        summary,
        fingerprint: fingerprint.to_string(),
        cached: false,
        saved,
        summarized_at: format_ms(summarized_at),
    })
}
