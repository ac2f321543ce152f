//! Provider request construction.

use gist_core::config::Provider;
use serde::Serialize;
use serde_json::json;

/// Content handed to the gateway for summarization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SummaryRequest {
    /// Extracted page text or transcript.
    pub text: String,

    /// Whether `text` is a video/audio transcript.
    #[serde(default)]
    pub is_transcript: bool,

    /// Page the text came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SummaryRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Default::default() }
    }

    /// Prompt sent to the model, with the text cut to `max_chars`.
    pub fn prompt(&self, max_chars: usize) -> String {
        let text = truncate_chars(self.text.trim(), max_chars);
        if self.is_transcript {
            format!("Summarize this video transcript: {text}")
        } else {
            format!("Summarize this: {text}")
        }
    }
}

/// Cut a string to at most `max` chars without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// A fully built HTTP request for one provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: serde_json::Value,
}

/// Endpoint and model settings per provider.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub base_url: String,
    pub model: String,
}

/// Build the request for `provider`.
pub fn build(provider: Provider, endpoint: &Endpoint, api_key: &str, prompt: &str, max_tokens: u32) -> ProviderRequest {
    match provider {
        Provider::OpenAi => ProviderRequest {
            url: format!("{}/chat/completions", endpoint.base_url),
            headers: vec![("Authorization", format!("Bearer {api_key}"))],
            body: json!({
                "model": endpoint.model,
                "messages": [{ "role": "user", "content": prompt }],
                "max_tokens": max_tokens,
            }),
        },
        Provider::Claude => ProviderRequest {
            url: format!("{}/messages", endpoint.base_url),
            headers: vec![("x-api-key", api_key.to_string()), ("anthropic-version", "2023-06-01".to_string())],
            body: json!({
                "model": endpoint.model,
                "messages": [{ "role": "user", "content": prompt }],
                "max_tokens": max_tokens,
            }),
        },
        Provider::Gemini => ProviderRequest {
            url: format!("{}/models/{}:generateContent", endpoint.base_url, endpoint.model),
            headers: vec![("x-goog-api-key", api_key.to_string())],
            body: json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
                "generationConfig": { "maxOutputTokens": max_tokens },
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Endpoint {
        Endpoint { base_url: "https://api.test/v1".into(), model: "m-1".into() }
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 2), "he");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_prompt() {
        let req = SummaryRequest::new("  page body  ");
        assert_eq!(req.prompt(100), "Summarize this: page body");
        assert_eq!(req.prompt(4), "Summarize this: page");

        let req = SummaryRequest { is_transcript: true, ..SummaryRequest::new("talk") };
        assert_eq!(req.prompt(100), "Summarize this video transcript: talk");
    }

    #[test]
    fn test_build_openai() {
        let req = build(Provider::OpenAi, &endpoint(), "sk-1", "Summarize this: x", 150);
        assert_eq!(req.url, "https://api.test/v1/chat/completions");
        assert_eq!(req.headers, vec![("Authorization", "Bearer sk-1".to_string())]);
        assert_eq!(req.body["messages"][0]["content"], "Summarize this: x");
        assert_eq!(req.body["max_tokens"], 150);
    }

    #[test]
    fn test_build_claude() {
        let req = build(Provider::Claude, &endpoint(), "ck-1", "p", 150);
        assert_eq!(req.url, "https://api.test/v1/messages");
        assert!(req.headers.contains(&("x-api-key", "ck-1".to_string())));
        assert!(req.headers.contains(&("anthropic-version", "2023-06-01".to_string())));
        assert_eq!(req.body["model"], "m-1");
    }

    #[test]
    fn test_build_gemini() {
        let req = build(Provider::Gemini, &endpoint(), "gk-1", "p", 99);
        assert_eq!(req.url, "https://api.test/v1/models/m-1:generateContent");
        assert_eq!(req.body["contents"][0]["parts"][0]["text"], "p");
        assert_eq!(req.body["generationConfig"]["maxOutputTokens"], 99);
    }
}
