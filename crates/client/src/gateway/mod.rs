//! Summarization provider gateway.
//!
//! Turns page text into a summary through one of the supported LLM APIs.
//! Callers only see plain text or a `GatewayError`; request shapes and reply
//! parsing stay in this module.
//!
//! ### Providers
//!
//! - **openai**: chat completions, `Authorization: Bearer` header.
//! - **claude**: messages API, `x-api-key` + `anthropic-version` headers.
//! - **gemini**: `generateContent`, `x-goog-api-key` header.
//!
//! Input text is cut to `max_input_chars` before it is sent. There is no
//! retry; the HTTP client timeout is the only bound.

pub mod error;
pub mod request;
pub mod response;

pub use error::GatewayError;
pub use gist_core::config::Provider;
pub use request::{Endpoint, ProviderRequest, SummaryRequest};

use gist_core::config::AppConfig;
use reqwest::header;
use std::time::{Duration, Instant};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "gist/0.1";

/// Anything that can turn text into a summary.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    async fn summarize(
        &self, content: &SummaryRequest, credentials: &Credentials, provider: Provider,
    ) -> Result<String, GatewayError>;
}

/// API keys per provider.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub openai: Option<String>,
    pub claude: Option<String>,
    pub gemini: Option<String>,
}

impl Credentials {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            openai: config.openai_api_key.clone(),
            claude: config.claude_api_key.clone(),
            gemini: config.gemini_api_key.clone(),
        }
    }

    /// Key for a provider; blank keys count as missing.
    pub fn key_for(&self, provider: Provider) -> Result<&str, GatewayError> {
        let key = match provider {
            Provider::OpenAi => self.openai.as_deref(),
            Provider::Claude => self.claude.as_deref(),
            Provider::Gemini => self.gemini.as_deref(),
        };
        key.map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(GatewayError::MissingCredentials(provider))
    }
}

/// HTTP gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub openai: Endpoint,
    pub claude: Endpoint,
    pub gemini: Endpoint,
    /// Request timeout (default: 30s).
    pub timeout: Duration,
    /// User-agent string (default: gist/0.x).
    pub user_agent: String,
    /// Characters of input text sent (default: 5000).
    pub max_input_chars: usize,
    /// Summary length budget (default: 150).
    pub max_tokens: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            openai: Endpoint { base_url: "https://api.openai.com/v1".into(), model: "gpt-4o-mini".into() },
            claude: Endpoint { base_url: "https://api.anthropic.com/v1".into(), model: "claude-3-5-haiku-latest".into() },
            gemini: Endpoint {
                base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
                model: "gemini-1.5-flash".into(),
            },
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_input_chars: 5_000,
            max_tokens: 150,
        }
    }
}

impl GatewayConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
            max_input_chars: config.max_input_chars,
            max_tokens: config.max_tokens,
            ..Default::default()
        }
    }

    pub fn endpoint(&self, provider: Provider) -> &Endpoint {
        match provider {
            Provider::OpenAi => &self.openai,
            Provider::Claude => &self.claude,
            Provider::Gemini => &self.gemini,
        }
    }
}

/// Gateway that calls the provider APIs over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .use_rustls_tls()
            .build()?;

        Ok(Self { http, config })
    }

    /// Build the provider request without sending it.
    pub fn prepare(
        &self, content: &SummaryRequest, credentials: &Credentials, provider: Provider,
    ) -> Result<ProviderRequest, GatewayError> {
        let api_key = credentials.key_for(provider)?;
        if content.text.trim().is_empty() {
            return Err(GatewayError::EmptyInput);
        }

        let prompt = content.prompt(self.config.max_input_chars);
        Ok(request::build(provider, self.config.endpoint(provider), api_key, &prompt, self.config.max_tokens))
    }
}

#[async_trait::async_trait]
impl Gateway for HttpGateway {
    async fn summarize(
        &self, content: &SummaryRequest, credentials: &Credentials, provider: Provider,
    ) -> Result<String, GatewayError> {
        let prepared = self.prepare(content, credentials, provider)?;
        let start = Instant::now();

        tracing::debug!("requesting summary from {}: url={:?}", provider, content.url);

        let mut builder = self
            .http
            .post(&prepared.url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&prepared.body);
        for (name, value) in &prepared.headers {
            builder = builder.header(*name, value);
        }

        let http_response = builder.send().await?;

        let status = http_response.status();
        tracing::debug!("{} response status: {}", provider, status);

        if !status.is_success() {
            return Err(GatewayError::ProviderRejected { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let summary = response::extract_summary(provider, &bytes)?;

        tracing::debug!("summary from {} in {:?} ({} chars)", provider, start.elapsed(), summary.len());

        Ok(summary)
    }
}
