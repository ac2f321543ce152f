//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (GIST_*)
//! 2. TOML config file (if GIST_CONFIG_FILE set)
//! 3. Built-in defaults

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// LLM vendor used for summarization.
///
/// Names are matched case-insensitively wherever a provider is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Claude,
    Gemini,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Claude, Provider::Gemini];

    pub fn as_str(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Claude => "claude",
            Provider::Gemini => "gemini",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::Invalid {
                field: "provider".into(),
                reason: format!("unknown provider '{s}' (expected openai, claude or gemini)"),
            })
    }
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (GIST_*)
/// 2. TOML config file (if GIST_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite record store.
    ///
    /// Set via GIST_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Provider used when a request does not name one.
    ///
    /// Set via GIST_PROVIDER environment variable.
    #[serde(default)]
    pub provider: Provider,

    /// Set via GIST_OPENAI_API_KEY environment variable.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Set via GIST_CLAUDE_API_KEY environment variable.
    #[serde(default)]
    pub claude_api_key: Option<String>,

    /// Set via GIST_GEMINI_API_KEY environment variable.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Maximum number of cached summaries.
    ///
    /// Set via GIST_MAX_CACHE_SIZE environment variable.
    #[serde(default = "default_max_cache_size")]
    pub max_cache_size: usize,

    /// Age in hours after which history items are pruned on the next append.
    ///
    /// Set via GIST_HISTORY_RETENTION_HOURS environment variable.
    #[serde(default = "default_retention_hours")]
    pub history_retention_hours: u64,

    /// Provider request timeout in milliseconds.
    ///
    /// Set via GIST_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Characters of page text sent to the provider.
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// Token budget for the generated summary.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// User-Agent string for provider requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./gist-cache.sqlite")
}

fn default_max_cache_size() -> usize {
    crate::cache::MAX_CACHE_SIZE
}

fn default_retention_hours() -> u64 {
    24
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_input_chars() -> usize {
    5_000
}

fn default_max_tokens() -> u32 {
    150
}

fn default_user_agent() -> String {
    "gist/0.1".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            provider: Provider::default(),
            openai_api_key: None,
            claude_api_key: None,
            gemini_api_key: None,
            max_cache_size: default_max_cache_size(),
            history_retention_hours: default_retention_hours(),
            timeout_ms: default_timeout_ms(),
            max_input_chars: default_max_input_chars(),
            max_tokens: default_max_tokens(),
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// History retention window as Duration.
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.history_retention_hours.saturating_mul(60 * 60))
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `GIST_`
    /// 2. TOML file from `GIST_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("GIST_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("GIST_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// API key for a provider (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set or blank.
    pub fn require_api_key(&self, provider: Provider) -> Result<&str, ConfigError> {
        let key = match provider {
            Provider::OpenAi => self.openai_api_key.as_deref(),
            Provider::Claude => self.claude_api_key.as_deref(),
            Provider::Gemini => self.gemini_api_key.as_deref(),
        };

        key.filter(|k| !k.trim().is_empty()).ok_or_else(|| ConfigError::Missing {
            field: format!("{provider}_api_key"),
            hint: format!("Set GIST_{}_API_KEY environment variable", provider.as_str().to_uppercase()),
        })
    }
}
