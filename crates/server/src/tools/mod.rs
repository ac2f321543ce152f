//! MCP tool implementations.
//!
//! This module contains all tools exposed by the gist server.

pub mod cache;
pub mod history;
pub mod summarize;

use gist_core::Error;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

/// Serialize a tool output as the single text content of a successful result.
pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use gist_client::{Credentials, Gateway, GatewayError, Provider, SummaryRequest};
    use gist_core::config::AppConfig;
    use gist_core::{Error, KvStore, MemoryStore, SummaryStore, SystemClock};
    use rmcp::model::CallToolResult;
    use serde::de::DeserializeOwned;

    use crate::state::AppState;

    /// Gateway that answers every call with the same reply.
    pub struct StaticGateway {
        reply: Result<String, GatewayError>,
        pub calls: AtomicUsize,
    }

    impl StaticGateway {
        pub fn ok(summary: &str) -> Self {
            Self { reply: Ok(summary.to_string()), calls: AtomicUsize::new(0) }
        }

        pub fn failing(err: GatewayError) -> Self {
            Self { reply: Err(err), calls: AtomicUsize::new(0) }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl Gateway for StaticGateway {
        async fn summarize(
            &self, content: &SummaryRequest, _credentials: &Credentials, _provider: Provider,
        ) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if content.text.trim().is_empty() {
                return Err(GatewayError::EmptyInput);
            }
            self.reply.clone()
        }
    }

    /// Store whose writes are always rejected.
    #[derive(Default)]
    pub struct ReadOnlyStore {
        inner: MemoryStore,
    }

    #[async_trait::async_trait]
    impl KvStore for ReadOnlyStore {
        async fn get(&self, key: &str) -> Result<Option<String>, Error> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, _value: String) -> Result<(), Error> {
            Err(Error::Persistence(format!("write of {key} rejected")))
        }
    }

    pub fn make_state_with_store(gateway: Arc<StaticGateway>, store: Arc<dyn KvStore>) -> AppState {
        let summaries = SummaryStore::new(store, Arc::new(SystemClock), &AppConfig::default());
        AppState::new(summaries, gateway, Credentials::default(), Provider::OpenAi)
    }

    pub fn make_state(gateway: Arc<StaticGateway>) -> AppState {
        make_state_with_store(gateway, Arc::new(MemoryStore::new()))
    }

    /// Decode the JSON text content of a tool result.
    pub fn output<T: DeserializeOwned>(result: &CallToolResult) -> T {
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        let text = content_val
            .get("text")
            .and_then(|v| v.as_str())
            .expect("Expected text field in content");
        serde_json::from_str(text).unwrap()
    }
}
