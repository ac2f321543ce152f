//! cache_clear and clear_all tool implementations.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::tools::json_result;

/// Output from the cache_clear tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheClearOutput {
    /// Number of entries deleted.
    pub deleted: usize,
}

/// Implementation of the cache_clear tool.
pub async fn clear_impl(state: &AppState) -> Result<CallToolResult, McpError> {
    let deleted = state.store.cache.clear().await?;
    json_result(&CacheClearOutput { deleted })
}

/// Output from the clear_all tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClearAllOutput {
    pub cleared: bool,
}

/// Implementation of the clear_all tool: empties cache and history.
pub async fn clear_all_impl(state: &AppState) -> Result<CallToolResult, McpError> {
    state.store.clear_all().await?;
    json_result(&ClearAllOutput { cleared: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{StaticGateway, make_state, output};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_clear_impl() {
        let state = make_state(Arc::new(StaticGateway::ok("S")));
        state.store.cache.put("a", "s").await.unwrap();
        state.store.cache.put("b", "s").await.unwrap();
        state.store.history.append("s", None).await.unwrap();

        let result: CacheClearOutput = output(&clear_impl(&state).await.unwrap());
        assert_eq!(result.deleted, 2);
        // History is independent of the cache.
        assert_eq!(state.store.history.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_all_impl() {
        let state = make_state(Arc::new(StaticGateway::ok("S")));
        state.store.cache.put("a", "s").await.unwrap();
        state.store.history.append("s", None).await.unwrap();

        let result: ClearAllOutput = output(&clear_all_impl(&state).await.unwrap());
        assert!(result.cleared);
        assert!(state.store.cache.is_empty().await.unwrap());
        assert!(state.store.history.list().await.unwrap().is_empty());
    }
}
