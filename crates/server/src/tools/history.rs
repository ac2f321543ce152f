//! History MCP tools: list, remove, clear.

use gist_core::HistoryItem;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::tools::json_result;

/// Parameters for the history_list tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct HistoryListParams {
    /// Newest first instead of storage order.
    #[serde(default)]
    pub recent_first: bool,
}

/// Output from the history_list tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryListOutput {
    pub items: Vec<HistoryItem>,
}

/// Parameters for the history_remove tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryRemoveParams {
    /// Exact summary text to remove.
    pub text: String,
}

/// Output from the history_remove tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryRemoveOutput {
    /// Number of items removed (0 when nothing matched).
    pub removed: usize,
}

/// Output from the history_clear tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryClearOutput {
    pub cleared: bool,
}

/// Implementation of the history_list tool.
pub async fn list_impl(state: &AppState, params: HistoryListParams) -> Result<CallToolResult, McpError> {
    let items = if params.recent_first {
        state.store.history.list_recent_first().await?
    } else {
        state.store.history.list().await?
    };
    json_result(&HistoryListOutput { items })
}

/// Implementation of the history_remove tool.
pub async fn remove_impl(state: &AppState, params: HistoryRemoveParams) -> Result<CallToolResult, McpError> {
    let removed = state.store.history.remove(&params.text).await?;
    json_result(&HistoryRemoveOutput { removed })
}

/// Implementation of the history_clear tool.
pub async fn clear_impl(state: &AppState) -> Result<CallToolResult, McpError> {
    state.store.history.clear().await?;
    json_result(&HistoryClearOutput { cleared: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{StaticGateway, make_state, output};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_list_and_remove() {
        let state = make_state(Arc::new(StaticGateway::ok("S")));
        state.store.history.append("foo", Some("https://a.com/")).await.unwrap();
        state.store.history.append("bar", None).await.unwrap();

        let listed: HistoryListOutput = output(&list_impl(&state, HistoryListParams::default()).await.unwrap());
        let texts: Vec<&str> = listed.items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["foo", "bar"]);

        let params = HistoryRemoveParams { text: "foo".into() };
        let removed: HistoryRemoveOutput = output(&remove_impl(&state, params).await.unwrap());
        assert_eq!(removed.removed, 1);

        let params = HistoryRemoveParams { text: "foo".into() };
        let removed: HistoryRemoveOutput = output(&remove_impl(&state, params).await.unwrap());
        assert_eq!(removed.removed, 0);
    }

    #[tokio::test]
    async fn test_remove_empty_text_is_noop() {
        let state = make_state(Arc::new(StaticGateway::ok("S")));
        state.store.history.append("foo", None).await.unwrap();

        let result = remove_impl(&state, HistoryRemoveParams { text: String::new() }).await.unwrap();
        let removed: HistoryRemoveOutput = output(&result);
        assert_eq!(removed.removed, 0);
        assert_eq!(state.store.history.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let state = make_state(Arc::new(StaticGateway::ok("S")));
        state.store.history.append("foo", None).await.unwrap();

        let result: HistoryClearOutput = output(&clear_impl(&state).await.unwrap());
        assert!(result.cleared);

        let listed: HistoryListOutput = output(&list_impl(&state, HistoryListParams::default()).await.unwrap());
        assert!(listed.items.is_empty());
    }
}
