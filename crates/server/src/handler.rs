//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::state::AppState;
use crate::tools::{
    cache::{self, CacheGetParams},
    history::{self, HistoryListParams, HistoryRemoveParams},
    summarize::{SummarizeParams, summarize_impl},
};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for gist.
#[derive(Clone)]
pub struct GistServer {
    state: Arc<AppState>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl GistServer {
    /// Create a new server handler.
    pub fn new(state: AppState) -> Self {
        Self { state: Arc::new(state), tool_router: Self::tool_router() }
    }

    #[tool(
        description = "Summarize page text, HTML or a transcript. Returns a cached summary when the page was summarized before."
    )]
    async fn summarize(&self, params: Parameters<SummarizeParams>) -> Result<CallToolResult, McpError> {
        summarize_impl(&self.state, params.0).await
    }

    #[tool(description = "Look up a cached summary by page URL or fingerprint.")]
    async fn cache_get(&self, params: Parameters<CacheGetParams>) -> Result<CallToolResult, McpError> {
        cache::get_impl(&self.state, params.0).await
    }

    #[tool(description = "Delete every cached summary. History is kept.")]
    async fn cache_clear(&self) -> Result<CallToolResult, McpError> {
        cache::clear_impl(&self.state).await
    }

    #[tool(description = "List summary history from the last 24 hours.")]
    async fn history_list(&self, params: Parameters<HistoryListParams>) -> Result<CallToolResult, McpError> {
        history::list_impl(&self.state, params.0).await
    }

    #[tool(description = "Remove a summary from history by its exact text.")]
    async fn history_remove(&self, params: Parameters<HistoryRemoveParams>) -> Result<CallToolResult, McpError> {
        history::remove_impl(&self.state, params.0).await
    }

    #[tool(description = "Delete all summary history. Cached summaries are kept.")]
    async fn history_clear(&self) -> Result<CallToolResult, McpError> {
        history::clear_impl(&self.state).await
    }

    #[tool(description = "Delete every cached summary and all history.")]
    async fn clear_all(&self) -> Result<CallToolResult, McpError> {
        cache::clear_all_impl(&self.state).await
    }
}

impl ServerHandler for GistServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "gist".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
