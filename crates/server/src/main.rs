//! gist server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use gist_client::{Credentials, GatewayConfig, HttpGateway};
use gist_core::config::AppConfig;
use gist_core::{SqliteStore, SummaryStore, SystemClock};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod state;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("loading configuration")?;

    let db = SqliteStore::open(&config.db_path)
        .await
        .with_context(|| format!("opening store at {}", config.db_path.display()))?;
    let store = SummaryStore::new(Arc::new(db), Arc::new(SystemClock), &config);
    let gateway = HttpGateway::new(GatewayConfig::from_app_config(&config))?;

    let state = state::AppState::new(store, Arc::new(gateway), Credentials::from_config(&config), config.provider);

    tracing::info!(db_path = %config.db_path.display(), provider = %config.provider, "Starting gist server on stdio transport");

    let handler = handler::GistServer::new(state);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
