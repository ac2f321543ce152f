//! Shared state handed to every tool call.

use std::sync::Arc;

use gist_client::{Credentials, Gateway, Provider};
use gist_core::SummaryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SummaryStore,
    pub gateway: Arc<dyn Gateway>,
    pub credentials: Credentials,
    /// Provider used when a call does not pick one.
    pub provider: Provider,
}

impl AppState {
    pub fn new(store: SummaryStore, gateway: Arc<dyn Gateway>, credentials: Credentials, provider: Provider) -> Self {
        Self { store, gateway, credentials, provider }
    }
}
