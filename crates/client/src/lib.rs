//! Client code for gist.
//!
//! This crate provides the provider gateway (LLM summarization over HTTP)
//! and visible-text extraction, shared by the server.

pub mod extract;
pub mod gateway;

pub use extract::visible_text;
pub use gateway::{Credentials, Gateway, GatewayConfig, GatewayError, HttpGateway, Provider, SummaryRequest};
