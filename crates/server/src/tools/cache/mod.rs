//! Cache-related MCP tools.
//!
//! This module provides tools for inspecting and clearing the summary cache.

pub mod clear;
pub mod get;

pub use clear::{clear_all_impl, clear_impl};
pub use get::{CacheGetParams, get_impl};
