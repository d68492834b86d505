//! Cache-related MCP tools.
//!
//! This module provides tools for inspecting the result cache directories.

pub mod get;

pub use get::{CacheGetParams, get_impl};
