//! Core types and shared functionality for medi-assist.
//!
//! This crate provides:
//! - Content-addressed result cache backed by one file per entry
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{
    CacheKey, CachePolicy, FlightGroup, Memoized, Memoizer, Outcome, Payload, ResultCache, compute_digest,
};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
