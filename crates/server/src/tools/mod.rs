//! MCP tool implementations.
//!
//! This module contains all tools exposed by the medi-assist server.

pub mod cache;
pub mod doctor_search;
pub mod email;
pub mod summarize;
pub mod web_search;

pub use doctor_search::DoctorSearchParams;
pub use email::{EmailDoctorsParams, SendEmailParams};
pub use summarize::SummarizeParams;
pub use web_search::WebSearchParams;
