//! Client code for medi-assist.
//!
//! This crate provides the collaborators the agents delegate to (web search,
//! headless rendering, doctor directory scraping, summarization, email) and the
//! agents themselves, which put the result cache in front of them.

pub mod agents;
pub mod directory;
pub mod email;
pub mod error;
pub mod render;
pub mod summarize;
pub mod web;

pub use agents::{DoctorSearchAgent, DoctorSearchResult, SpecialtyDoctors, WebAnswer, WebSearchAgent};
pub use directory::{DoctorDirectory, DoctorRecord, PractoDirectory, manual_search_url};
pub use email::{EmailMessage, EmailSender, SmtpConfig, SmtpMailer};
pub use error::SearchError;
pub use render::{RenderError, RenderOptions, RenderedPage, Renderer};
#[cfg(feature = "render")]
pub use render::{HeadlessRenderer, LazyRenderer};
pub use summarize::{OllamaClient, OllamaConfig};
pub use web::{DuckDuckGoClient, DuckDuckGoConfig, WebSearcher};
