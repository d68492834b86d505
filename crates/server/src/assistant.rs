//! Wiring of agents and collaborators from configuration.
//!
//! Everything expensive (the headless browser in particular) is created
//! lazily by the collaborator that owns it. Building an `Assistant` only
//! prepares handles and never touches the network.

use std::sync::Arc;

use medi_client::{
    DoctorDirectory, DoctorSearchAgent, DuckDuckGoClient, EmailSender, LazyRenderer, OllamaClient, PractoDirectory,
    RenderOptions, SmtpMailer, WebSearchAgent, WebSearcher,
};
use medi_core::{AppConfig, Error};

/// Shared state behind the MCP tools.
pub struct Assistant {
    pub web: WebSearchAgent<Arc<dyn WebSearcher>>,
    pub doctors: DoctorSearchAgent<Arc<dyn DoctorDirectory>>,
    pub summarizer: OllamaClient,
    pub mailer: Arc<dyn EmailSender>,
}

impl Assistant {
    /// Build the production collaborators described by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let searcher: Arc<dyn WebSearcher> = Arc::new(DuckDuckGoClient::new(config.into())?);

        let renderer = Arc::new(LazyRenderer::new(config.render_enabled));
        let options = RenderOptions {
            timeout_ms: config.render_timeout_ms,
            wait_ms: config.render_wait_ms,
            ..Default::default()
        };
        let directory: Arc<dyn DoctorDirectory> =
            Arc::new(PractoDirectory::new(renderer, &config.directory_search_url, options)?);

        let summarizer = OllamaClient::new(config.into())?;
        let mailer: Arc<dyn EmailSender> = Arc::new(SmtpMailer::new(config.into()));

        Ok(Self::new(config, searcher, directory, summarizer, mailer))
    }

    /// Assemble from explicit collaborators.
    pub fn new(
        config: &AppConfig, searcher: Arc<dyn WebSearcher>, directory: Arc<dyn DoctorDirectory>,
        summarizer: OllamaClient, mailer: Arc<dyn EmailSender>,
    ) -> Self {
        let web = WebSearchAgent::new(config.web_memoizer(), searcher);
        let doctors = DoctorSearchAgent::new(config.doctor_memoizer(), directory, config.max_doctor_results);
        Self { web, doctors, summarizer, mailer }
    }
}
