//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the agents held by [`Assistant`].
use std::sync::Arc;

use crate::assistant::Assistant;
use crate::tools::{
    DoctorSearchParams, EmailDoctorsParams, SendEmailParams, SummarizeParams, WebSearchParams,
    cache::{CacheGetParams, get_impl},
    doctor_search, email, summarize, web_search,
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

/// The main MCP server handler for medi-assist.
#[derive(Clone)]
pub struct MediAssistServer {
    tool_router: ToolRouter<Self>,
    assistant: Arc<Assistant>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl MediAssistServer {
    /// Create a new server handler.
    pub fn new(assistant: Assistant) -> Self {
        Self { tool_router: Self::tool_router(), assistant: Arc::new(assistant) }
    }

    /// Search the web for a medical question.
    ///
    /// Answers are cached on disk by normalized query; `force_refresh` bypasses the cached entry.
    #[tool(description = "Search the web for a medical query. Returns result links as text; cached by query.")]
    async fn web_search(&self, params: Parameters<WebSearchParams>) -> Result<CallToolResult, McpError> {
        web_search::search_impl(&self.assistant.web, params.0).await
    }

    /// Find doctors for each specialty near a location.
    #[tool(description = "Find doctors for one or more specialties in a city. Cached per specialty and city.")]
    async fn doctor_search(&self, params: Parameters<DoctorSearchParams>) -> Result<CallToolResult, McpError> {
        doctor_search::search_impl(&self.assistant.doctors, params.0).await
    }

    #[tool(description = "Summarize text in simple terms suitable for an email, using the configured Ollama model.")]
    async fn summarize(&self, params: Parameters<SummarizeParams>) -> Result<CallToolResult, McpError> {
        summarize::summarize_impl(&self.assistant.summarizer, params.0).await
    }

    #[tool(description = "Send a plain-text email to a receiver from the configured sender account.")]
    async fn send_email(&self, params: Parameters<SendEmailParams>) -> Result<CallToolResult, McpError> {
        email::send_impl(&self.assistant.mailer, params.0).await
    }

    /// Search one specialty in a city and email the listing.
    #[tool(description = "Find doctors for a specialty in a city and email the list to a receiver.")]
    async fn email_doctors(&self, params: Parameters<EmailDoctorsParams>) -> Result<CallToolResult, McpError> {
        email::email_doctors_impl(&self.assistant.doctors, &self.assistant.mailer, params.0).await
    }

    /// Read a cached entry without running a search.
    #[tool(description = "Read a cached web or doctor search result by its key fields. Returns CACHE_MISS if absent.")]
    async fn cache_get(&self, params: Parameters<CacheGetParams>) -> Result<CallToolResult, McpError> {
        let web = self.assistant.web.memoizer().cache();
        let doctor = self.assistant.doctors.memoizer().cache();
        get_impl(web, doctor, params.0).await
    }
}

impl ServerHandler for MediAssistServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "medi-assist".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Medical assistant tools. Web and doctor searches are cached on disk by normalized query.".into(),
            ),
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
