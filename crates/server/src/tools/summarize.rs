//! summarize tool implementation.

use medi_client::OllamaClient;
use medi_core::Error;
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for summarize tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SummarizeParams {
    /// Text to summarize (e.g., web_search or doctor_search output).
    pub text: String,
}

/// Output structure for summarize tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SummarizeOutput {
    pub summary: String,
}

/// Implementation of the summarize tool.
pub async fn summarize_impl(client: &OllamaClient, params: SummarizeParams) -> Result<CallToolResult, McpError> {
    let summary = client.summarize(&params.text).await?;

    let json =
        serde_json::to_string_pretty(&SummarizeOutput { summary }).map_err(|e| Error::Serialize(e.to_string()))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
