//! medi-assist server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use anyhow::Result;
use medi_core::AppConfig;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod assistant;
mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::info!(
        web_cache_dir = %config.web_cache_dir.display(),
        doctor_cache_dir = %config.doctor_cache_dir.display(),
        render_enabled = config.render_enabled,
        "Starting medi-assist server on stdio transport"
    );

    let assistant = assistant::Assistant::from_config(&config)?;
    let handler = handler::MediAssistServer::new(assistant);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
