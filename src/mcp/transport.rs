// Transports hosting the Dreamshot MCP server: stdio for local agents,
// streamable HTTP for network clients.

use super::server::DreamshotServer;
use anyhow::{Context, Result};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Serve MCP over stdin/stdout until the peer closes the stream
pub async fn serve_stdio(server: DreamshotServer) -> Result<()> {
    // rmcp handles JSON-RPC framing on stdout; logs go to stderr
    let service = server
        .serve(stdio())
        .await
        .context("Failed to start stdio MCP service")?;

    info!("Dreamshot MCP server running on stdio");

    service.waiting().await?;

    info!("Stdio MCP session closed");
    Ok(())
}

/// Create a StreamableHttpService for the Dreamshot server.
/// Each HTTP session gets its own clone of the server; clones share the HTTP connection pool.
pub fn create_http_service(
    server: DreamshotServer,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<DreamshotServer, LocalSessionManager> {
    let service_factory = move || Ok(server.clone());

    StreamableHttpService::new(
        service_factory,
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig {
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
            sse_retry: Some(Duration::from_secs(3)),
            cancellation_token,
        },
    )
}
