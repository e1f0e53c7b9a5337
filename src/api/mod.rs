pub mod handlers;
pub mod routes;

use crate::config::HttpConfig;
use crate::mcp::{DreamshotServer, create_http_service};
use anyhow::Result;
use axum::Router;
use handlers::ApiState;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Serve the MCP server over streamable HTTP until Ctrl+C or SIGTERM
pub async fn start_server(http: &HttpConfig, server: DreamshotServer) -> Result<()> {
    let addr = format!("{}:{}", http.host, http.port);
    let ct = CancellationToken::new();

    let app = build_router(server, ct.child_token());

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("HTTP server listening on {}", addr);
    info!("Health check: http://{}/health", addr);
    info!("Server info: http://{}/info", addr);
    info!("MCP endpoint: http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(ct))
        .await?;

    Ok(())
}

pub fn build_router(server: DreamshotServer, ct: CancellationToken) -> Router {
    let state = ApiState {
        api_base_url: server.api_base_url().to_string(),
    };

    Router::new()
        .merge(routes::health_routes())
        .nest_service("/mcp", create_http_service(server, ct))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal(ct: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down...");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, shutting down...");
        },
    }

    // Close open MCP sessions
    ct.cancel();
}
