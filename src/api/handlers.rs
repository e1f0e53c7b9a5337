use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::mcp::SERVER_NAME;

/// Application state shared across handlers
#[derive(Clone)]
pub struct ApiState {
    /// Base URL of the Dreamshot API the tools forward to
    pub api_base_url: String,
}

pub(crate) async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub(crate) async fn server_info(State(state): State<ApiState>) -> impl IntoResponse {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "apiBaseUrl": state.api_base_url,
        "tools": crate::tools::definitions()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect::<Vec<_>>(),
    }))
}
