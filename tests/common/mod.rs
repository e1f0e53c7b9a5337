#![allow(dead_code)]

use dreamshot_mcp::{DreamshotClient, DreamshotServer, config::ApiConfig};
use httpmock::MockServer;
use rmcp::model::{CallToolResult, JsonObject};
use serde_json::{Value, json};

pub const TEST_API_KEY: &str = "dst_integration";

// ──────────────────────────────────────────────
// Mock Dreamshot API
// ──────────────────────────────────────────────

/// Build a router whose client talks to the given mock API
pub fn server_for(mock: &MockServer) -> DreamshotServer {
    let config = ApiConfig::new(TEST_API_KEY).with_base_url(mock.url("/api/v1"));
    DreamshotServer::new(DreamshotClient::new(&config).unwrap())
}

pub fn status_body(status: &str) -> Value {
    json!({
        "generationId": "gen_int",
        "status": status,
        "tool": "ai_edit",
        "variant": "ultra",
        "error": null,
        "createdAt": "2025-06-01T12:00:00Z",
        "mediaItems": []
    })
}

// ──────────────────────────────────────────────
// Shared helpers
// ──────────────────────────────────────────────

pub fn args(value: Value) -> Option<JsonObject> {
    value.as_object().cloned()
}

/// Text of the single content block of a tool result
pub fn result_text(result: &CallToolResult) -> String {
    result.content[0]
        .as_text()
        .expect("tool result should be text")
        .text
        .clone()
}

pub fn result_json(result: &CallToolResult) -> Value {
    serde_json::from_str(&result_text(result)).expect("tool result should be JSON")
}

/// Helper to extract JSON from a response body.
pub async fn response_json(response: axum::http::Response<axum::body::Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
