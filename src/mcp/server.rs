// MCP server exposing the Dreamshot tools.
// Routes tool calls by name and converts every handler error into an error result,
// so no call ever surfaces as a protocol-level failure.

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::client::DreamshotClient;
use crate::error::{DreamshotError, Result};
use crate::tools::{self, credits, generate, list_tools, media, status};

pub const SERVER_NAME: &str = "dreamshot-mcp-server";

/// Dispatch router for the five Dreamshot tools
#[derive(Clone)]
pub struct DreamshotServer {
    client: DreamshotClient,
}

impl DreamshotServer {
    pub fn new(client: DreamshotClient) -> Self {
        Self { client }
    }

    pub fn api_base_url(&self) -> &str {
        self.client.base_url().as_str()
    }

    pub fn tools(&self) -> Vec<Tool> {
        tools::definitions()
    }

    /// Run the named tool. Always yields a result; failures are flagged with `is_error`.
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        info!(tool = %name, "Tool call");

        let outcome = match name {
            list_tools::NAME => list_tools::handle(&self.client).await,
            generate::NAME => generate::handle(&self.client, arguments).await,
            status::NAME => status::handle(&self.client, arguments).await,
            media::NAME => media::handle(&self.client, arguments).await,
            credits::NAME => credits::handle(&self.client).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                return error_text(json!({ "message": format!("Unknown tool: {}", name) }));
            }
        };

        unwrap_outcome(name, outcome)
    }
}

fn unwrap_outcome(name: &str, outcome: Result<CallToolResult>) -> CallToolResult {
    match outcome {
        Ok(result) => {
            debug!(tool = %name, "Tool call succeeded");
            result
        }
        Err(err) => {
            warn!(tool = %name, "Tool call failed: {}", err);
            error_result(&err)
        }
    }
}

/// Convert a handler error into an error-flagged tool result
pub(crate) fn error_result(err: &DreamshotError) -> CallToolResult {
    match err {
        DreamshotError::Api {
            status,
            code,
            message,
        } => error_text(json!({
            "error": code,
            "message": message,
            "status": status,
        })),
        other => error_text(json!({ "message": other.to_string() })),
    }
}

fn error_text(body: serde_json::Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());
    CallToolResult::error(vec![Content::text(text)])
}

impl ServerHandler for DreamshotServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Dreamshot generative media tools. Start a job with dreamshot_generate, \
                 poll dreamshot_status until it completes, then fetch download URLs with \
                 dreamshot_media."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _params: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        debug!("Listing Dreamshot tools");
        Ok(ListToolsResult {
            meta: None,
            tools: self.tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        params: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        Ok(self.dispatch(&params.name, params.arguments).await)
    }
}
