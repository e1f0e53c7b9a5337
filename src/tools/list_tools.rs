use super::{json_result, tool_definition};
use crate::client::DreamshotClient;
use crate::error::Result;
use rmcp::model::{CallToolResult, Tool};
use serde_json::json;

pub const NAME: &str = "dreamshot_list_tools";

pub fn definition() -> Tool {
    tool_definition(
        NAME,
        "List available Dreamshot AI tools with their variants and credit costs. \
         Use this to discover what tools are available before generating.",
        json!({
            "type": "object",
            "properties": {},
            "required": [],
        }),
    )
}

pub async fn handle(client: &DreamshotClient) -> Result<CallToolResult> {
    let response = client.list_tools().await?;
    json_result(&response.tools)
}
