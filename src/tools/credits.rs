use super::{json_result, tool_definition};
use crate::client::DreamshotClient;
use crate::error::Result;
use rmcp::model::{CallToolResult, Tool};
use serde_json::json;

pub const NAME: &str = "dreamshot_credits";

pub fn definition() -> Tool {
    tool_definition(
        NAME,
        "Check remaining Dreamshot credits for your organization. Each tool has different credit costs.",
        json!({
            "type": "object",
            "properties": {},
            "required": [],
        }),
    )
}

pub async fn handle(client: &DreamshotClient) -> Result<CallToolResult> {
    let response = client.get_credits().await?;

    json_result(&json!({
        "organizationId": response.organization_id,
        "credits": response.credits,
        "message": format!(
            "You have {} credits remaining. Use dreamshot_list_tools to see credit costs per tool.",
            response.credits
        ),
    }))
}
