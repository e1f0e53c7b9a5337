use super::{json_result, parse_input, require_non_empty, tool_definition};
use crate::client::{DreamshotClient, GenerationStatus, StatusResponse};
use crate::error::Result;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde::Deserialize;
use serde_json::{Value, json};

pub const NAME: &str = "dreamshot_status";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInput {
    pub generation_id: String,
}

pub fn definition() -> Tool {
    tool_definition(
        NAME,
        "Check the status of a Dreamshot generation. Returns pending, completed, or failed \
         with media items if completed.",
        json!({
            "type": "object",
            "properties": {
                "generationId": {
                    "type": "string",
                    "description": "The generation ID to check status for",
                },
            },
            "required": ["generationId"],
        }),
    )
}

pub async fn handle(client: &DreamshotClient, arguments: Option<JsonObject>) -> Result<CallToolResult> {
    let input: StatusInput = parse_input(arguments)?;
    require_non_empty("generationId", &input.generation_id)?;

    let response = client.get_status(&input.generation_id).await?;
    json_result(&summarize(response))
}

/// Shape the status snapshot for the agent; the fields present depend on the status
fn summarize(response: StatusResponse) -> Value {
    let mut result = json!({
        "generationId": response.generation_id,
        "status": &response.status,
        "tool": response.tool,
        "variant": response.variant,
        "createdAt": response.created_at,
    });

    match &response.status {
        GenerationStatus::Completed => {
            result["message"] = json!(format!(
                "Generation completed! {} media item(s) ready. Use dreamshot_media to get download URLs.",
                response.media_items.len()
            ));
            result["mediaItems"] = json!(response.media_items);
        }
        GenerationStatus::Failed => {
            let reason = response
                .error
                .as_ref()
                .and_then(|e| e.message.as_deref())
                .filter(|m| !m.is_empty())
                .unwrap_or("Unknown error");
            result["message"] = json!(format!("Generation failed: {}", reason));
            result["error"] = json!(response.error);
        }
        GenerationStatus::Pending | GenerationStatus::Processing | GenerationStatus::Other(_) => {
            result["message"] = json!("Generation still processing. Poll again in a few seconds.");
        }
    }

    result
}
