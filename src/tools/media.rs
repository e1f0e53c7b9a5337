use super::{json_result, parse_input, require_non_empty, tool_definition};
use crate::client::DreamshotClient;
use crate::error::Result;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde::Deserialize;
use serde_json::json;

pub const NAME: &str = "dreamshot_media";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInput {
    pub generation_id: String,
}

pub fn definition() -> Tool {
    tool_definition(
        NAME,
        "Get download URLs for a completed Dreamshot generation. URLs expire after 1 hour.",
        json!({
            "type": "object",
            "properties": {
                "generationId": {
                    "type": "string",
                    "description": "The generation ID to get media for",
                },
            },
            "required": ["generationId"],
        }),
    )
}

pub async fn handle(client: &DreamshotClient, arguments: Option<JsonObject>) -> Result<CallToolResult> {
    let input: MediaInput = parse_input(arguments)?;
    require_non_empty("generationId", &input.generation_id)?;

    let response = client.get_media(&input.generation_id).await?;
    let count = response.media.len();
    let message = if count > 0 {
        format!(
            "{} media item(s) available. Download URLs expire in 1 hour.",
            count
        )
    } else {
        "No media available for this generation.".to_string()
    };

    json_result(&json!({
        "generationId": response.generation_id,
        "mediaCount": count,
        "media": response.media,
        "message": message,
    }))
}
