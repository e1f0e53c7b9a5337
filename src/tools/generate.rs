use super::{json_result, parse_input, require_non_empty, tool_definition};
use crate::client::{DreamshotClient, GenerateRequest};
use crate::error::Result;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde::Deserialize;
use serde_json::{Map, Number, Value, json};
use tracing::info;

pub const NAME: &str = "dreamshot_generate";

const DESCRIPTION: &str = "Start a Dreamshot AI generation. Returns a generationId to poll for status.

Available tools:
- ai_edit: Edit images with AI (variants: ultra, nano, seedream, flux, flux2max, gpt_image_1)
- create_video: Generate videos from images/prompts (variants: kling-v2.6, veo-3.1, sora-2, etc.)
- enhancer: Upscale images (variants: dreamshot, magnific_precision, magnific_creative)
- generate_image: Generate from trained models
- create_anything: Generate from text with FLUX

Use dreamshot_list_tools to see all available tools, variants, and costs.";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInput {
    pub tool: String,
    pub variant: Option<String>,
    pub prompt: Option<String>,
    pub aspect_ratio: Option<String>,
    pub duration: Option<Number>,
    pub output_count: Option<Number>,
    pub image_urls: Option<Vec<String>>,
    pub model: Option<String>,
    pub generate_audio: Option<bool>,
    pub project_id: Option<String>,
}

impl GenerateInput {
    /// Build the API request. `params` only carries fields the caller supplied;
    /// blank strings count as not supplied.
    pub fn into_request(self) -> GenerateRequest {
        let mut params = Map::new();

        if let Some(prompt) = non_blank(self.prompt) {
            params.insert("prompt".to_string(), Value::String(prompt));
        }
        if let Some(aspect_ratio) = non_blank(self.aspect_ratio) {
            params.insert("aspectRatio".to_string(), Value::String(aspect_ratio));
        }
        if let Some(duration) = self.duration {
            params.insert("duration".to_string(), Value::Number(duration));
        }
        if let Some(output_count) = self.output_count {
            params.insert("outputCount".to_string(), Value::Number(output_count));
        }
        if let Some(model) = non_blank(self.model) {
            params.insert("model".to_string(), Value::String(model));
        }
        if let Some(generate_audio) = self.generate_audio {
            params.insert("generateAudio".to_string(), Value::Bool(generate_audio));
        }

        GenerateRequest {
            tool: self.tool,
            variant: non_blank(self.variant),
            params,
            image_urls: self.image_urls,
            project_id: non_blank(self.project_id),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn definition() -> Tool {
    tool_definition(
        NAME,
        DESCRIPTION,
        json!({
            "type": "object",
            "properties": {
                "tool": {
                    "type": "string",
                    "description": "The tool to use (e.g., ai_edit, create_video, enhancer)",
                },
                "variant": {
                    "type": "string",
                    "description": "Specific variant of the tool (e.g., ultra, nano, seedream)",
                },
                "prompt": {
                    "type": "string",
                    "description": "Text prompt describing what to generate or edit",
                },
                "aspectRatio": {
                    "type": "string",
                    "description": "Output aspect ratio (e.g., 1:1, 16:9, 9:16)",
                },
                "duration": {
                    "type": "number",
                    "description": "Video duration in seconds (for create_video)",
                },
                "outputCount": {
                    "type": "number",
                    "description": "Number of outputs to generate (1-4)",
                },
                "imageUrls": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Input image URLs for editing tools",
                },
                "model": {
                    "type": "string",
                    "description": "Video model to use (for create_video)",
                },
                "generateAudio": {
                    "type": "boolean",
                    "description": "Generate audio for video (for create_video)",
                },
                "projectId": {
                    "type": "string",
                    "description": "Optional project ID to organize generations",
                },
            },
            "required": ["tool"],
        }),
    )
}

pub async fn handle(client: &DreamshotClient, arguments: Option<JsonObject>) -> Result<CallToolResult> {
    let input: GenerateInput = parse_input(arguments)?;
    require_non_empty("tool", &input.tool)?;

    let request = input.into_request();
    let response = client.generate(&request).await?;

    info!(
        "Started generation {} (tool: {}, variant: {:?})",
        response.generation_id, response.tool, response.variant
    );

    json_result(&json!({
        "generationId": response.generation_id,
        "status": response.status,
        "tool": response.tool,
        "variant": response.variant,
        "message": format!(
            "Generation started. Use dreamshot_status with generationId \"{}\" to check progress.",
            response.generation_id
        ),
    }))
}
