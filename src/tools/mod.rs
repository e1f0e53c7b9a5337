//! MCP tool definitions for the Dreamshot API.
//!
//! Each submodule pairs a JSON input schema with a handler that validates the
//! arguments, calls [`DreamshotClient`](crate::client::DreamshotClient) and
//! renders the answer as a pretty-printed JSON text block. Handlers never
//! catch client errors; [`DreamshotServer`](crate::mcp::server::DreamshotServer) turns them into
//! error results.

pub mod credits;
pub mod generate;
pub mod list_tools;
pub mod media;
pub mod status;

use crate::error::{DreamshotError, Result};
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Schemas for every exposed tool, in registration order
pub fn definitions() -> Vec<Tool> {
    vec![
        list_tools::definition(),
        generate::definition(),
        status::definition(),
        media::definition(),
        credits::definition(),
    ]
}

pub(crate) fn tool_definition(name: &'static str, description: &'static str, schema: Value) -> Tool {
    Tool {
        name: name.into(),
        title: None,
        description: Some(description.into()),
        input_schema: Arc::new(schema.as_object().cloned().unwrap_or_default()),
        output_schema: None,
        annotations: None,
        icons: None,
        meta: None,
    }
}

/// Deserialize tool arguments into the handler's input type.
/// Missing arguments are treated as an empty object.
pub(crate) fn parse_input<T: DeserializeOwned>(arguments: Option<JsonObject>) -> Result<T> {
    let value = Value::Object(arguments.unwrap_or_default());
    serde_json::from_value(value).map_err(|e| DreamshotError::InvalidInput(e.to_string()))
}

/// Reject blank required string fields before any network call
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DreamshotError::InvalidInput(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

/// Render a value as a successful text result holding pretty-printed JSON
pub(crate) fn json_result<T: Serialize + ?Sized>(value: &T) -> Result<CallToolResult> {
    let text = serde_json::to_string_pretty(value)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}
