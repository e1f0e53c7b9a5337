use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

/// Tool catalog. Entries (`name`, `kind`, `variants`, `cost`, `description`
/// and whatever else the API adds) are kept as returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResponse {
    #[serde(default)]
    pub tools: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub tool: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub params: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub generation_id: String,
    /// Always `processing` right after creation
    pub status: String,
    pub tool: String,
    pub variant: Option<String>,
}

/// Lifecycle state of a generation.
///
/// Only `completed` and `failed` are terminal. Any other value the API reports
/// is kept verbatim in `Other` and treated as still in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GenerationStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Other(String),
}

impl GenerationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationStatus::Completed | GenerationStatus::Failed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            GenerationStatus::Pending => "pending",
            GenerationStatus::Processing => "processing",
            GenerationStatus::Completed => "completed",
            GenerationStatus::Failed => "failed",
            GenerationStatus::Other(status) => status,
        }
    }
}

impl From<String> for GenerationStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "pending" => GenerationStatus::Pending,
            "processing" => GenerationStatus::Processing,
            "completed" => GenerationStatus::Completed,
            "failed" => GenerationStatus::Failed,
            _ => GenerationStatus::Other(status),
        }
    }
}

impl From<GenerationStatus> for String {
    fn from(status: GenerationStatus) -> Self {
        match status {
            GenerationStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure detail attached to a failed generation; both fields may be missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationError {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub display_url: String,
    pub media_kind: String,
    pub resolution: String,
}

/// Snapshot of a generation as reported by `GET /generations/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub generation_id: String,
    pub status: GenerationStatus,
    pub tool: String,
    pub variant: Option<String>,
    #[serde(default)]
    pub error: Option<GenerationError>,
    pub created_at: String,
    #[serde(default)]
    pub media_items: Vec<MediaItem>,
}

/// Media item carrying a download URL. Download URLs expire after about an hour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDownload {
    pub id: String,
    pub display_url: String,
    pub download_url: String,
    pub media_kind: String,
    pub resolution: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaResponse {
    pub generation_id: String,
    #[serde(default)]
    pub media: Vec<MediaDownload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditsResponse {
    pub organization_id: String,
    pub credits: i64,
}
