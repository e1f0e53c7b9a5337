use std::time::Duration;
use thiserror::Error;

pub(crate) const DEFAULT_ERROR_CODE: &str = "unknown_error";
pub(crate) const DEFAULT_ERROR_MESSAGE: &str = "An unknown error occurred";

#[derive(Error, Debug)]
pub enum DreamshotError {
    /// Non-2xx response from the Dreamshot API, or a local polling timeout
    #[error("Dreamshot API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DreamshotError>;

impl DreamshotError {
    pub fn api(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        DreamshotError::Api {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Raised by the poll loop when a generation does not reach a terminal status in time
    pub fn timeout(generation_id: &str, timeout: Duration) -> Self {
        DreamshotError::api(
            408,
            "timeout",
            format!(
                "Generation {} timed out after {}ms",
                generation_id,
                timeout.as_millis()
            ),
        )
    }

    /// Machine-readable code for mapped API errors
    pub fn code(&self) -> Option<&str> {
        match self {
            DreamshotError::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            DreamshotError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
