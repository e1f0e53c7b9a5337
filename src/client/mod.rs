//! HTTP client for the Dreamshot API.
//!
//! Every call is a single request authenticated with a bearer token. Non-2xx
//! responses are mapped to [`DreamshotError::Api`]; transport failures surface
//! as [`DreamshotError::Http`].

pub mod poll;
pub mod types;

use crate::config::ApiConfig;
use crate::error::{DEFAULT_ERROR_CODE, DEFAULT_ERROR_MESSAGE, DreamshotError, Result};
use poll::poll_until_terminal;
pub use poll::WaitOptions;
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use types::ApiErrorBody;
pub use types::*;

#[derive(Clone)]
pub struct DreamshotClient {
    http: reqwest::Client,
    api_key: String,
    base_url: Url,
}

impl DreamshotClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            DreamshotError::Config(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DreamshotError::Config(format!(
                "Base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("dreamshot-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn request<T, B>(&self, method: Method, segments: &[&str], body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), url)
            .bearer_auth(&self.api_key);
        if let Some(body) = body {
            // .json() also sets Content-Type: application/json
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body: ApiErrorBody = serde_json::from_slice(&bytes).unwrap_or_default();
            let code = body.error.unwrap_or_else(|| DEFAULT_ERROR_CODE.to_string());
            let message = body
                .message
                .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
            warn!(
                "Dreamshot API {} {} failed with {}: {}",
                method,
                segments.join("/"),
                status.as_u16(),
                code
            );
            return Err(DreamshotError::api(status.as_u16(), code, message));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        self.request::<T, ()>(Method::GET, segments, None).await
    }

    /// List available tools with their variants and credit costs
    pub async fn list_tools(&self) -> Result<ListToolsResponse> {
        self.get(&["tools"]).await
    }

    /// Start a new generation. Creates a billable job on the remote side.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        if request.tool.trim().is_empty() {
            return Err(DreamshotError::InvalidInput(
                "tool must not be empty".to_string(),
            ));
        }
        self.request(Method::POST, &["generations"], Some(request))
            .await
    }

    pub async fn get_status(&self, generation_id: &str) -> Result<StatusResponse> {
        require_generation_id(generation_id)?;
        self.get(&["generations", generation_id]).await
    }

    /// Fetch media with time-limited download URLs.
    /// Not gated on the generation being completed; the API's answer is passed through.
    pub async fn get_media(&self, generation_id: &str) -> Result<MediaResponse> {
        require_generation_id(generation_id)?;
        self.get(&["generations", generation_id, "media"]).await
    }

    pub async fn get_credits(&self) -> Result<CreditsResponse> {
        self.get(&["credits"]).await
    }

    /// Poll [`Self::get_status`] until the generation is completed or failed
    pub async fn wait_for_completion(
        &self,
        generation_id: &str,
        options: WaitOptions,
    ) -> Result<StatusResponse> {
        require_generation_id(generation_id)?;
        poll_until_terminal(generation_id, &options, || self.get_status(generation_id)).await
    }
}

fn require_generation_id(generation_id: &str) -> Result<()> {
    if generation_id.trim().is_empty() {
        return Err(DreamshotError::InvalidInput(
            "generationId must not be empty".to_string(),
        ));
    }
    Ok(())
}
