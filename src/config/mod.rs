pub mod types;

use anyhow::{Context, Result};
use config::{Config, File};
use reqwest::Url;
use std::path::Path;
pub use types::*;

/// Load configuration from an optional TOML file.
/// Without a path every section falls back to its defaults.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let path = path.as_ref();

    let config = Config::builder()
        .add_source(File::from(path))
        .build()
        .with_context(|| format!("Failed to load config from: {}", path.display()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    Ok(app_config)
}

/// Validate the final configuration, after CLI and environment overrides
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.api.api_key.trim().is_empty() {
        anyhow::bail!(
            "DREAMSHOT_API_KEY environment variable is required. \
             Get your API key at https://dreamshot.ai/settings/api"
        );
    }

    let url = Url::parse(&config.api.base_url)
        .with_context(|| format!("Invalid base URL '{}'", config.api.base_url))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!(
            "Base URL '{}' must use http or https",
            config.api.base_url
        );
    }

    if config.api.request_timeout_secs == 0 {
        anyhow::bail!("request_timeout_secs must be greater than zero");
    }

    // Validate log level
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        anyhow::bail!(
            "Invalid log level '{}'. Valid levels: {}",
            config.logging.level,
            valid_levels.join(", ")
        );
    }

    // Validate log format
    let valid_formats = ["pretty", "json"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        anyhow::bail!(
            "Invalid log format '{}'. Valid formats: {}",
            config.logging.format,
            valid_formats.join(", ")
        );
    }

    Ok(())
}
