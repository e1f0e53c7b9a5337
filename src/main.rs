use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dreamshot_mcp::{DreamshotClient, DreamshotServer, api, config, mcp};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// MCP over stdin/stdout
    Stdio,
    /// MCP over streamable HTTP
    Http,
}

#[derive(Parser, Debug)]
#[command(name = "dreamshot-mcp")]
#[command(about = "MCP server for the Dreamshot generative media API", long_about = None)]
#[command(version)]
struct Cli {
    /// Optional path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dreamshot API key (dst_xxx)
    #[arg(long, env = "DREAMSHOT_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Override the Dreamshot API base URL
    #[arg(long, env = "DREAMSHOT_BASE_URL")]
    base_url: Option<String>,

    /// Transport used to talk to the MCP client
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Override HTTP bind host (http transport only)
    #[arg(long)]
    host: Option<String>,

    /// Override HTTP bind port (http transport only)
    #[arg(long)]
    port: Option<u16>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Override log format (pretty, json)
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = config::load_config(cli.config.as_ref()).with_context(|| {
        format!(
            "Failed to load configuration from: {}",
            cli.config
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;

    // Apply CLI and environment overrides
    if let Some(api_key) = cli.api_key {
        config.api.api_key = api_key;
    }
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(host) = cli.host {
        config.http.host = host;
    }
    if let Some(port) = cli.port {
        config.http.port = port;
    }
    if let Some(log_level) = cli.log_level {
        config.logging.level = log_level;
    }
    if let Some(log_format) = cli.log_format {
        config.logging.format = log_format;
    }

    config::validate_config(&config)?;

    init_logging(&config.logging)?;

    let client = DreamshotClient::new(&config.api).context("Failed to create Dreamshot client")?;
    let server = DreamshotServer::new(client);

    info!(
        "Starting {} v{} ({:?} transport, API: {})",
        mcp::SERVER_NAME,
        env!("CARGO_PKG_VERSION"),
        cli.transport,
        server.api_base_url()
    );

    match cli.transport {
        Transport::Stdio => mcp::serve_stdio(server).await?,
        Transport::Http => api::start_server(&config.http, server).await?,
    }

    Ok(())
}

fn init_logging(config: &config::LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    // stdout carries the MCP stream in stdio mode, so logs always go to stderr
    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
