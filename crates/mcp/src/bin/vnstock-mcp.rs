// Standalone MCP server binary

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use vnstock_mcp::config::ServerConfig;
use vnstock_mcp::server::McpServer;
use vnstock_mcp::tools::vnstock_registry;

#[derive(Parser, Debug)]
#[command(name = "vnstock-mcp")]
#[command(about = "MCP server exposing Vnstock stock market data tools", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "vnstock-mcp.toml")]
    config: PathBuf,

    /// Base URL of the Vnstock API (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Fail when login returns no access_token instead of continuing without one
    #[arg(long)]
    strict_token: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // VNSTOCK_USERNAME / VNSTOCK_PASSWORD may live in a .env file
    let dotenv = dotenvy::dotenv();

    // Initialize tracing; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let args = Args::parse();

    tracing::info!("Vnstock MCP Server starting...");

    let mut config = ServerConfig::load(&args.config)?;
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.api.timeout_secs = timeout_secs;
    }
    if args.strict_token {
        config.api.strict_token = true;
    }

    let client = config.build_client()?;
    tracing::info!(
        base_url = %client.config().base_url,
        authenticated = client.config().has_credentials(),
        "Configured Vnstock API client"
    );

    let registry = vnstock_registry(client);
    tracing::info!("Registered {} tools", registry.len());

    // Start MCP server
    let server = McpServer::new(registry);
    server.start().await?;

    Ok(())
}
