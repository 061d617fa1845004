//! Structure Processor MCP Server - Rust Implementation
//!
//! Serves the financial data formatter tool over the SSE tool protocol.

use std::sync::Arc;

use clap::Parser;

use structure_processor_mcp::config::{Config, EnvCredentials, DEFAULT_HOST, DEFAULT_PORT};
use structure_processor_mcp::error::Result;
use structure_processor_mcp::mcp::server::McpServer;

/// Structure Processor MCP Server
#[derive(Parser)]
#[command(name = "structure-processor-mcp")]
#[command(author, version, about = "Structure Processor MCP Server - financial data visualizations over SSE")]
struct Cli {
    /// Host to bind to
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to bind to
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Provider keys may live in a local .env file
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let cli = Cli::parse();

    let config = Config::new().with_address(cli.host, cli.port);
    let addr = config.socket_addr()?;

    let server = McpServer::new(&config, Arc::new(EnvCredentials))?;
    Arc::new(server).serve(addr).await?;

    Ok(())
}
