//! KB Cloud MCP Server Entry Point
//!
//! Parses flags, loads layered configuration, initializes logging and serves
//! MCP over stdio.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, Subscriber, info};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use kb_cloud_mcp_server::cli::{Cli, Command};
use kb_cloud_mcp_server::core::config::LoggingConfig;
use kb_cloud_mcp_server::core::{Config, McpServer, StdioTransport};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.overrides())?;

    init_logging(&config.logging)?;

    if let Some(path) = &config.source {
        info!("Using config file: {}", path.display());
    }
    info!("Starting {} v{}", config.server.name, config.server.version);

    match cli.command {
        Command::Stdio => {
            let server = McpServer::new(config);
            info!("Server initialized");
            StdioTransport::run(server).await?;
        }
    }

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs are JSON lines written to stderr, or appended to the configured log
/// file.
fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(parse_level(&config.level).into());

    match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;

            json_subscriber(filter, Mutex::new(file)).init();
        }
        None => json_subscriber(filter, std::io::stderr).init(),
    }

    Ok(())
}

/// Map a configured level name to a tracing level; unknown names mean `info`.
fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn json_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(writer)
        .finish()
}
