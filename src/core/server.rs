//! MCP Server implementation and lifecycle management.
//!
//! The server advertises the tools capability only. Tool routing is built in
//! `domains/tools/router.rs` from the registry, so adding a tool does not
//! touch this file.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::{error, info};

use super::config::Config;
use crate::domains::cloud::{ClientFactory, Connector, CredentialResolver, HttpConnector};
use crate::domains::tools::ToolRegistry;
use crate::domains::translations::{EXPORT_FILE, Translator};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered tools and their shared collaborators.
    registry: ToolRegistry,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking to KB Cloud over HTTP.
    pub fn new(config: Config) -> Self {
        Self::with_parts(config, Arc::new(Translator::new()), Arc::new(HttpConnector))
    }

    /// Create a server from explicit collaborators.
    pub fn with_parts(
        config: Config,
        translator: Arc<Translator>,
        connector: Arc<dyn Connector>,
    ) -> Self {
        let config = Arc::new(config);
        let factory = ClientFactory::new(CredentialResolver::new(config.cloud.clone()), connector);
        let registry = ToolRegistry::new(factory, translator);

        let server = Self {
            tool_router: registry.router::<Self>(),
            registry,
            config,
        };

        if server.config.translations.export {
            match server.export_translations() {
                Ok(()) => info!("Exported translations to {}", EXPORT_FILE),
                Err(e) => error!("Failed to export translations: {}", e),
            }
        }

        server
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Write every description resolved so far to the export file.
    pub fn export_translations(&self) -> super::error::Result<()> {
        self.registry.translator().flush()?;
        Ok(())
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Read-only access to KB Cloud organizations, environments, database instances \
                 and backups."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
