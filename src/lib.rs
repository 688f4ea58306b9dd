//! KB Cloud MCP Server Library
//!
//! A Model Context Protocol server giving AI assistants read-only access to
//! KB Cloud organizations, environments, database instances and backups.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and the stdio transport
//! - **domains**: business logic organized by bounded contexts
//!   - **cloud**: credential resolution, client construction and the KB Cloud API
//!   - **tools**: the MCP tools and their shared call pipeline
//!   - **translations**: overridable tool and parameter descriptions
//! - **cli**: command-line flags
//!
//! # Example
//!
//! ```rust,no_run
//! use kb_cloud_mcp_server::core::{Config, ConfigOverrides, McpServer, StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(&ConfigOverrides::default())?;
//!     let server = McpServer::new(config);
//!     StdioTransport::run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
