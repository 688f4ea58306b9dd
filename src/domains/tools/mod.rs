//! Tools domain module.
//!
//! This module exposes the KB Cloud API as MCP tools.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool declarations, one file per resource area
//! - `contract.rs` - The shared call pipeline every tool runs through
//! - `params.rs` - Parameter declaration, schema generation and extraction
//! - `router.rs` - ToolRouter builder, the single list of registered tools
//! - `registry.rs` - Collaborators shared by every tool handler
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a unit struct implementing [`CloudTool`] under `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add its route in `router.rs`

pub mod contract;
pub mod definitions;
mod error;
pub mod params;
mod registry;
pub mod router;

pub use contract::{CloudTool, execute};
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
