//! KB Cloud domain module.
//!
//! Everything needed to turn a tool call into an authenticated upstream
//! request:
//!
//! - `context` - per-call overrides and cancellation ([`CallContext`])
//! - `credentials` - two-tier credential resolution ([`CredentialResolver`])
//! - `client` - per-call client construction ([`ClientFactory`])
//! - `api` - request types and per-resource endpoint handles
//! - `http` / `digest` - reqwest transport with Digest authentication

pub mod api;
pub mod client;
pub mod context;
pub mod credentials;
mod digest;
mod error;
pub mod http;

#[cfg(test)]
pub mod testing;

pub use api::{ApiRequest, ApiResponse, Page, Transport};
pub use client::{ClientFactory, CloudClient, Connector};
pub use context::CallContext;
pub use credentials::{CredentialResolver, Credentials};
pub use error::{CloudError, CloudResult};
pub use http::HttpConnector;
