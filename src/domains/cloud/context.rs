//! Per-call context.
//!
//! A [`CallContext`] is created for every incoming tool call and passed
//! explicitly down the handler chain. It carries the optional per-call
//! override values (credentials, site, debug) and the cancellation signal
//! of the request.

use std::collections::HashMap;

use tokio_util::sync::CancellationToken;

/// Override key for the API key name.
pub const API_KEY_NAME: &str = "KB_CLOUD_API_KEY_NAME";

/// Override key for the API key secret.
pub const API_KEY_SECRET: &str = "KB_CLOUD_API_KEY_SECRET";

/// Override key for the site URL.
pub const SITE: &str = "KB_CLOUD_SITE";

/// Override key for the debug flag.
pub const DEBUG: &str = "KB_CLOUD_DEBUG";

/// Context of a single tool invocation.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    overrides: HashMap<String, String>,
    cancellation: CancellationToken,
}

impl CallContext {
    /// Create a context with the given overrides and cancellation token.
    pub fn new(overrides: HashMap<String, String>, cancellation: CancellationToken) -> Self {
        Self {
            overrides,
            cancellation,
        }
    }

    /// Create a context with no overrides and a fresh cancellation token.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Build a context from the `_meta` object of an MCP request.
    ///
    /// String values are taken verbatim, booleans are rendered as
    /// `"true"`/`"false"`. Anything else is ignored.
    pub fn from_meta<'a, I>(meta: I, cancellation: CancellationToken) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a serde_json::Value)>,
    {
        let overrides = meta
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(s) => Some((key.clone(), s.clone())),
                serde_json::Value::Bool(b) => Some((key.clone(), b.to_string())),
                _ => None,
            })
            .collect();

        Self::new(overrides, cancellation)
    }

    /// Add an override value.
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Look up an override value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.overrides.get(key).map(String::as_str)
    }

    /// The cancellation signal of this call.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }
}
