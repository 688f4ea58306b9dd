//! Credential resolution.
//!
//! Credentials are resolved fresh for every call from two tiers, first match
//! wins and the tiers are never merged:
//!
//! 1. the [`CallContext`] overrides, when both the key name and the key
//!    secret are present;
//! 2. the process-level cloud configuration (file, environment and flags,
//!    already layered by [`crate::core::config`]).
//!
//! The site and the debug flag follow the same two-tier lookup independently.

use crate::core::config::CloudConfig;

use super::context::{self, CallContext};

/// Credentials used to authenticate against the KB Cloud API.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub site: Option<String>,
    pub debug: bool,
}

impl Credentials {
    /// Whether both the key name and the key secret are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("site", &self.site)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Resolves [`Credentials`] for a call.
#[derive(Debug, Clone, Default)]
pub struct CredentialResolver {
    fallback: CloudConfig,
}

impl CredentialResolver {
    /// Create a resolver falling back to the given process-level configuration.
    pub fn new(fallback: CloudConfig) -> Self {
        Self { fallback }
    }

    /// Resolve credentials for a call.
    ///
    /// Returns the credentials and whether they are usable (both key name and
    /// secret non-empty). Absent credentials are not an error here.
    pub fn resolve(&self, ctx: &CallContext) -> (Credentials, bool) {
        let (api_key, api_secret) = match (
            ctx.get(context::API_KEY_NAME),
            ctx.get(context::API_KEY_SECRET),
        ) {
            (Some(key), Some(secret)) => (key.to_string(), secret.to_string()),
            _ => (
                self.fallback.api_key.clone().unwrap_or_default(),
                self.fallback.api_secret.clone().unwrap_or_default(),
            ),
        };

        let site = ctx
            .get(context::SITE)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| self.fallback.site.clone().filter(|s| !s.is_empty()));

        let debug = match ctx.get(context::DEBUG) {
            Some(value) => is_truthy(value),
            None => self.fallback.debug,
        };

        let credentials = Credentials {
            api_key,
            api_secret,
            site,
            debug,
        };
        let found = credentials.is_complete();

        (credentials, found)
    }
}

/// Interpret a flag value; only `"true"` and `"1"` mean true.
pub fn is_truthy(value: &str) -> bool {
    value == "true" || value == "1"
}
