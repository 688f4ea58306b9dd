//! Errors raised while talking to the KB Cloud API.

use thiserror::Error;

/// Result type for cloud operations.
pub type CloudResult<T> = Result<T, CloudError>;

/// Errors that can occur while building a client or calling the API.
#[derive(Debug, Error)]
pub enum CloudError {
    /// No usable credentials for this call.
    #[error("KB Cloud API credentials not found")]
    MissingCredentials,

    /// The configured site could not be turned into a base URL.
    #[error("Invalid KB Cloud site '{site}': {reason}")]
    InvalidSite { site: String, reason: String },

    /// Network or protocol failure in the HTTP client.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server's Digest challenge could not be answered.
    #[error("Digest authentication failed: {0}")]
    DigestChallenge(String),

    /// The call was cancelled before the upstream operation completed.
    #[error("Request cancelled")]
    Cancelled,
}

impl CloudError {
    /// Create an invalid site error.
    pub fn invalid_site(site: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSite {
            site: site.into(),
            reason: reason.into(),
        }
    }

    /// Create a digest challenge error.
    pub fn digest(msg: impl Into<String>) -> Self {
        Self::DigestChallenge(msg.into())
    }
}
