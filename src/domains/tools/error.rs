//! Tool-specific error types.
//!
//! Parameter errors are soft: they are reported to the calling agent as a
//! tool result with `is_error` set. Everything else is a hard error and is
//! surfaced to the transport as an MCP error.

use rmcp::ErrorData as McpError;
use thiserror::Error;

use crate::domains::cloud::CloudError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A required parameter is absent or empty.
    #[error("missing required parameter: {0}")]
    MissingParameter(String),

    /// A parameter is present with the wrong JSON type.
    #[error("parameter {name} is not of type {expected}")]
    InvalidParameterType {
        name: String,
        expected: &'static str,
    },

    /// A parameter is outside its advertised range.
    #[error("parameter {name} {reason}")]
    InvalidParameterValue { name: String, reason: String },

    /// No client could be built for the call.
    #[error("failed to get KB Cloud client: {0}")]
    Client(#[source] CloudError),

    /// The upstream operation did not produce a response.
    #[error("failed to {action}: {source}")]
    Upstream {
        action: &'static str,
        #[source]
        source: CloudError,
    },

    /// The upstream payload could not be (re)serialized.
    #[error("failed to marshal response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Create a new "missing parameter" error.
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    /// Create a new "invalid parameter type" error.
    pub fn invalid_type(name: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidParameterType {
            name: name.into(),
            expected,
        }
    }

    /// Create a new "invalid parameter value" error.
    pub fn invalid_value(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameterValue {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error is reported to the agent as a tool result.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter(_)
                | Self::InvalidParameterType { .. }
                | Self::InvalidParameterValue { .. }
        )
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        if err.is_soft() {
            McpError::invalid_params(err.to_string(), None)
        } else {
            McpError::internal_error(err.to_string(), None)
        }
    }
}
