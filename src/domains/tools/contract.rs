//! The tool contract shared by every KB Cloud tool.
//!
//! A call goes through the same steps for every tool:
//!
//! 1. extract and validate parameters (failure: soft error result),
//! 2. build a client for the call (failure: hard error),
//! 3. invoke exactly one upstream operation, racing the call's cancellation
//!    (failure: hard error),
//! 4. map the response: non-2xx bodies become a soft error prefixed with the
//!    operation, 2xx bodies are re-serialized as compact JSON text.
//!
//! Tools only describe themselves and their upstream call through
//! [`CloudTool`]; [`execute`] runs the steps.

use std::sync::Arc;

use futures::FutureExt;
use serde_json::value::RawValue;
use futures::future::BoxFuture;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Content, Tool},
};
use tracing::{debug, error, instrument, warn};

use super::error::ToolError;
use super::params::{Arguments, ParamSpec, input_schema};
use crate::domains::cloud::{ApiResponse, CallContext, ClientFactory, CloudClient, CloudResult};
use crate::domains::translations::Translator;

/// A tool backed by a single KB Cloud API operation.
pub trait CloudTool: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Default tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Operation name used in error messages, e.g. `"get backup"`.
    const ACTION: &'static str;

    /// Validated parameters.
    type Params: Send + 'static;

    /// Ordered parameter declarations.
    fn parameters() -> Vec<ParamSpec>;

    /// Extract and validate parameters from the call arguments.
    fn extract(args: &Arguments) -> Result<Self::Params, ToolError>;

    /// Invoke the upstream operation.
    fn invoke(client: &CloudClient, params: Self::Params) -> BoxFuture<'_, CloudResult<ApiResponse>>;
}

/// Translation key of a tool description.
pub fn description_key(tool_name: &str) -> String {
    format!("TOOL_{}_DESCRIPTION", tool_name)
}

/// Create the Tool model (metadata) of a tool.
pub fn to_tool<T: CloudTool>(translator: &Translator) -> Tool {
    let description = translator.lookup(&description_key(T::NAME), T::DESCRIPTION);

    Tool {
        name: T::NAME.into(),
        description: Some(description.into()),
        input_schema: Arc::new(input_schema(T::NAME, &T::parameters(), translator)),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Run a tool call.
///
/// `Ok` carries both successes and soft errors; `Err` is always a hard error.
#[instrument(skip_all, fields(tool = T::NAME))]
pub async fn execute<T: CloudTool>(
    factory: &ClientFactory,
    ctx: &CallContext,
    args: &Arguments,
) -> Result<CallToolResult, ToolError> {
    let params = match T::extract(args) {
        Ok(params) => params,
        Err(e) => {
            debug!("Rejected parameters: {}", e);
            return Ok(CallToolResult::error(vec![Content::text(e.to_string())]));
        }
    };

    let client = factory.build(ctx).map_err(|e| {
        warn!("Failed to get KB Cloud client: {}", e);
        ToolError::Client(e)
    })?;

    let response = client
        .run(T::invoke(&client, params))
        .await
        .map_err(|source| {
            warn!("Failed to {}: {}", T::ACTION, source);
            ToolError::Upstream {
                action: T::ACTION,
                source,
            }
        })?;

    if !response.is_success() {
        warn!(status = response.status, "Upstream rejected {}", T::ACTION);
        return Ok(CallToolResult::error(vec![Content::text(format!(
            "failed to {}: {}",
            T::ACTION,
            response.body
        ))]));
    }

    let text = canonical_json(&response.body).inspect_err(|e| error!("{}", e))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Validate an upstream payload and emit it as compact JSON. An empty body is `null`.
///
/// Numbers and strings are copied verbatim, so precision and formatting survive.
pub fn canonical_json(body: &str) -> Result<String, ToolError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok("null".to_string());
    }
    let raw: Box<RawValue> = serde_json::from_str(body)?;
    Ok(compact(raw.get()))
}

/// Drop insignificant whitespace from valid JSON text.
fn compact(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in json.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
            out.push(c);
        } else if !matches!(c, ' ' | '\t' | '\n' | '\r') {
            out.push(c);
        }
    }
    out
}

/// Create a ToolRoute for the rmcp router.
///
/// Per-call overrides are read from the request `_meta` object and the
/// request's cancellation token is carried into the upstream call.
pub fn create_route<S, T>(factory: Arc<ClientFactory>, translator: &Translator) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
    T: CloudTool,
{
    ToolRoute::new_dyn(to_tool::<T>(translator), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let call_ctx = CallContext::from_meta(
            ctx.request_context.meta.iter(),
            ctx.request_context.ct.clone(),
        );
        let factory = factory.clone();
        async move {
            execute::<T>(&factory, &call_ctx, &args)
                .await
                .map_err(McpError::from)
        }
        .boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_json_preserves_key_order() {
        let body = r#"{ "name": "acme",  "id": "org-1" }"#;
        assert_eq!(canonical_json(body).unwrap(), r#"{"name":"acme","id":"org-1"}"#);
    }

    #[test]
    fn test_canonical_json_keeps_numbers_verbatim() {
        let body = r#"{ "size": 1.50, "big": 123456789012345678901234, "exp": 1E3 }"#;
        assert_eq!(
            canonical_json(body).unwrap(),
            r#"{"size":1.50,"big":123456789012345678901234,"exp":1E3}"#
        );
    }

    #[test]
    fn test_canonical_json_keeps_string_whitespace() {
        let body = "[ \"a  b\", \"quote \\\" inside\" ,\n {\"k\" : \"\\\\\"} ]";
        assert_eq!(
            canonical_json(body).unwrap(),
            "[\"a  b\",\"quote \\\" inside\",{\"k\":\"\\\\\"}]"
        );
    }

    #[test]
    fn test_canonical_json_empty_body() {
        assert_eq!(canonical_json("").unwrap(), "null");
        assert_eq!(canonical_json("  \n").unwrap(), "null");
    }

    #[test]
    fn test_canonical_json_invalid_is_hard_error() {
        let err = canonical_json("<html>").unwrap_err();
        assert!(!err.is_soft());
        assert!(matches!(err, ToolError::Serialization(_)));
    }
}
