//! STDIO transport implementation.
//!
//! Serves MCP over stdin/stdout until the client disconnects or the process
//! receives an interrupt or termination signal.

use rmcp::ServiceExt;
use tracing::{info, warn};

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// Line written to stderr once the server is accepting requests.
pub const READY_MESSAGE: &str = "KB Cloud MCP Server running on stdio";

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        info!("Ready - communicating via stdin/stdout");
        eprintln!("{READY_MESSAGE}");

        let cancel = service.cancellation_token();
        let shutdown = tokio::spawn(async move {
            shutdown_signal().await;
            info!("Shutting down server...");
            cancel.cancel();
        });

        let reason = service
            .waiting()
            .await
            .map_err(|e| TransportError::service(e.to_string()))?;
        shutdown.abort();

        info!(?reason, "STDIO transport finished");
        Ok(())
    }
}

/// Resolve on SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for interrupt: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
