//! Client factory.
//!
//! A [`CloudClient`] is built for every call and never cached, so calls made
//! with different credentials (for example several agent sessions sharing one
//! process) never share a transport.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::api::{BackupApi, ClusterApi, EnvironmentApi, OrganizationApi, Transport};
use super::context::CallContext;
use super::credentials::{CredentialResolver, Credentials};
use super::error::{CloudError, CloudResult};

/// Creates an authenticated [`Transport`] for resolved credentials.
pub trait Connector: Send + Sync {
    fn connect(&self, credentials: &Credentials) -> CloudResult<Arc<dyn Transport>>;
}

/// Handle bundling the transport with one sub-handle per resource area.
pub struct CloudClient {
    pub organizations: OrganizationApi,
    pub environments: EnvironmentApi,
    pub clusters: ClusterApi,
    pub backups: BackupApi,
    cancellation: CancellationToken,
}

impl CloudClient {
    /// Bundle a transport with the cancellation signal of the call.
    pub fn new(transport: Arc<dyn Transport>, cancellation: CancellationToken) -> Self {
        Self {
            organizations: OrganizationApi::new(transport.clone()),
            environments: EnvironmentApi::new(transport.clone()),
            clusters: ClusterApi::new(transport.clone()),
            backups: BackupApi::new(transport),
            cancellation,
        }
    }

    /// Drive an upstream operation, abandoning it when the call is cancelled.
    pub async fn run<F, T>(&self, operation: F) -> CloudResult<T>
    where
        F: Future<Output = CloudResult<T>>,
    {
        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(CloudError::Cancelled),
            result = operation => result,
        }
    }
}

/// Builds a fresh [`CloudClient`] per call.
#[derive(Clone)]
pub struct ClientFactory {
    resolver: CredentialResolver,
    connector: Arc<dyn Connector>,
}

impl ClientFactory {
    pub fn new(resolver: CredentialResolver, connector: Arc<dyn Connector>) -> Self {
        Self {
            resolver,
            connector,
        }
    }

    /// Resolve credentials for the call and build a client bound to it.
    pub fn build(&self, ctx: &CallContext) -> CloudResult<CloudClient> {
        let (credentials, found) = self.resolver.resolve(ctx);
        if !found {
            return Err(CloudError::MissingCredentials);
        }

        debug!(
            api_key = %credentials.api_key,
            site = ?credentials.site,
            debug = credentials.debug,
            "Building KB Cloud client"
        );

        let transport = self.connector.connect(&credentials)?;
        Ok(CloudClient::new(transport, ctx.cancellation().clone()))
    }
}
