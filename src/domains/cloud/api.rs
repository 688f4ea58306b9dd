//! Upstream request/response types and the per-resource API handles.
//!
//! Each resource area of the KB Cloud API has a small handle that turns
//! typed arguments into an [`ApiRequest`] and sends it through the
//! [`Transport`] bound to the client. The handles never interpret the
//! response; status handling is left to the tool layer.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::CloudResult;

/// API version prefix for every request path.
pub const API_PREFIX: [&str; 2] = ["api", "v1"];

/// An upstream request, independent of the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Path segments below `/api/v1`, unencoded.
    pub segments: Vec<String>,
    /// Query pairs, unencoded.
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    /// Create a GET request for the given path segments.
    pub fn get<I, T>(segments: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
        }
    }

    /// Append a query pair.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append pagination query pairs for the values that are set.
    pub fn paginate(mut self, page: Page) -> Self {
        if let Some(page_number) = page.page {
            self = self.query("page", page_number.to_string());
        }
        if let Some(per_page) = page.per_page {
            self = self.query("pageSize", per_page.to_string());
        }
        self
    }

    /// The request path, e.g. `/api/v1/organizations/acme`.
    pub fn path(&self) -> String {
        let mut path = String::new();
        for segment in API_PREFIX.iter().copied().chain(self.segments.iter().map(String::as_str)) {
            path.push('/');
            path.push_str(segment);
        }
        path
    }
}

/// Raw upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Pagination values forwarded to list operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Sends [`ApiRequest`]s to the upstream API.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> CloudResult<ApiResponse>;
}

/// Organization endpoints.
pub struct OrganizationApi {
    transport: Arc<dyn Transport>,
}

impl OrganizationApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self, page: Page) -> CloudResult<ApiResponse> {
        self.transport
            .execute(ApiRequest::get(["organizations"]).paginate(page))
            .await
    }

    pub async fn get(&self, org_name: &str) -> CloudResult<ApiResponse> {
        self.transport
            .execute(ApiRequest::get(["organizations", org_name]))
            .await
    }
}

/// Environment endpoints.
pub struct EnvironmentApi {
    transport: Arc<dyn Transport>,
}

impl EnvironmentApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self, org_name: &str, page: Page) -> CloudResult<ApiResponse> {
        self.transport
            .execute(ApiRequest::get(["organizations", org_name, "environments"]).paginate(page))
            .await
    }

    pub async fn get(&self, org_name: &str, env_name: &str) -> CloudResult<ApiResponse> {
        self.transport
            .execute(ApiRequest::get([
                "organizations",
                org_name,
                "environments",
                env_name,
            ]))
            .await
    }
}

/// Instance endpoints. Instances are called clusters by the API.
pub struct ClusterApi {
    transport: Arc<dyn Transport>,
}

impl ClusterApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self, org_name: &str, env_name: &str, page: Page) -> CloudResult<ApiResponse> {
        let request = ApiRequest::get(["organizations", org_name, "clusters"])
            .query("environmentName", env_name)
            .paginate(page);
        self.transport.execute(request).await
    }

    pub async fn get(
        &self,
        org_name: &str,
        env_name: &str,
        cluster_name: &str,
    ) -> CloudResult<ApiResponse> {
        let request = ApiRequest::get(["organizations", org_name, "clusters", cluster_name])
            .query("environmentName", env_name);
        self.transport.execute(request).await
    }
}

/// Backup endpoints.
pub struct BackupApi {
    transport: Arc<dyn Transport>,
}

impl BackupApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn list(
        &self,
        org_name: &str,
        env_name: &str,
        cluster_name: &str,
        page: Page,
    ) -> CloudResult<ApiResponse> {
        let request = ApiRequest::get(["organizations", org_name, "backups"])
            .query("environmentName", env_name)
            .query("clusterName", cluster_name)
            .paginate(page);
        self.transport.execute(request).await
    }

    pub async fn get(&self, org_name: &str, backup_id: &str) -> CloudResult<ApiResponse> {
        self.transport
            .execute(ApiRequest::get(["organizations", org_name, "backups", backup_id]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_path() {
        let request = ApiRequest::get(["organizations", "acme", "environments"]);
        assert_eq!(request.path(), "/api/v1/organizations/acme/environments");
    }

    #[test]
    fn test_paginate_only_set_values() {
        let request = ApiRequest::get(["organizations"]).paginate(Page {
            page: Some(2),
            per_page: None,
        });
        assert_eq!(request.query, vec![("page".to_string(), "2".to_string())]);

        let request = ApiRequest::get(["organizations"]).paginate(Page::default());
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_response_success_range() {
        let ok = ApiResponse {
            status: 204,
            body: String::new(),
        };
        let missing = ApiResponse {
            status: 404,
            body: "not found".to_string(),
        };
        assert!(ok.is_success());
        assert!(!missing.is_success());
    }
}
