//! reqwest-backed transport for the KB Cloud API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use reqwest::{Response, StatusCode, Url};
use tracing::{debug, info, instrument};

use super::api::{API_PREFIX, ApiRequest, ApiResponse, Transport};
use super::client::Connector;
use super::credentials::Credentials;
use super::digest::{DigestChallenge, generate_cnonce};
use super::error::{CloudError, CloudResult};

/// Site used when none is configured.
pub const DEFAULT_SITE: &str = "https://api.apecloud.com";

const USER_AGENT: &str = concat!("kb-cloud-mcp-server/", env!("CARGO_PKG_VERSION"));

/// Turn a configured site into a base URL.
///
/// A bare host gets an `https://` scheme; `None` selects [`DEFAULT_SITE`].
pub fn base_url(site: Option<&str>) -> CloudResult<Url> {
    let site = site.unwrap_or(DEFAULT_SITE).trim().trim_end_matches('/');
    let raw = if site.contains("://") {
        site.to_string()
    } else {
        format!("https://{site}")
    };

    let url = Url::parse(&raw).map_err(|e| CloudError::invalid_site(site, e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(CloudError::invalid_site(site, "not a hierarchical URL"));
    }
    Ok(url)
}

/// Connector producing a fresh HTTP client per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpConnector;

impl Connector for HttpConnector {
    fn connect(&self, credentials: &Credentials) -> CloudResult<Arc<dyn Transport>> {
        let base_url = base_url(credentials.site.as_deref())?;
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Arc::new(HttpTransport {
            client,
            base_url,
            username: credentials.api_key.clone(),
            password: credentials.api_secret.clone(),
            debug: credentials.debug,
        }))
    }
}

/// HTTP transport answering Digest challenges with the call's credentials.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    username: String,
    password: String,
    debug: bool,
}

impl HttpTransport {
    fn url_for(&self, request: &ApiRequest) -> CloudResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| CloudError::invalid_site(self.base_url.as_str(), "cannot be a base"))?;
            segments.pop_if_empty();
            segments.extend(API_PREFIX);
            segments.extend(&request.segments);
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }

    fn authorize(&self, challenge: &str, url: &Url) -> CloudResult<String> {
        let challenge = DigestChallenge::parse(challenge)?;
        let uri = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        Ok(challenge.authorization(
            &self.username,
            &self.password,
            "GET",
            &uri,
            1,
            &generate_cnonce(),
        ))
    }
}

/// The Digest challenge of a 401 response, if any.
fn digest_challenge(response: &Response) -> Option<String> {
    if response.status() != StatusCode::UNAUTHORIZED {
        return None;
    }
    response
        .headers()
        .get_all(WWW_AUTHENTICATE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| {
            value
                .trim_start()
                .get(..6)
                .is_some_and(|scheme| scheme.eq_ignore_ascii_case("digest"))
        })
        .map(str::to_string)
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip_all, fields(path = %request.path()))]
    async fn execute(&self, request: ApiRequest) -> CloudResult<ApiResponse> {
        let url = self.url_for(&request)?;

        let mut response = self.client.get(url.clone()).send().await?;
        if let Some(challenge) = digest_challenge(&response) {
            debug!("Answering Digest challenge");
            let authorization = self.authorize(&challenge, &url)?;
            response = self
                .client
                .get(url.clone())
                .header(AUTHORIZATION, authorization)
                .send()
                .await?;
        }

        let status = response.status().as_u16();
        let body = response.text().await?;

        if self.debug {
            info!(method = "GET", %url, status, bytes = body.len(), "KB Cloud API response");
        }

        Ok(ApiResponse { status, body })
    }
}
