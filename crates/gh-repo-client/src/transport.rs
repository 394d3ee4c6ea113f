//! HTTP transport seam
//!
//! The client talks to the API through the `ApiTransport` trait so tests
//! can substitute a mock that records requests and serves canned bodies.
//! `HttpTransport` is the real implementation on top of reqwest's
//! blocking client.

use crate::config::RepoConfig;
use crate::error::RequestError;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

/// Raw outcome of one GET request
///
/// Error statuses are returned, not raised, so the caller can surface
/// the response body as the error detail.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

/// Outbound GET transport
///
/// Implementations perform the request and hand back status plus body.
/// They must not fail on error statuses; only transport-level problems
/// (connection failures and the like) produce an `Err`.
pub trait ApiTransport {
    /// Execute a GET against `url`
    fn execute(&self, url: &str) -> Result<ApiResponse, RequestError>;
}

/// Blocking reqwest transport
///
/// Configured once from a `RepoConfig`: the user agent and the
/// `Content-Type: application/json` header are baked into the client,
/// and every request sends HTTP Basic auth from the client credentials.
/// TLS peer and hostname verification are left at reqwest's defaults
/// (on) and are never disabled.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    client_id: String,
    client_secret: String,
}

impl HttpTransport {
    /// Build a transport for the given repository configuration
    ///
    /// Fails with a transport-initialization `RequestError` if the
    /// underlying client cannot be constructed.
    pub fn new(config: &RepoConfig) -> Result<Self, RequestError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|err| {
                RequestError::transport(format!("failed to initialize HTTP client: {}", err))
            })?;

        Ok(Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }
}

impl ApiTransport for HttpTransport {
    fn execute(&self, url: &str) -> Result<ApiResponse, RequestError> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .send()
            .map_err(|err| {
                RequestError::transport(format!("request to {} failed: {}", url, err))
            })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|err| {
            RequestError::transport(format!("failed to read response from {}: {}", url, err))
        })?;

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_builds_from_config() {
        let config = RepoConfig::new("octocat", "hello-world").with_credentials("id", "secret");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.client_id, "id");
        assert_eq!(transport.client_secret, "secret");
    }
}
