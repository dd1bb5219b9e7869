//! HTTP client utilities and the Web of Science Starter API transport.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::models::UpstreamPage;
use crate::sources::{PageRequest, SourceError, Transport};

/// Web of Science Starter API document search endpoint
pub const STARTER_API_URL: &str = "https://api.clarivate.com/apis/wos-starter/v1/documents";

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-ApiKey";

/// Shared HTTP client with sensible defaults
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, SourceError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP client with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| SourceError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Get the underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// [`Transport`] backed by the Starter API over HTTPS
#[derive(Debug, Clone)]
pub struct StarterApiTransport {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl StarterApiTransport {
    /// Transport against the public endpoint with default client settings
    pub fn new(api_key: impl Into<String>) -> Result<Self, SourceError> {
        Ok(Self::with_client(HttpClient::new()?, api_key))
    }

    pub fn with_client(http: HttpClient, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: STARTER_API_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point at another endpoint (mirrors, test servers)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Transport for StarterApiTransport {
    async fn fetch_page(&self, request: &PageRequest) -> Result<UpstreamPage, SourceError> {
        let params = [
            ("q", request.query.clone()),
            ("limit", request.limit.to_string()),
            ("page", request.page.to_string()),
            ("sortField", request.sort_field.clone()),
            ("db", request.database.code().to_string()),
        ];

        let response = self
            .http
            .client()
            .get(&self.base_url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&params)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to query Web of Science: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            };
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let page: UpstreamPage = serde_json::from_str(&body)?;
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_defaults_to_public_endpoint() {
        let transport = StarterApiTransport::new("key").unwrap();
        assert_eq!(transport.base_url, STARTER_API_URL);
        assert_eq!(transport.api_key, "key");
    }

    #[test]
    fn test_base_url_override() {
        let transport = StarterApiTransport::new("key")
            .unwrap()
            .base_url("http://127.0.0.1:1234/documents");
        assert_eq!(transport.base_url, "http://127.0.0.1:1234/documents");
    }
}
