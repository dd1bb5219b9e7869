//! Web of Science search: query building, paged aggregation and
//! normalization of upstream records.
//!
//! The network sits behind the [`Transport`] trait. [`WosClient`] drives the
//! paging loop over any transport; the production one is
//! [`StarterApiTransport`](crate::utils::StarterApiTransport) and tests use
//! [`MockTransport`].
//!
//! # Example
//!
//! ```rust,no_run
//! use wos_search::models::{DocumentType, SearchRequest};
//! use wos_search::sources::WosClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WosClient::new("my-api-key")?;
//! let request = SearchRequest::new("cancer treatment")
//!     .year("2020-")
//!     .document_type(DocumentType::Review)
//!     .num_results(120);
//!
//! let result = client.search(&request).await;
//! println!("{} of {} records", result.data.len(), result.total);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod normalize;
pub mod query;
mod wos;

pub use mock::MockTransport;
pub use normalize::{normalize_document, normalize_page, published_date};
pub use query::{build_query, build_query_at, resolve_year};
pub use wos::{WosClient, MAX_PAGE_SIZE};

use async_trait::async_trait;

use crate::models::{Database, UpstreamPage};

/// Parameters of a single upstream page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Query-language string, e.g. `TS=(cancer) AND PY=(2020)`
    pub query: String,

    /// Records per page (1..=50)
    pub limit: usize,

    /// 1-based page number
    pub page: usize,

    /// Sort clause, e.g. "RS+D"
    pub sort_field: String,

    pub database: Database,
}

/// Fetches one page of results from the search endpoint.
///
/// Implementations report every failure (transport, status, body) as an
/// error; deciding whether to absorb it is up to the caller.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn fetch_page(&self, request: &PageRequest) -> Result<UpstreamPage, SourceError>;
}

/// Errors that can occur when talking to the search endpoint
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status from the API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// No API key was configured
    #[error("No Web of Science API key configured (set WOS_API_KEY or api_key in the config file)")]
    MissingApiKey,

    /// The API key was rejected
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = SourceError::Api {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        assert_eq!(err.to_string(), "API error (401): Invalid API key");
    }

    #[test]
    fn test_json_error_conversion() {
        let err: SourceError = serde_json::from_str::<UpstreamPage>("{").unwrap_err().into();
        assert!(matches!(err, SourceError::Parse(_)));
    }
}
