//! Paged search against the Web of Science Starter API.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::models::{
    Database, NormalizedDocument, SearchRequest, SearchResult, UpstreamPage, DEFAULT_SORT_FIELD,
};
use crate::sources::{build_query, normalize_page, PageRequest, SourceError, Transport};
use crate::utils::{HttpClient, Pacer, StarterApiTransport, TokioPacer};

/// Largest page the API serves
pub const MAX_PAGE_SIZE: usize = 50;

/// Pause between pages when none is configured
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(10);

/// Web of Science search client
///
/// Fetches pages sequentially, pausing between them, and concatenates the
/// normalized records until the requested count or the upstream total is
/// reached. Upstream failures never surface as errors from [`search`]: a
/// failed page counts as an empty one and ends the aggregation.
///
/// [`search`]: WosClient::search
#[derive(Debug, Clone)]
pub struct WosClient {
    transport: Arc<dyn Transport>,
    pacer: Arc<dyn Pacer>,
    page_delay: Duration,
}

impl WosClient {
    /// Client for the public Starter API endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self, SourceError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SourceError::MissingApiKey);
        }
        Ok(Self::with_transport(Arc::new(StarterApiTransport::new(
            api_key,
        )?)))
    }

    /// Client built from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(SourceError::MissingApiKey)?;

        let http = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;
        let transport =
            StarterApiTransport::with_client(http, api_key).base_url(config.base_url.clone());

        Ok(Self::with_transport(Arc::new(transport))
            .page_delay(Duration::from_secs(config.page_delay_secs)))
    }

    /// Client over an arbitrary transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            pacer: Arc::new(TokioPacer),
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    /// Replace the pacer used between pages
    pub fn pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Set the pause between pages
    pub fn page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    async fn fetch(&self, request: &PageRequest) -> Option<UpstreamPage> {
        tracing::debug!(
            query = %request.query,
            page = request.page,
            limit = request.limit,
            db = %request.database,
            "Fetching Web of Science page"
        );

        match self.transport.fetch_page(request).await {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::warn!(page = request.page, "Web of Science page failed: {}", e);
                None
            }
        }
    }

    /// Fetch and normalize a single page.
    ///
    /// Returns `(total, records)`; any failure yields `(0, [])`, as does a
    /// zero `limit`, which makes no request at all.
    pub async fn query_once(
        &self,
        query: &str,
        limit: usize,
        page: usize,
        sort_field: &str,
        database: Database,
    ) -> (u64, Vec<NormalizedDocument>) {
        if limit == 0 {
            return (0, Vec::new());
        }

        let request = PageRequest {
            query: query.to_string(),
            limit,
            page,
            sort_field: sort_field.to_string(),
            database,
        };

        match self.fetch(&request).await {
            Some(page) => (page.total(), normalize_page(&page)),
            None => (0, Vec::new()),
        }
    }

    /// Run a search, paging until `num_results` records (or the upstream
    /// total, whichever is smaller) have been requested.
    pub async fn search(&self, request: &SearchRequest) -> SearchResult {
        let query = build_query(request);
        let mut page = 1;
        let mut limit = request.num_results.min(MAX_PAGE_SIZE);

        let (total, data) = self
            .query_once(&query, limit, page, &request.sort_field, request.database)
            .await;

        if total == 0 {
            tracing::debug!(query = %query, "No Web of Science results");
            return SearchResult::empty();
        }

        let mut result = SearchResult {
            total,
            data,
            partial: false,
        };

        // Counted in requested slots so dropped records never cost extra pages.
        let target = request
            .num_results
            .min(usize::try_from(total).unwrap_or(usize::MAX));
        let mut requested = limit;

        while requested < target {
            limit = (target - requested).min(MAX_PAGE_SIZE);
            page += 1;

            self.pacer.pause(self.page_delay).await;

            let (page_total, data) = self
                .query_once(&query, limit, page, &request.sort_field, request.database)
                .await;

            if page_total == 0 {
                tracing::warn!(
                    page,
                    collected = result.len(),
                    "Stopping early, returning records collected so far"
                );
                result.partial = true;
                break;
            }

            result.data.extend(data);
            requested += limit;
        }

        tracing::info!(
            total = result.total,
            returned = result.len(),
            pages = page,
            "Web of Science search complete"
        );

        result
    }

    /// Check the API key with one minimal query.
    ///
    /// Unlike [`search`](WosClient::search), every failure is reported, as
    /// [`SourceError::InvalidCredentials`] carrying the upstream message.
    pub async fn validate_credentials(&self) -> Result<(), SourceError> {
        let request = PageRequest {
            query: build_query(&SearchRequest::new("test")),
            limit: 1,
            page: 1,
            sort_field: DEFAULT_SORT_FIELD.to_string(),
            database: Database::Wos,
        };

        match self.transport.fetch_page(&request).await {
            Ok(_) => Ok(()),
            Err(SourceError::InvalidCredentials(message)) => {
                Err(SourceError::InvalidCredentials(message))
            }
            Err(e) => Err(SourceError::InvalidCredentials(e.to_string())),
        }
    }
}
