//! Mock transport for testing purposes.

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::{RawDocument, UpstreamPage};
use crate::sources::{PageRequest, SourceError, Transport};

/// A scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    Page(UpstreamPage),
    Failure(String),
}

/// A transport that replays scripted pages and records every request.
///
/// Scripted replies are consumed first. After that, a transport built with
/// [`MockTransport::with_total`] answers each request with exactly `limit`
/// generated hits, numbered consecutively across calls; otherwise it fails.
#[derive(Debug, Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<MockReply>>,
    fallback_total: Option<u64>,
    generated: AtomicUsize,
    requests: Mutex<Vec<PageRequest>>,
}

impl MockTransport {
    /// Create a new mock transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Always report `total` and return a full page of generated hits.
    pub fn with_total(total: u64) -> Self {
        Self {
            fallback_total: Some(total),
            ..Default::default()
        }
    }

    /// Queue a page to return.
    pub fn push_page(&self, page: UpstreamPage) {
        self.push(MockReply::Page(page));
    }

    /// Queue a transport failure.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.push(MockReply::Failure(message.into()));
    }

    fn push(&self, reply: MockReply) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(reply);
        }
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Page limits requested so far, in order
    pub fn limits(&self) -> Vec<usize> {
        self.requests().iter().map(|r| r.limit).collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn fetch_page(&self, request: &PageRequest) -> Result<UpstreamPage, SourceError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let scripted = self.script.lock().ok().and_then(|mut s| s.pop_front());
        match (scripted, self.fallback_total) {
            (Some(MockReply::Page(page)), _) => Ok(page),
            (Some(MockReply::Failure(message)), _) => Err(SourceError::Network(message)),
            (None, Some(total)) => {
                let offset = self.generated.fetch_add(request.limit, Ordering::SeqCst);
                let hits = (0..request.limit)
                    .map(|i| make_raw_document(offset + i))
                    .collect();
                Ok(UpstreamPage::new(total, hits))
            }
            (None, None) => Err(SourceError::Network("no scripted reply".to_string())),
        }
    }
}

/// Helper function to create a minimal upstream hit for testing.
pub fn make_raw_document(n: usize) -> RawDocument {
    RawDocument::from(json!({
        "uid": format!("WOS:{:015}", n),
        "title": format!("Document {}", n),
        "identifiers": {"doi": format!("10.0000/mock.{}", n)},
        "source": {"sourceTitle": "MOCK JOURNAL", "publishYear": 2021, "publishMonth": "JAN"},
        "types": ["Article"],
        "names": {"authors": [{"displayName": "Mock, A"}]}
    }))
}

/// Helper function to create a page of `count` hits starting at `offset`.
pub fn make_page(total: u64, offset: usize, count: usize) -> UpstreamPage {
    UpstreamPage::new(
        total,
        (offset..offset + count).map(make_raw_document).collect(),
    )
}
