//! Utility modules supporting search operations.
//!
//! - [`HttpClient`]: shared reqwest client with sensible timeouts
//! - [`StarterApiTransport`]: the Web of Science Starter API over HTTPS
//! - [`Pacer`]: the pause between page requests ([`TokioPacer`], [`NoopPacer`], [`RecordingPacer`])
//! - [`documents_table`]: render records as a terminal table
//!
//! # Custom endpoint
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wos_search::sources::WosClient;
//! use wos_search::utils::{NoopPacer, StarterApiTransport};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = StarterApiTransport::new("my-api-key")?
//!     .base_url("http://localhost:8080/documents");
//! let client = WosClient::with_transport(Arc::new(transport)).pacer(Arc::new(NoopPacer));
//! # Ok(())
//! # }
//! ```

mod display;
mod http;
mod pacing;

pub use display::{documents_table, truncate_with_ellipsis};
pub use http::{HttpClient, StarterApiTransport, API_KEY_HEADER, STARTER_API_URL};
pub use pacing::{NoopPacer, Pacer, RecordingPacer, TokioPacer};
