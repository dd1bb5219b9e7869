//! # WoS Search
//!
//! A Web of Science search client and Model Context Protocol (MCP) server.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (SearchRequest, NormalizedDocument, etc.)
//! - [`sources`]: Query building, paged aggregation and response normalization
//! - [`mcp`]: MCP tool registry and server
//! - [`utils`]: HTTP transport, inter-page pacing and display helpers
//! - [`config`]: Configuration management

pub mod config;
pub mod mcp;
pub mod models;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{NormalizedDocument, SearchRequest, SearchResult};
pub use sources::{SourceError, Transport, WosClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
