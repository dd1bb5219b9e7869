//! Core data models for Web of Science search operations.

mod document;
mod raw;
mod search;

pub use document::{DocumentBuilder, NormalizedDocument};
pub use raw::{PageMetadata, RawDocument, TypesField, UpstreamPage};
pub use search::{
    Database, DocumentType, QueryType, RequestError, SearchRequest, SearchResult,
    DEFAULT_SORT_FIELD,
};
