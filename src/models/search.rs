//! Search request and result models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::NormalizedDocument;

/// Default sort: relevance, descending
pub const DEFAULT_SORT_FIELD: &str = "RS+D";

/// Errors raised while turning caller input into a [`SearchRequest`].
///
/// These are configuration errors: they surface before any network call and
/// are never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid query type: {0} (expected one of TS, TI, AU, DO, IS, PMID)")]
    InvalidQueryType(String),

    #[error("Invalid document type: {0} (expected All, Article or Review)")]
    InvalidDocumentType(String),

    #[error("Invalid database: {0}")]
    InvalidDatabase(String),
}

/// Field a query is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryType {
    /// Topic: title, abstract, author keywords, keywords plus
    #[default]
    Ts,
    /// Title
    Ti,
    /// Author
    Au,
    /// DOI
    Do,
    /// ISSN
    Is,
    /// PubMed ID
    Pmid,
}

impl QueryType {
    pub const ALL: [QueryType; 6] = [
        QueryType::Ts,
        QueryType::Ti,
        QueryType::Au,
        QueryType::Do,
        QueryType::Is,
        QueryType::Pmid,
    ];

    /// The field tag used in the upstream query language
    pub fn code(&self) -> &'static str {
        match self {
            QueryType::Ts => "TS",
            QueryType::Ti => "TI",
            QueryType::Au => "AU",
            QueryType::Do => "DO",
            QueryType::Is => "IS",
            QueryType::Pmid => "PMID",
        }
    }
}

impl FromStr for QueryType {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryType::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| RequestError::InvalidQueryType(s.to_string()))
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Document type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentType {
    /// No filter
    #[default]
    All,
    Article,
    Review,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::All => "All",
            DocumentType::Article => "Article",
            DocumentType::Review => "Review",
        }
    }
}

impl FromStr for DocumentType {
    type Err = RequestError;

    /// An empty string means "no filter", same as `All`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "All" => Ok(DocumentType::All),
            "Article" => Ok(DocumentType::Article),
            "Review" => Ok(DocumentType::Review),
            other => Err(RequestError::InvalidDocumentType(other.to_string())),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Web of Science database to search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Database {
    Bci,
    Bioabs,
    Biosis,
    Ccc,
    Diidw,
    Drci,
    Medline,
    Pprn,
    /// All databases
    #[default]
    Wok,
    /// Web of Science Core Collection
    Wos,
    Zoorec,
}

impl Database {
    pub const ALL: [Database; 11] = [
        Database::Bci,
        Database::Bioabs,
        Database::Biosis,
        Database::Ccc,
        Database::Diidw,
        Database::Drci,
        Database::Medline,
        Database::Pprn,
        Database::Wok,
        Database::Wos,
        Database::Zoorec,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Database::Bci => "BCI",
            Database::Bioabs => "BIOABS",
            Database::Biosis => "BIOSIS",
            Database::Ccc => "CCC",
            Database::Diidw => "DIIDW",
            Database::Drci => "DRCI",
            Database::Medline => "MEDLINE",
            Database::Pprn => "PPRN",
            Database::Wok => "WOK",
            Database::Wos => "WOS",
            Database::Zoorec => "ZOOREC",
        }
    }
}

impl FromStr for Database {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Database::ALL
            .into_iter()
            .find(|db| db.code() == s)
            .ok_or_else(|| RequestError::InvalidDatabase(s.to_string()))
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A search against Web of Science
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Raw free text or phrase
    pub query: String,

    /// Field the query targets
    pub query_type: QueryType,

    /// Year filter: "2020", "2018-2020", "2010-" (until this year) or "-2015" (since 1900)
    pub year: Option<String>,

    /// Document type filter
    pub document_type: DocumentType,

    /// Total number of records wanted across all pages
    pub num_results: usize,

    /// Sort clause(s), e.g. "PY+D" or "PY+D,TC+D"
    pub sort_field: String,

    /// Database to search
    pub database: Database,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            query_type: QueryType::default(),
            year: None,
            document_type: DocumentType::default(),
            num_results: 50,
            sort_field: DEFAULT_SORT_FIELD.to_string(),
            database: Database::default(),
        }
    }
}

impl SearchRequest {
    /// Create a new search request with defaults for everything but the text
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set the query type
    pub fn query_type(mut self, query_type: QueryType) -> Self {
        self.query_type = query_type;
        self
    }

    /// Set the year filter; blank strings clear it
    pub fn year(mut self, year: impl Into<String>) -> Self {
        let year = year.into();
        self.year = if year.trim().is_empty() {
            None
        } else {
            Some(year.trim().to_string())
        };
        self
    }

    /// Set the document type filter
    pub fn document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = document_type;
        self
    }

    /// Set the number of records wanted
    pub fn num_results(mut self, num_results: usize) -> Self {
        self.num_results = num_results;
        self
    }

    /// Set the sort clause
    pub fn sort_field(mut self, sort_field: impl Into<String>) -> Self {
        self.sort_field = sort_field.into();
        self
    }

    /// Set the database
    pub fn database(mut self, database: Database) -> Self {
        self.database = database;
        self
    }
}

/// Aggregated result of a paged search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Grand total reported by the first page
    pub total: u64,

    /// Records in upstream order, pages concatenated in fetch order
    pub data: Vec<NormalizedDocument>,

    /// Set when a later page failed and aggregation stopped early
    #[serde(default)]
    pub partial: bool,
}

impl SearchResult {
    /// A result with no matches
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_type_parse() {
        for code in ["TS", "TI", "AU", "DO", "IS", "PMID"] {
            let parsed: QueryType = code.parse().unwrap();
            assert_eq!(parsed.code(), code);
        }
    }

    #[test]
    fn test_query_type_rejects_unknown() {
        assert_eq!(
            "XX".parse::<QueryType>(),
            Err(RequestError::InvalidQueryType("XX".to_string()))
        );
        // codes are case-sensitive
        assert!("ts".parse::<QueryType>().is_err());
    }

    #[test]
    fn test_document_type_parse() {
        assert_eq!("All".parse::<DocumentType>(), Ok(DocumentType::All));
        assert_eq!("".parse::<DocumentType>(), Ok(DocumentType::All));
        assert_eq!("Article".parse::<DocumentType>(), Ok(DocumentType::Article));
        assert_eq!("Review".parse::<DocumentType>(), Ok(DocumentType::Review));
        assert_eq!(
            "Foo".parse::<DocumentType>(),
            Err(RequestError::InvalidDocumentType("Foo".to_string()))
        );
    }

    #[test]
    fn test_database_parse() {
        assert_eq!("WOS".parse::<Database>(), Ok(Database::Wos));
        assert_eq!("MEDLINE".parse::<Database>(), Ok(Database::Medline));
        assert!("SCOPUS".parse::<Database>().is_err());
    }

    #[test]
    fn test_request_defaults() {
        let request = SearchRequest::new("cancer");
        assert_eq!(request.query_type, QueryType::Ts);
        assert_eq!(request.document_type, DocumentType::All);
        assert_eq!(request.num_results, 50);
        assert_eq!(request.sort_field, "RS+D");
        assert_eq!(request.database, Database::Wok);
        assert!(request.year.is_none());
    }

    #[test]
    fn test_blank_year_clears_filter() {
        let request = SearchRequest::new("cancer").year("2020").year("  ");
        assert!(request.year.is_none());
    }

    #[test]
    fn test_result_serializes_total_and_data() {
        let value = serde_json::to_value(SearchResult::empty()).unwrap();
        assert_eq!(value["total"], 0);
        assert!(value["data"].as_array().unwrap().is_empty());
        assert_eq!(value["partial"], false);
    }
}
