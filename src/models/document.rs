//! Normalized Web of Science record.

use serde::{Deserialize, Serialize};

/// A record mapped from an upstream hit into a stable shape.
///
/// String fields default to `""` and sequences to `[]` when the upstream
/// omits them; only `published_date` is nullable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDocument {
    /// Web of Science unique identifier (e.g. "WOS:000123456700001")
    pub uid: String,

    pub title: String,

    #[serde(rename = "abstract")]
    pub r#abstract: String,

    pub doi: String,

    pub pmid: String,

    /// Publication year as reported upstream
    pub year: String,

    /// First day of the publication month (ISO `YYYY-MM-DD`)
    pub published_date: Option<String>,

    /// Document types (e.g. "Article", "Review")
    pub types: Vec<String>,

    /// Author display names in upstream order
    pub authors: Vec<String>,

    /// Author keywords
    pub keywords: Vec<String>,

    /// Source (journal) title
    pub journal: String,

    pub volume: String,

    pub issue: String,

    /// Web of Science record page
    pub link: String,
}

impl NormalizedDocument {
    /// Authors joined with "; " for display
    pub fn author_line(&self) -> String {
        self.authors.join("; ")
    }

    /// DOI if present, otherwise the WoS UID
    pub fn primary_id(&self) -> &str {
        if self.doi.is_empty() {
            &self.uid
        } else {
            &self.doi
        }
    }
}

/// Builder for constructing [`NormalizedDocument`] values
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    document: NormalizedDocument,
}

impl DocumentBuilder {
    pub fn new(uid: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            document: NormalizedDocument {
                uid: uid.into(),
                title: title.into(),
                ..Default::default()
            },
        }
    }

    pub fn abstract_text(mut self, abstract_text: impl Into<String>) -> Self {
        self.document.r#abstract = abstract_text.into();
        self
    }

    pub fn doi(mut self, doi: impl Into<String>) -> Self {
        self.document.doi = doi.into();
        self
    }

    pub fn pmid(mut self, pmid: impl Into<String>) -> Self {
        self.document.pmid = pmid.into();
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.document.year = year.into();
        self
    }

    pub fn published_date(mut self, date: Option<String>) -> Self {
        self.document.published_date = date;
        self
    }

    pub fn types(mut self, types: Vec<String>) -> Self {
        self.document.types = types;
        self
    }

    pub fn authors(mut self, authors: Vec<String>) -> Self {
        self.document.authors = authors;
        self
    }

    pub fn keywords(mut self, keywords: Vec<String>) -> Self {
        self.document.keywords = keywords;
        self
    }

    /// Set journal, volume and issue from the source block
    pub fn source(
        mut self,
        journal: impl Into<String>,
        volume: impl Into<String>,
        issue: impl Into<String>,
    ) -> Self {
        self.document.journal = journal.into();
        self.document.volume = volume.into();
        self.document.issue = issue.into();
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.document.link = link.into();
        self
    }

    pub fn build(self) -> NormalizedDocument {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_builder() {
        let doc = DocumentBuilder::new("WOS:1", "Test Paper")
            .doi("10.1234/test")
            .authors(vec!["Doe, J".to_string(), "Smith, A".to_string()])
            .source("Nature", "12", "3")
            .build();

        assert_eq!(doc.title, "Test Paper");
        assert_eq!(doc.journal, "Nature");
        assert_eq!(doc.author_line(), "Doe, J; Smith, A");
        assert_eq!(doc.primary_id(), "10.1234/test");
        assert!(doc.published_date.is_none());
    }

    #[test]
    fn test_primary_id_falls_back_to_uid() {
        let doc = DocumentBuilder::new("WOS:42", "No DOI").build();
        assert_eq!(doc.primary_id(), "WOS:42");
    }

    #[test]
    fn test_abstract_field_name() {
        let doc = DocumentBuilder::new("WOS:1", "T")
            .abstract_text("Summary")
            .build();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["abstract"], "Summary");
        assert!(value["published_date"].is_null());
    }
}
