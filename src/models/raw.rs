//! Tolerant view over Web of Science Starter API payloads.
//!
//! Only the page skeleton (`metadata.total`) is decoded rigidly. Each hit is
//! kept as raw JSON and read through accessors that return `None` or an empty
//! value on a missing key or an unexpected shape, so one odd record never
//! fails the whole page.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One page of upstream results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpstreamPage {
    pub metadata: PageMetadata,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub hits: Vec<RawDocument>,
}

/// Page metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Grand total matching the query
    pub total: u64,
}

impl UpstreamPage {
    pub fn new(total: u64, hits: Vec<RawDocument>) -> Self {
        Self {
            metadata: PageMetadata { total },
            hits,
        }
    }

    pub fn total(&self) -> u64 {
        self.metadata.total
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RawDocument>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RawDocument>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Shape of the `types` field, which upstream sends inconsistently
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypesField {
    /// Comma-delimited string, e.g. "Article,Review"
    Delimited(String),
    /// Already a list
    List(Vec<String>),
    /// Missing, null or some other shape
    Absent,
}

impl TypesField {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            TypesField::Delimited(s) => s
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
            TypesField::List(types) => types,
            TypesField::Absent => Vec::new(),
        }
    }
}

/// A single upstream hit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawDocument(Value);

impl From<Value> for RawDocument {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl RawDocument {
    /// Walk nested objects by key
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(&self.0, |value, key| value.get(key))
    }

    /// Scalar at `path` as text; numbers are stringified
    pub fn text(&self, path: &[&str]) -> Option<String> {
        match self.get(path)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// The `identifiers` block, if present and non-empty
    pub fn identifiers(&self) -> Option<&Map<String, Value>> {
        self.get(&["identifiers"])
            .and_then(Value::as_object)
            .filter(|ids| !ids.is_empty())
    }

    pub fn uid(&self) -> Option<String> {
        self.text(&["uid"])
    }

    pub fn publish_year(&self) -> Option<String> {
        self.text(&["source", "publishYear"])
    }

    pub fn publish_month(&self) -> Option<String> {
        self.text(&["source", "publishMonth"])
    }

    pub fn types(&self) -> TypesField {
        match self.get(&["types"]) {
            Some(Value::String(s)) => TypesField::Delimited(s.clone()),
            Some(Value::Array(items)) => TypesField::List(string_items(items)),
            _ => TypesField::Absent,
        }
    }

    /// `names.authors[*].displayName`, skipping entries without one
    pub fn author_names(&self) -> Vec<String> {
        self.get(&["names", "authors"])
            .and_then(Value::as_array)
            .map(|authors| {
                authors
                    .iter()
                    .filter_map(|a| a.get("displayName").and_then(Value::as_str))
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn author_keywords(&self) -> Vec<String> {
        self.get(&["keywords", "authorKeywords"])
            .and_then(Value::as_array)
            .map(|items| string_items(items))
            .unwrap_or_default()
    }
}

fn string_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_decode_requires_total() {
        let page: UpstreamPage =
            serde_json::from_value(json!({"metadata": {"total": 7, "page": 1}, "hits": []}))
                .unwrap();
        assert_eq!(page.total(), 7);

        let missing = serde_json::from_value::<UpstreamPage>(json!({"hits": []}));
        assert!(missing.is_err());
    }

    #[test]
    fn test_page_null_hits() {
        let page: UpstreamPage =
            serde_json::from_value(json!({"metadata": {"total": 3}, "hits": null})).unwrap();
        assert!(page.hits.is_empty());

        let page: UpstreamPage =
            serde_json::from_value(json!({"metadata": {"total": 3}})).unwrap();
        assert!(page.hits.is_empty());
    }

    #[test]
    fn test_text_accepts_numbers() {
        let doc = RawDocument::from(json!({"source": {"publishYear": 2021, "volume": "12"}}));
        assert_eq!(doc.publish_year(), Some("2021".to_string()));
        assert_eq!(doc.text(&["source", "volume"]), Some("12".to_string()));
        assert_eq!(doc.text(&["source", "issue"]), None);
    }

    #[test]
    fn test_empty_identifiers_treated_as_missing() {
        let doc = RawDocument::from(json!({"identifiers": {}}));
        assert!(doc.identifiers().is_none());

        let doc = RawDocument::from(json!({"identifiers": null}));
        assert!(doc.identifiers().is_none());
    }

    #[test]
    fn test_types_shapes() {
        let doc = RawDocument::from(json!({"types": "Article,Review"}));
        assert_eq!(doc.types(), TypesField::Delimited("Article,Review".to_string()));

        let doc = RawDocument::from(json!({"types": ["Article"]}));
        assert_eq!(doc.types(), TypesField::List(vec!["Article".to_string()]));

        let doc = RawDocument::from(json!({"types": 5}));
        assert_eq!(doc.types(), TypesField::Absent);
    }

    #[test]
    fn test_author_names_skip_missing_display_name() {
        let doc = RawDocument::from(json!({
            "names": {"authors": [{"displayName": "Doe, J"}, {"wosStandard": "Smith, A"}]}
        }));
        assert_eq!(doc.author_names(), vec!["Doe, J".to_string()]);

        let doc = RawDocument::from(json!({"names": {}}));
        assert!(doc.author_names().is_empty());
    }
}
