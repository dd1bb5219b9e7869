//! Tool handlers.

use std::sync::Arc;

use serde_json::Value;

use super::tools::ToolHandler;
use crate::models::{Database, DocumentType, QueryType, SearchRequest, DEFAULT_SORT_FIELD};
use crate::sources::WosClient;

/// Records returned when `limit` is not given
pub const DEFAULT_LIMIT: usize = 50;

/// Non-empty string argument
fn str_arg<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Whole-number `limit`: integers, integral floats such as `10.0`, or
/// numeric strings
fn limit_arg(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        })
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Handler for the `wos_search` tool
#[derive(Debug)]
pub struct WosSearchHandler {
    pub client: Arc<WosClient>,
    pub default_database: Database,
}

impl WosSearchHandler {
    /// Turn tool arguments into a request; invalid enumerated values are
    /// rejected here, before any network call.
    pub fn parse_request(&self, args: &Value) -> Result<SearchRequest, String> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or("Missing 'query' parameter")?;

        let query_type = str_arg(args, "query_type")
            .map(str::parse::<QueryType>)
            .transpose()
            .map_err(|e| e.to_string())?
            .unwrap_or_default();

        let document_type = str_arg(args, "document_type")
            .map(str::parse::<DocumentType>)
            .transpose()
            .map_err(|e| e.to_string())?
            .unwrap_or_default();

        let database = str_arg(args, "db")
            .map(str::parse::<Database>)
            .transpose()
            .map_err(|e| e.to_string())?
            .unwrap_or(self.default_database);

        // Zero means the default; negative limits mean "nothing"
        let num_results = match args.get("limit") {
            None | Some(Value::Null) => DEFAULT_LIMIT,
            Some(v) => match limit_arg(v).ok_or("'limit' must be an integer")? {
                0 => DEFAULT_LIMIT,
                n => n.max(0) as usize,
            },
        };

        let year = match args.get("year") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };

        Ok(SearchRequest::new(query)
            .query_type(query_type)
            .year(year)
            .document_type(document_type)
            .num_results(num_results)
            .sort_field(str_arg(args, "sort").unwrap_or(DEFAULT_SORT_FIELD))
            .database(database))
    }
}

#[async_trait::async_trait]
impl ToolHandler for WosSearchHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let request = self.parse_request(&args)?;

        tracing::info!(
            query = %request.query,
            query_type = %request.query_type,
            limit = request.num_results,
            "wos_search called"
        );

        let result = self.client.search(&request).await;

        serde_json::to_value(&result).map_err(|e| format!("Failed to serialize result: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::MockTransport;
    use crate::utils::NoopPacer;
    use serde_json::json;

    fn handler() -> WosSearchHandler {
        let client = WosClient::with_transport(Arc::new(MockTransport::with_total(500)))
            .pacer(Arc::new(NoopPacer));
        WosSearchHandler {
            client: Arc::new(client),
            default_database: Database::Wos,
        }
    }

    #[test]
    fn test_defaults() {
        let request = handler().parse_request(&json!({"query": "cancer"})).unwrap();
        assert_eq!(request.query_type, QueryType::Ts);
        assert_eq!(request.document_type, DocumentType::All);
        assert_eq!(request.num_results, 50);
        assert_eq!(request.sort_field, "RS+D");
        assert_eq!(request.database, Database::Wos);
        assert!(request.year.is_none());
    }

    #[test]
    fn test_empty_strings_fall_back_to_defaults() {
        let request = handler()
            .parse_request(&json!({
                "query": "cancer",
                "query_type": "",
                "document_type": "",
                "sort": "",
                "year": ""
            }))
            .unwrap();
        assert_eq!(request.query_type, QueryType::Ts);
        assert_eq!(request.sort_field, "RS+D");
        assert!(request.year.is_none());
    }

    #[test]
    fn test_all_arguments() {
        let request = handler()
            .parse_request(&json!({
                "query": "graphene",
                "query_type": "TI",
                "year": "2018-2020",
                "document_type": "Review",
                "limit": 120,
                "sort": "PY+D",
                "db": "MEDLINE"
            }))
            .unwrap();
        assert_eq!(request.query_type, QueryType::Ti);
        assert_eq!(request.year.as_deref(), Some("2018-2020"));
        assert_eq!(request.document_type, DocumentType::Review);
        assert_eq!(request.num_results, 120);
        assert_eq!(request.sort_field, "PY+D");
        assert_eq!(request.database, Database::Medline);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let h = handler();
        assert!(h.parse_request(&json!({})).is_err());
        assert!(h
            .parse_request(&json!({"query": "x", "query_type": "XX"}))
            .unwrap_err()
            .contains("XX"));
        assert!(h
            .parse_request(&json!({"query": "x", "document_type": "Foo"}))
            .unwrap_err()
            .contains("Foo"));
        assert!(h
            .parse_request(&json!({"query": "x", "db": "SCOPUS"}))
            .is_err());
    }

    #[test]
    fn test_limit_handling() {
        let h = handler();
        let negative = h.parse_request(&json!({"query": "x", "limit": -5})).unwrap();
        assert_eq!(negative.num_results, 0);

        let text = h.parse_request(&json!({"query": "x", "limit": "7"})).unwrap();
        assert_eq!(text.num_results, 7);

        let float = h.parse_request(&json!({"query": "x", "limit": 10.0})).unwrap();
        assert_eq!(float.num_results, 10);

        let zero = h.parse_request(&json!({"query": "x", "limit": 0})).unwrap();
        assert_eq!(zero.num_results, DEFAULT_LIMIT);

        assert!(h
            .parse_request(&json!({"query": "x", "limit": 2.5}))
            .unwrap_err()
            .contains("integer"));

        let numeric_year = h.parse_request(&json!({"query": "x", "year": 2020})).unwrap();
        assert_eq!(numeric_year.year.as_deref(), Some("2020"));
    }

    #[tokio::test]
    async fn test_execute_returns_total_and_data() {
        let value = handler()
            .execute(json!({"query": "cancer", "limit": 3}))
            .await
            .unwrap();
        assert_eq!(value["total"], 500);
        assert_eq!(value["data"].as_array().unwrap().len(), 3);
        assert_eq!(value["data"][0]["journal"], "MOCK JOURNAL");
    }
}
