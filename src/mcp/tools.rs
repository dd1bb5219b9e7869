//! Tool registry for MCP tools.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::models::Database;
use crate::sources::WosClient;

use super::handlers::WosSearchHandler;

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "wos_search")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: serde_json::Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments
    async fn execute(&self, args: Value) -> Result<Value, String>;
}

/// Registry for all MCP tools
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create a registry exposing the search tool over `client`
    pub fn new(client: Arc<WosClient>, default_database: Database) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };

        registry.register(Tool {
            name: "wos_search".to_string(),
            description: "Search Web of Science and return normalized bibliographic records. \
                Pages through results (50 per request) up to the requested limit."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search text, e.g. 'cancer treatment'"
                    },
                    "query_type": {
                        "type": "string",
                        "description": "Field to search: TS (topic), TI (title), AU (author), DO (DOI), IS (ISSN), PMID (PubMed ID)",
                        "enum": ["TS", "TI", "AU", "DO", "IS", "PMID"],
                        "default": "TS"
                    },
                    "year": {
                        "type": "string",
                        "description": "Year filter (e.g., '2020', '2018-2022', '2010-', '-2015')"
                    },
                    "document_type": {
                        "type": "string",
                        "description": "Document type filter",
                        "enum": ["All", "Article", "Review"],
                        "default": "All"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Total number of records to return (0 means the default)",
                        "default": 50
                    },
                    "sort": {
                        "type": "string",
                        "description": "Sort field and direction joined by '+': LD (load date), PY (publication year), RS (relevance), TC (times cited); A or D. Comma-separate multiple fields.",
                        "default": "RS+D"
                    },
                    "db": {
                        "type": "string",
                        "description": "Database: BCI, BIOABS, BIOSIS, CCC, DIIDW, DRCI, MEDLINE, PPRN, WOK (all), WOS (Core Collection), ZOOREC",
                        "default": default_database.code()
                    }
                },
                "required": ["query"]
            }),
            handler: Arc::new(WosSearchHandler {
                client,
                default_database,
            }),
        });

        registry
    }

    /// Register a tool
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get all tools
    pub fn all(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, String> {
        let tool = self
            .get(name)
            .ok_or_else(|| format!("Tool '{}' not found", name))?;

        tool.handler.execute(args).await
    }
}
