//! MCP (Model Context Protocol) implementation.

mod handlers;
pub mod server;
mod tools;

pub use handlers::{WosSearchHandler, DEFAULT_LIMIT};
pub use server::McpServer;
pub use tools::{Tool, ToolHandler, ToolRegistry};
