//! Domain types and pure domain logic.

pub mod category;
pub mod schema;
pub mod server;
pub mod tool;

pub use category::{DEFAULT_CATEGORY, classify};
pub use schema::parse_parameters;
pub use server::{AuthType, McpServer, NewMcpServer, ServerStatus};
pub use tool::{DiscoverySummary, McpTool, NewMcpTool, RawTool, ToolParameter};
