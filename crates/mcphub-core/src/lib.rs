//! Core domain types and port definitions for mcphub.
//!
//! This crate holds the catalog domain model (servers, tools, parameter
//! descriptors), the pure enrichment functions (schema parsing, category
//! inference), and the port traits the discovery engine depends on.
//! No storage or network implementation details live here.

pub mod domain;
pub mod paths;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    AuthType, DiscoverySummary, McpServer, McpTool, NewMcpServer, NewMcpTool, RawTool,
    ServerStatus, ToolParameter, classify, parse_parameters,
};
pub use ports::{
    McpServerRepository, McpToolRepository, Repos, RepositoryError, ServerFilter, ServerPage,
    ToolFilter, ToolPage, ToolTransport, TransportError, TransportFactory,
};

// Re-export path utilities
pub use paths::{PathError, data_root, database_path};
