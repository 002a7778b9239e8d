//! Tool catalog domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One parameter of a discovered tool.
///
/// Produced by the schema parser from the tool's `inputSchema`. The `type`
/// tag is passed through unvalidated and `default` is kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name (the property key in the schema).
    pub name: String,

    /// JSON-schema type tag, copied verbatim; empty when absent.
    #[serde(rename = "type", default)]
    pub type_name: String,

    /// Human-readable description; empty when absent.
    #[serde(default)]
    pub description: String,

    /// True only when the name appears in the schema's `required` list.
    #[serde(default)]
    pub required: bool,

    /// Default value, preserved opaquely without type checking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Allowed string values, in schema order; non-string entries dropped.
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

/// A tool persisted in the catalog, owned by an MCP server.
///
/// Created and updated by the reconciliation engine; `enabled` and
/// `category` may additionally be edited by the admin surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpTool {
    /// Database ID of the tool.
    pub id: i64,

    /// Owning server; tools are deleted with their server.
    pub server_id: i64,

    /// Tool name; unique per server.
    pub name: String,

    /// Human-readable description from the remote server.
    pub description: String,

    /// Category label, inferred at discovery time.
    pub category: String,

    /// Ordered parameter descriptors parsed from the input schema.
    pub parameters: Vec<ToolParameter>,

    /// Whether the tool is offered downstream; user-set, survives
    /// incremental discovery.
    pub enabled: bool,

    /// When the tool was first discovered.
    pub created_at: DateTime<Utc>,

    /// Last time discovery (or the admin surface) touched the tool.
    pub updated_at: DateTime<Utc>,
}

/// A tool to be inserted into the catalog (no ID yet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMcpTool {
    /// Owning server.
    pub server_id: i64,

    /// Tool name; unique per server.
    pub name: String,

    /// Human-readable description from the remote server.
    pub description: String,

    /// Category label, inferred at discovery time.
    pub category: String,

    /// Ordered parameter descriptors parsed from the input schema.
    pub parameters: Vec<ToolParameter>,

    /// Newly discovered tools start out enabled.
    pub enabled: bool,
}

/// A tool as reported by the remote server's `tools/list` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTool {
    /// Tool name.
    pub name: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,

    /// JSON-schema-like object describing input parameters.
    #[serde(default, rename = "inputSchema")]
    pub input_schema: Option<Value>,
}

/// Outcome of a discovery or refresh run, as reported to the admin surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverySummary {
    /// Whether the run succeeded overall (the fetch itself succeeded).
    pub success: bool,

    /// Human-readable outcome message.
    pub message: String,

    /// The tools persisted by this run.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<McpTool>,
}

impl DiscoverySummary {
    /// Summary for a completed run.
    pub fn completed(message: impl Into<String>, tools: Vec<McpTool>) -> Self {
        Self {
            success: true,
            message: message.into(),
            tools,
        }
    }

    /// Summary for a failed run.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            tools: Vec::new(),
        }
    }
}
