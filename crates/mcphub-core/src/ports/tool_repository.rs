//! Tool catalog repository trait.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{McpTool, NewMcpTool};

/// Filters and paging for tool list views.
#[derive(Debug, Clone)]
pub struct ToolFilter {
    /// Only tools owned by this server.
    pub server_id: Option<i64>,
    /// Only tools with this category.
    pub category: Option<String>,
    /// Only tools with this enabled flag.
    pub enabled: Option<bool>,
    /// Substring match against name and description.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
}

impl Default for ToolFilter {
    fn default() -> Self {
        Self {
            server_id: None,
            category: None,
            enabled: None,
            search: None,
            page: 1,
            per_page: 50,
        }
    }
}

/// One page of a filtered tool listing.
#[derive(Debug, Clone)]
pub struct ToolPage {
    /// Total matching rows across all pages.
    pub total: i64,
    /// 1-based page number of this page.
    pub page: u32,
    /// Requested page size.
    pub per_page: u32,
    /// The tools on this page.
    pub tools: Vec<McpTool>,
}

/// Repository trait for the tool catalog.
///
/// Tool identity is the `(server_id, name)` pair; the reconciliation engine
/// looks up and upserts by it. `replace_for_server` must be atomic so a full
/// refresh never leaves the catalog half-replaced.
#[async_trait]
pub trait McpToolRepository: Send + Sync {
    /// Insert a newly discovered tool.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the `(server_id, name)` pair already exists
    async fn insert(&self, tool: NewMcpTool) -> Result<McpTool, RepositoryError>;

    /// Look up a tool by its identity key.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the server has no tool with that name
    async fn get_by_server_and_name(
        &self,
        server_id: i64,
        name: &str,
    ) -> Result<McpTool, RepositoryError>;

    /// All tools owned by a server, ordered by name.
    async fn list_by_server(&self, server_id: i64) -> Result<Vec<McpTool>, RepositoryError>;

    /// List tools matching the filter.
    async fn list(&self, filter: ToolFilter) -> Result<ToolPage, RepositoryError>;

    /// Update a tool's discovered fields (description, category, parameters,
    /// enabled) and bump its `updated_at`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no tool with the given ID exists
    async fn update(&self, tool: &McpTool) -> Result<(), RepositoryError>;

    /// Flip the user-facing enabled flag.
    async fn set_enabled(&self, id: i64, enabled: bool) -> Result<(), RepositoryError>;

    /// Override the category label.
    async fn set_category(&self, id: i64, category: &str) -> Result<(), RepositoryError>;

    /// Distinct non-empty categories, optionally scoped to one server.
    async fn categories(&self, server_id: Option<i64>) -> Result<Vec<String>, RepositoryError>;

    /// Atomically replace a server's entire tool set.
    ///
    /// Deletes all existing tools for the server and inserts the fresh set
    /// in a single unit of work; no identity or customization survives.
    async fn replace_for_server(
        &self,
        server_id: i64,
        tools: Vec<NewMcpTool>,
    ) -> Result<Vec<McpTool>, RepositoryError>;

    /// Number of tools owned by a server.
    async fn count_by_server(&self, server_id: i64) -> Result<i64, RepositoryError>;
}
