//! MCP server repository trait.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{McpServer, NewMcpServer, ServerStatus};

/// Filters and paging for server list views.
#[derive(Debug, Clone)]
pub struct ServerFilter {
    /// Only servers with this status.
    pub status: Option<ServerStatus>,
    /// Only servers with this enabled flag.
    pub enabled: Option<bool>,
    /// Substring match against name and description.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
}

impl Default for ServerFilter {
    fn default() -> Self {
        Self {
            status: None,
            enabled: None,
            search: None,
            page: 1,
            per_page: 20,
        }
    }
}

/// One page of a filtered server listing.
#[derive(Debug, Clone)]
pub struct ServerPage {
    /// Total matching rows across all pages.
    pub total: i64,
    /// 1-based page number of this page.
    pub page: u32,
    /// Requested page size.
    pub per_page: u32,
    /// The servers on this page.
    pub servers: Vec<McpServer>,
}

/// Repository trait for the MCP server catalog.
///
/// Servers are created and edited through the admin surface; the discovery
/// engine only ever reads them (`get_by_id`) and never deletes. Deleting a
/// server cascades to its tools.
#[async_trait]
pub trait McpServerRepository: Send + Sync {
    /// Insert a new server.
    ///
    /// # Errors
    ///
    /// - `Conflict` if a server with the same name already exists
    /// - `Internal` for storage errors
    async fn insert(&self, server: NewMcpServer) -> Result<McpServer, RepositoryError>;

    /// Get a server by its database ID.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no server with the given ID exists
    async fn get_by_id(&self, id: i64) -> Result<McpServer, RepositoryError>;

    /// Get a server by its unique name.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no server with the given name exists
    async fn get_by_name(&self, name: &str) -> Result<McpServer, RepositoryError>;

    /// List servers matching the filter, newest first.
    async fn list(&self, filter: ServerFilter) -> Result<ServerPage, RepositoryError>;

    /// Update an existing server in full.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no server with the given ID exists
    /// - `Conflict` if the new name collides with another server
    async fn update(&self, server: &McpServer) -> Result<(), RepositoryError>;

    /// Update only the status field.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no server with the given ID exists
    async fn set_status(&self, id: i64, status: ServerStatus) -> Result<(), RepositoryError>;

    /// Delete a server; its tools are removed with it.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no server with the given ID exists
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
