//! Tool discovery and reconciliation against the catalog.
//!
//! Two reconciliation modes share the same fetch pipeline:
//!
//! - [`DiscoveryService::discover_tools`] is additive. Fetched tools are
//!   upserted by `(server_id, name)`; tools missing from the fetch are kept
//!   and user customizations (`enabled`) survive.
//! - [`DiscoveryService::refresh_all_tools`] replaces the server's whole
//!   tool set in one transaction; customizations do not survive.
//!
//! Operations on the same server are serialized through a keyed async lock
//! so a discover and a refresh never interleave.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use mcphub_core::domain::{
    DiscoverySummary, McpServer, McpTool, NewMcpTool, RawTool, ServerStatus, classify,
    parse_parameters,
};
use mcphub_core::ports::{
    McpServerRepository, McpToolRepository, RepositoryError, TransportError, TransportFactory,
};

/// Errors surfaced by the discovery engine.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// No server with the given ID is registered.
    #[error("MCP server {0} not found")]
    ServerNotFound(i64),

    /// The server exists but is not active; no network call is made.
    #[error("MCP server {0} is not active")]
    ServerNotActive(i64),

    /// Fetching from the remote server failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The catalog could not be read or written.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Discovery and reconciliation engine.
///
/// Holds repository and transport ports only; storage and wire details stay
/// behind the trait boundary.
pub struct DiscoveryService {
    servers: Arc<dyn McpServerRepository>,
    tools: Arc<dyn McpToolRepository>,
    transports: Arc<dyn TransportFactory>,
    locks: Mutex<HashMap<i64, Arc<tokio::sync::Mutex<()>>>>,
}

impl DiscoveryService {
    /// Create a new discovery service.
    pub fn new(
        servers: Arc<dyn McpServerRepository>,
        tools: Arc<dyn McpToolRepository>,
        transports: Arc<dyn TransportFactory>,
    ) -> Self {
        Self {
            servers,
            tools,
            transports,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Incremental discovery: fetch the server's tools and merge them into
    /// the catalog.
    ///
    /// Existing tools keep their `id` and user-set `enabled` flag; tools the
    /// server no longer reports are left in place. Per-tool persistence
    /// failures are logged and skipped, so the summary may report fewer
    /// tools than the server offered.
    ///
    /// # Errors
    ///
    /// Returns `ServerNotFound`, `ServerNotActive`, `Transport` when the
    /// fetch fails, or `Repository` when the catalog itself is unavailable.
    pub async fn discover_tools(&self, server_id: i64) -> Result<DiscoverySummary, DiscoveryError> {
        let lock = self.server_lock(server_id);
        let _guard = lock.lock().await;

        let server = self.load_active_server(server_id).await?;
        let raw_tools = self.fetch(&server).await?;

        let mut saved = Vec::with_capacity(raw_tools.len());
        for raw in raw_tools {
            match self.upsert(server_id, raw).await {
                Ok(tool) => saved.push(tool),
                Err((name, e)) => {
                    tracing::warn!(server_id, tool = %name, error = %e, "Failed to persist discovered tool");
                }
            }
        }

        tracing::info!(server_id, count = saved.len(), "Tool discovery completed");
        Ok(DiscoverySummary::completed(
            format!("Discovered {} tools", saved.len()),
            saved,
        ))
    }

    /// Full refresh: fetch the server's tools and atomically replace its
    /// entire catalog entry.
    ///
    /// The replacement happens in a single transaction after a successful
    /// fetch, so a failed fetch leaves the previous catalog intact. Enabled
    /// flags and category overrides do not survive.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::discover_tools`].
    pub async fn refresh_all_tools(
        &self,
        server_id: i64,
    ) -> Result<DiscoverySummary, DiscoveryError> {
        let lock = self.server_lock(server_id);
        let _guard = lock.lock().await;

        let server = self.load_active_server(server_id).await?;
        let raw_tools = self.fetch(&server).await?;

        let fresh: Vec<NewMcpTool> = raw_tools
            .into_iter()
            .map(|raw| enrich(server_id, raw))
            .collect();

        let tools = self.tools.replace_for_server(server_id, fresh).await?;

        tracing::info!(server_id, count = tools.len(), "Tool refresh completed");
        Ok(DiscoverySummary::completed(
            format!("Refreshed {} tools", tools.len()),
            tools,
        ))
    }

    /// Get or create the per-server lock.
    fn server_lock(&self, server_id: i64) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        locks.entry(server_id).or_default().clone()
    }

    async fn load_active_server(&self, server_id: i64) -> Result<McpServer, DiscoveryError> {
        let server = self.servers.get_by_id(server_id).await.map_err(|e| match e {
            RepositoryError::NotFound(_) => DiscoveryError::ServerNotFound(server_id),
            other => DiscoveryError::Repository(other),
        })?;

        if server.status != ServerStatus::Active {
            return Err(DiscoveryError::ServerNotActive(server_id));
        }

        Ok(server)
    }

    /// One fetch: fresh transport session, `tools/list`, close.
    async fn fetch(&self, server: &McpServer) -> Result<Vec<RawTool>, TransportError> {
        let mut transport = self.transports.create();
        transport
            .connect(&server.url, server.auth_type, server.auth_config.as_deref())
            .await?;

        let result = transport.list_tools().await;
        transport.close().await;
        result
    }

    /// Upsert one fetched tool by its `(server_id, name)` identity.
    async fn upsert(
        &self,
        server_id: i64,
        raw: RawTool,
    ) -> Result<McpTool, (String, RepositoryError)> {
        let name = raw.name.clone();
        let fresh = enrich(server_id, raw);

        let result = match self.tools.get_by_server_and_name(server_id, &name).await {
            Ok(mut existing) => {
                existing.description = fresh.description;
                existing.category = fresh.category;
                existing.parameters = fresh.parameters;
                // enabled is user-owned and deliberately left untouched
                self.tools
                    .update(&existing)
                    .await
                    .map(|()| existing)
            }
            Err(RepositoryError::NotFound(_)) => self.tools.insert(fresh).await,
            Err(e) => Err(e),
        };

        result.map_err(|e| (name, e))
    }
}

/// Turn a raw wire tool into a catalog row: parse the schema, infer a
/// category, default to enabled.
fn enrich(server_id: i64, raw: RawTool) -> NewMcpTool {
    let category = classify(&raw.name).to_string();
    let parameters = parse_parameters(raw.input_schema.as_ref());

    NewMcpTool {
        server_id,
        name: raw.name,
        description: raw.description.unwrap_or_default(),
        category,
        parameters,
        enabled: true,
    }
}
