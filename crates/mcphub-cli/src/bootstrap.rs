//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - Database pool and repositories (via mcphub-db)
//! - HTTP transport factory and discovery service (via mcphub-mcp)
//!
//! Command handlers receive the fully-composed context and delegate work
//! through the repository and discovery ports.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use mcphub_core::paths::database_path;
use mcphub_core::ports::Repos;
use mcphub_db::{StoreFactory, setup_database};
use mcphub_mcp::{DiscoveryService, HttpTransportFactory};

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Catalog database path; defaults to the user data dir when unset.
    pub db_path: Option<PathBuf>,
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Repository container for catalog access.
    pub repos: Repos,
    /// The discovery engine.
    pub discovery: Arc<DiscoveryService>,
}

/// Bootstrap the CLI application.
///
/// This is the composition root. It:
/// 1. Resolves the database path and runs schema setup
/// 2. Builds the `SQLite` repositories
/// 3. Wires the discovery service with the HTTP transport factory
///
/// # Errors
///
/// Returns an error if the database path cannot be resolved or the
/// database cannot be opened.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let db_path = match config.db_path {
        Some(path) => path,
        None => database_path()?,
    };

    let pool = setup_database(&db_path).await?;
    let repos = StoreFactory::build_repos(pool);

    let discovery = Arc::new(DiscoveryService::new(
        repos.servers.clone(),
        repos.tools.clone(),
        Arc::new(HttpTransportFactory),
    ));

    Ok(CliContext { repos, discovery })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_with_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig {
            db_path: Some(dir.path().join("catalog.db")),
        };

        let ctx = bootstrap(config).await.unwrap();
        let page = ctx
            .repos
            .servers
            .list(mcphub_core::ports::ServerFilter::default())
            .await
            .unwrap();
        assert_eq!(page.total, 0);
    }
}
