//! Composition utilities for building repositories with `SQLite` backends.
//!
//! This module is focused purely on construction and should not contain
//! any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use mcphub_core::ports::Repos;

use crate::repositories::{SqliteServerRepository, SqliteToolRepository};

/// Factory for creating repository instances with `SQLite` backends.
pub struct StoreFactory;

impl StoreFactory {
    /// Create a `SQLite` connection pool from a connection URL.
    ///
    /// # Arguments
    ///
    /// * `db_url` - `SQLite` connection URL (e.g., "sqlite:~/.local/share/mcphub/mcphub.db")
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub async fn create_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
        let pool = SqlitePool::connect(db_url).await?;
        Ok(pool)
    }

    /// Build all `SQLite` repositories from a pool.
    ///
    /// This is the recommended way for adapters to obtain repositories.
    /// Returns a `Repos` struct containing trait-object-wrapped repositories.
    #[must_use]
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteServerRepository::new(pool.clone())),
            Arc::new(SqliteToolRepository::new(pool)),
        )
    }

    /// Create a server repository from a pool.
    #[must_use]
    pub fn server_repository(pool: SqlitePool) -> Arc<SqliteServerRepository> {
        Arc::new(SqliteServerRepository::new(pool))
    }

    /// Create a tool repository from a pool.
    #[must_use]
    pub fn tool_repository(pool: SqlitePool) -> Arc<SqliteToolRepository> {
        Arc::new(SqliteToolRepository::new(pool))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;
    use mcphub_core::domain::NewMcpServer;

    #[tokio::test]
    async fn test_build_repos_wires_both_repositories() {
        let pool = setup_test_database().await.unwrap();
        let repos = StoreFactory::build_repos(pool);

        let server = repos
            .servers
            .insert(NewMcpServer::new("s", "http://localhost"))
            .await
            .unwrap();
        let count = repos.tools.count_by_server(server.id).await.unwrap();
        assert_eq!(count, 0);
    }
}
