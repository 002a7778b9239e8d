//! `SQLite` implementation of the MCP server repository.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use mcphub_core::domain::{AuthType, McpServer, NewMcpServer, ServerStatus};
use mcphub_core::ports::{McpServerRepository, RepositoryError, ServerFilter, ServerPage};

use super::{map_sqlx_error, parse_datetime};

const SERVER_COLUMNS: &str =
    "id, name, description, url, auth_type, auth_config, status, enabled, tags, created_at, updated_at";

/// `SQLite` implementation of the MCP server repository.
pub struct SqliteServerRepository {
    pool: SqlitePool,
}

impl SqliteServerRepository {
    /// Create a new `SQLite` server repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal row types for database queries
// ─────────────────────────────────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
struct ServerRow {
    id: i64,
    name: String,
    description: String,
    url: String,
    auth_type: String,
    auth_config: Option<String>,
    status: String,
    enabled: bool,
    tags: String,
    created_at: String,
    updated_at: String,
}

impl From<ServerRow> for McpServer {
    fn from(row: ServerRow) -> Self {
        let tags = if row.tags.is_empty() {
            Vec::new()
        } else {
            row.tags.split(',').map(str::to_string).collect()
        };

        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            url: row.url,
            auth_type: AuthType::parse(&row.auth_type),
            auth_config: row.auth_config,
            status: ServerStatus::parse(&row.status),
            enabled: row.enabled,
            tags,
            created_at: parse_datetime(&row.created_at),
            updated_at: parse_datetime(&row.updated_at),
        }
    }
}

/// Append the shared WHERE conditions for a server filter.
fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &ServerFilter) {
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(enabled) = filter.enabled {
        qb.push(" AND enabled = ").push_bind(enabled);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        qb.push(" AND (name LIKE ")
            .push_bind(pattern.clone())
            .push(" OR description LIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl McpServerRepository for SqliteServerRepository {
    async fn insert(&self, server: NewMcpServer) -> Result<McpServer, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO mcp_servers (name, description, url, auth_type, auth_config, enabled, tags)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&server.name)
        .bind(&server.description)
        .bind(&server.url)
        .bind(server.auth_type.as_str())
        .bind(&server.auth_config)
        .bind(server.enabled)
        .bind(server.tags.join(","))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    async fn get_by_id(&self, id: i64) -> Result<McpServer, RepositoryError> {
        let query = format!("SELECT {SERVER_COLUMNS} FROM mcp_servers WHERE id = ?");
        let row = sqlx::query_as::<_, ServerRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| RepositoryError::NotFound(format!("MCP server {id}")))?;

        Ok(row.into())
    }

    async fn get_by_name(&self, name: &str) -> Result<McpServer, RepositoryError> {
        let query = format!("SELECT {SERVER_COLUMNS} FROM mcp_servers WHERE name = ?");
        let row = sqlx::query_as::<_, ServerRow>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| RepositoryError::NotFound(format!("MCP server '{name}'")))?;

        Ok(row.into())
    }

    async fn list(&self, filter: ServerFilter) -> Result<ServerPage, RepositoryError> {
        let mut count_qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM mcp_servers WHERE 1=1");
        push_filters(&mut count_qb, &filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let page = filter.page.max(1);
        let offset = i64::from(page - 1) * i64::from(filter.per_page);

        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("SELECT {SERVER_COLUMNS} FROM mcp_servers WHERE 1=1"));
        push_filters(&mut qb, &filter);
        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(i64::from(filter.per_page))
            .push(" OFFSET ")
            .push_bind(offset);

        let rows: Vec<ServerRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(ServerPage {
            total,
            page,
            per_page: filter.per_page,
            servers: rows.into_iter().map(Into::into).collect(),
        })
    }

    async fn update(&self, server: &McpServer) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE mcp_servers
            SET name = ?, description = ?, url = ?, auth_type = ?, auth_config = ?,
                status = ?, enabled = ?, tags = ?, updated_at = datetime('now')
            WHERE id = ?
            "#,
        )
        .bind(&server.name)
        .bind(&server.description)
        .bind(&server.url)
        .bind(server.auth_type.as_str())
        .bind(&server.auth_config)
        .bind(server.status.as_str())
        .bind(server.enabled)
        .bind(server.tags.join(","))
        .bind(server.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "MCP server {}",
                server.id
            )));
        }

        Ok(())
    }

    async fn set_status(&self, id: i64, status: ServerStatus) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE mcp_servers SET status = ?, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("MCP server {id}")));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        // Tools are deleted via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM mcp_servers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("MCP server {id}")));
        }

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
