//! `SQLite` implementation of the tool catalog repository.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use mcphub_core::domain::{McpTool, NewMcpTool, ToolParameter};
use mcphub_core::ports::{McpToolRepository, RepositoryError, ToolFilter, ToolPage};

use super::{map_sqlx_error, parse_datetime};

const TOOL_COLUMNS: &str =
    "id, server_id, name, description, category, parameters, enabled, created_at, updated_at";

/// `SQLite` implementation of the tool catalog repository.
pub struct SqliteToolRepository {
    pool: SqlitePool,
}

impl SqliteToolRepository {
    /// Create a new `SQLite` tool repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal row types for database queries
// ─────────────────────────────────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
struct ToolRow {
    id: i64,
    server_id: i64,
    name: String,
    description: String,
    category: String,
    parameters: String,
    enabled: bool,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ToolRow> for McpTool {
    type Error = RepositoryError;

    fn try_from(row: ToolRow) -> Result<Self, Self::Error> {
        let parameters: Vec<ToolParameter> =
            serde_json::from_str(&row.parameters).map_err(|e| {
                RepositoryError::Serialization(format!(
                    "tool {} has malformed parameters: {e}",
                    row.id
                ))
            })?;

        Ok(Self {
            id: row.id,
            server_id: row.server_id,
            name: row.name,
            description: row.description,
            category: row.category,
            parameters,
            enabled: row.enabled,
            created_at: parse_datetime(&row.created_at),
            updated_at: parse_datetime(&row.updated_at),
        })
    }
}

fn rows_to_tools(rows: Vec<ToolRow>) -> Result<Vec<McpTool>, RepositoryError> {
    rows.into_iter().map(McpTool::try_from).collect()
}

fn encode_parameters(parameters: &[ToolParameter]) -> Result<String, RepositoryError> {
    serde_json::to_string(parameters).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Append the shared WHERE conditions for a tool filter.
fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &ToolFilter) {
    if let Some(server_id) = filter.server_id {
        qb.push(" AND server_id = ").push_bind(server_id);
    }
    if let Some(category) = &filter.category {
        qb.push(" AND category = ").push_bind(category.clone());
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
impl McpToolRepository for SqliteToolRepository {
    async fn insert(&self, tool: NewMcpTool) -> Result<McpTool, RepositoryError> {
        let parameters = encode_parameters(&tool.parameters)?;

        let result = sqlx::query(
            r#"
            INSERT INTO mcp_tools (server_id, name, description, category, parameters, enabled)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(tool.server_id)
        .bind(&tool.name)
        .bind(&tool.description)
        .bind(&tool.category)
        .bind(parameters)
        .bind(tool.enabled)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let id = result.last_insert_rowid();
        let query = format!("SELECT {TOOL_COLUMNS} FROM mcp_tools WHERE id = ?");
        let row = sqlx::query_as::<_, ToolRow>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.try_into()
    }

    async fn get_by_server_and_name(
        &self,
        server_id: i64,
        name: &str,
    ) -> Result<McpTool, RepositoryError> {
        let query = format!("SELECT {TOOL_COLUMNS} FROM mcp_tools WHERE server_id = ? AND name = ?");
        let row = sqlx::query_as::<_, ToolRow>(&query)
            .bind(server_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| {
                RepositoryError::NotFound(format!("tool '{name}' on server {server_id}"))
            })?;

        row.try_into()
    }

    async fn list_by_server(&self, server_id: i64) -> Result<Vec<McpTool>, RepositoryError> {
        let query =
            format!("SELECT {TOOL_COLUMNS} FROM mcp_tools WHERE server_id = ? ORDER BY name");
        let rows = sqlx::query_as::<_, ToolRow>(&query)
            .bind(server_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows_to_tools(rows)
    }

    async fn list(&self, filter: ToolFilter) -> Result<ToolPage, RepositoryError> {
        let mut count_qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM mcp_tools WHERE 1=1");
        push_filters(&mut count_qb, &filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let page = filter.page.max(1);
        let offset = i64::from(page - 1) * i64::from(filter.per_page);

        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("SELECT {TOOL_COLUMNS} FROM mcp_tools WHERE 1=1"));
        push_filters(&mut qb, &filter);
        qb.push(" ORDER BY server_id, name LIMIT ")
            .push_bind(i64::from(filter.per_page))
            .push(" OFFSET ")
            .push_bind(offset);

        let rows: Vec<ToolRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(ToolPage {
            total,
            page,
            per_page: filter.per_page,
            tools: rows_to_tools(rows)?,
        })
    }

    async fn update(&self, tool: &McpTool) -> Result<(), RepositoryError> {
        let parameters = encode_parameters(&tool.parameters)?;

        let result = sqlx::query(
            r#"
            UPDATE mcp_tools
            SET description = ?, category = ?, parameters = ?, enabled = ?,
                updated_at = datetime('now')
            WHERE id = ?
            "#,
        )
        .bind(&tool.description)
        .bind(&tool.category)
        .bind(parameters)
        .bind(tool.enabled)
        .bind(tool.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("tool {}", tool.id)));
        }

        Ok(())
    }

    async fn set_enabled(&self, id: i64, enabled: bool) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE mcp_tools SET enabled = ?, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(enabled)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("tool {id}")));
        }

        Ok(())
    }

    async fn set_category(&self, id: i64, category: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE mcp_tools SET category = ?, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(category)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("tool {id}")));
        }

        Ok(())
    }

    async fn categories(&self, server_id: Option<i64>) -> Result<Vec<String>, RepositoryError> {
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
            "SELECT DISTINCT category FROM mcp_tools WHERE category != '' ",
        );
        if let Some(server_id) = server_id {
            qb.push(" AND server_id = ").push_bind(server_id);
        }
        qb.push(" ORDER BY category");

        qb.build_query_scalar()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn replace_for_server(
        &self,
        server_id: i64,
        tools: Vec<NewMcpTool>,
    ) -> Result<Vec<McpTool>, RepositoryError> {
        // Encode up front so a bad parameter set cannot abort a half-written
        // transaction.
        let mut encoded = Vec::with_capacity(tools.len());
        for tool in &tools {
            encoded.push(encode_parameters(&tool.parameters)?);
        }

        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query("DELETE FROM mcp_tools WHERE server_id = ?")
            .bind(server_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        for (tool, parameters) in tools.iter().zip(encoded) {
            sqlx::query(
                r#"
                INSERT INTO mcp_tools (server_id, name, description, category, parameters, enabled)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(server_id)
            .bind(&tool.name)
            .bind(&tool.description)
            .bind(&tool.category)
            .bind(parameters)
            .bind(tool.enabled)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        }

        tx.commit().await.map_err(map_sqlx_error)?;

        self.list_by_server(server_id).await
    }

    async fn count_by_server(&self, server_id: i64) -> Result<i64, RepositoryError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM mcp_tools WHERE server_id = ?")
            .bind(server_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
