//! `SQLite` repository implementations.

mod sqlite_server_repository;
mod sqlite_tool_repository;

pub use sqlite_server_repository::SqliteServerRepository;
pub use sqlite_tool_repository::SqliteToolRepository;

use chrono::{DateTime, TimeZone, Utc};
use mcphub_core::ports::RepositoryError;

/// Parse a datetime string from `SQLite` to a `DateTime<Utc>`.
///
/// `SQLite` stores datetime as "YYYY-MM-DD HH:MM:SS".
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| Utc.from_utc_datetime(&dt))
        .unwrap_or_else(|_| Utc::now())
}

/// Map `SQLx` errors to `RepositoryError`.
pub(crate) fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    let msg = e.to_string();
    if msg.contains("UNIQUE constraint failed") {
        return RepositoryError::Conflict(msg);
    }
    RepositoryError::Internal(msg)
}
