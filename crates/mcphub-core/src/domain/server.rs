//! MCP server domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authentication strategy used when contacting an MCP server.
///
/// The matching credential material lives in `McpServer::auth_config` as an
/// opaque JSON blob interpreted per variant by the credential injector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    /// `Authorization: Bearer <token>`, config shape `{"token": ...}`.
    Bearer,
    /// HTTP basic auth, config shape `{"username": ..., "password": ...}`.
    Basic,
    /// Header named `key` set to `value`, config shape `{"key": ..., "value": ...}`.
    ApiKey,
    /// No credentials attached to outgoing requests. Unknown auth type
    /// strings deserialize to this variant, so it must stay last.
    #[default]
    #[serde(other)]
    None,
}

impl AuthType {
    /// Stable string form as stored in the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bearer => "bearer",
            Self::Basic => "basic",
            Self::ApiKey => "api_key",
        }
    }

    /// Parse a stored auth type string.
    ///
    /// Unrecognized values fall back to `None`, matching the behavior of the
    /// admin surface which accepts free-form strings here.
    pub fn parse(s: &str) -> Self {
        match s {
            "bearer" => Self::Bearer,
            "basic" => Self::Basic,
            "api_key" => Self::ApiKey,
            _ => Self::None,
        }
    }
}

/// Administrative status of an MCP server.
///
/// Discovery only runs against `Active` servers; the admin surface flips
/// servers between states (e.g. after a failed health check).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    /// Server is reachable and eligible for discovery.
    Active,
    /// Server is registered but not eligible for discovery.
    #[default]
    Inactive,
    /// Last contact with the server failed.
    Error,
}

impl ServerStatus {
    /// Stable string form as stored in the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Error => "error",
        }
    }

    /// Parse a stored status string; unknown values map to `Inactive`.
    pub fn parse(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            "error" => Self::Error,
            _ => Self::Inactive,
        }
    }
}

/// A remote MCP server registered in the catalog, with a database ID.
///
/// Servers are created and edited by the admin surface only; discovery
/// never creates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServer {
    /// Database ID of the server.
    pub id: i64,

    /// Unique, user-friendly name.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// HTTP(S) endpoint the JSON-RPC transport talks to.
    pub url: String,

    /// Authentication strategy for outgoing requests.
    pub auth_type: AuthType,

    /// Opaque JSON credential blob, interpreted per `auth_type`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_config: Option<String>,

    /// Administrative status; discovery requires `Active`.
    pub status: ServerStatus,

    /// Whether tools from this server are offered downstream.
    pub enabled: bool,

    /// Free-form tags for filtering in list views.
    pub tags: Vec<String>,

    /// When the server was registered.
    pub created_at: DateTime<Utc>,

    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// An MCP server to be inserted into the catalog (no ID yet).
///
/// New servers start out `Inactive`; the admin surface activates them once
/// a connection check succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMcpServer {
    /// Unique, user-friendly name.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// HTTP(S) endpoint the JSON-RPC transport talks to.
    pub url: String,

    /// Authentication strategy for outgoing requests.
    pub auth_type: AuthType,

    /// Opaque JSON credential blob, interpreted per `auth_type`.
    pub auth_config: Option<String>,

    /// Whether tools from this server are offered downstream.
    pub enabled: bool,

    /// Free-form tags for filtering in list views.
    pub tags: Vec<String>,
}

impl NewMcpServer {
    /// Create a new server registration with defaults (no auth, enabled).
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            url: url.into(),
            auth_type: AuthType::None,
            auth_config: None,
            enabled: true,
            tags: Vec::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach credentials.
    #[must_use]
    pub fn with_auth(mut self, auth_type: AuthType, auth_config: impl Into<String>) -> Self {
        self.auth_type = auth_type;
        self.auth_config = Some(auth_config.into());
        self
    }

    /// Set the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set enabled status.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}
