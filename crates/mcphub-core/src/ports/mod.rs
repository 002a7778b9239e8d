//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the discovery engine expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - Repository traits are minimal and CRUD-focused
//! - The transport trait is polymorphic so discovery stays transport-agnostic

pub mod server_repository;
pub mod tool_repository;
pub mod transport;

use std::sync::Arc;
use thiserror::Error;

pub use server_repository::{McpServerRepository, ServerFilter, ServerPage};
pub use tool_repository::{McpToolRepository, ToolFilter, ToolPage};
pub use transport::{ToolTransport, TransportError, TransportFactory};

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g. sqlx
/// errors) and provides a clean interface for services to handle storage
/// failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    Conflict(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Storage backend error.
    #[error("Storage error: {0}")]
    Internal(String),
}

/// Container for all repository trait objects.
///
/// Provides a consistent way to wire repositories across adapters without
/// coupling them to concrete implementations. It lives in `mcphub-core` so
/// the discovery engine can accept it without depending on `mcphub-db`.
#[derive(Clone)]
pub struct Repos {
    /// Server catalog repository.
    pub servers: Arc<dyn McpServerRepository>,
    /// Tool catalog repository.
    pub tools: Arc<dyn McpToolRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(servers: Arc<dyn McpServerRepository>, tools: Arc<dyn McpToolRepository>) -> Self {
        Self { servers, tools }
    }
}
