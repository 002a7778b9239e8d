//! Transport abstraction for talking to remote MCP servers.
//!
//! Discovery is transport-agnostic: it asks a [`TransportFactory`] for a
//! fresh session object and only ever uses the `connect` / `list_tools` /
//! `close` surface. The reference implementation is a stateless JSON-RPC
//! POST transport; a session-oriented stream transport fits behind the same
//! trait.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{AuthType, RawTool};

/// Errors surfaced by a tool transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server URL could not be parsed. Raised before any I/O.
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// The URL scheme is not supported by this transport. Raised before any I/O.
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// The auth config blob could not be parsed for the declared auth type.
    /// Raised before any I/O.
    #[error("Failed to parse auth config: {0}")]
    ConfigParse(String),

    /// The connection could not be established.
    #[error("Failed to connect to MCP server: {0}")]
    ConnectFailed(String),

    /// The protocol handshake failed (malformed response or version
    /// mismatch). No negotiation or fallback is attempted.
    #[error("MCP handshake failed: {0}")]
    HandshakeFailed(String),

    /// An operation was attempted without a connected session.
    #[error("Not connected to an MCP server")]
    NotConnected,

    /// The fixed request timeout elapsed.
    #[error("Timed out waiting for MCP server response")]
    Timeout,

    /// Transport-level failure (I/O, unexpected HTTP status, bad payload).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote server returned a JSON-RPC error object.
    #[error("MCP server returned error: code={code}, message={message}")]
    Protocol {
        /// JSON-RPC error code.
        code: i64,
        /// JSON-RPC error message.
        message: String,
    },
}

/// A session to a remote MCP server.
///
/// `connect` validates the URL and credentials, then performs the protocol
/// handshake; `list_tools` requires a connected session; `close` is
/// idempotent and releases session resources.
#[async_trait]
pub trait ToolTransport: Send {
    /// Establish a session: validate the URL, apply credentials, handshake.
    async fn connect(
        &mut self,
        url: &str,
        auth_type: AuthType,
        auth_config: Option<&str>,
    ) -> Result<(), TransportError>;

    /// Execute `tools/list` against the connected server.
    async fn list_tools(&self) -> Result<Vec<RawTool>, TransportError>;

    /// Release session resources. Safe to call multiple times.
    async fn close(&mut self);
}

/// Produces fresh transport sessions for the discovery engine.
pub trait TransportFactory: Send + Sync {
    /// Create a new, unconnected transport.
    fn create(&self) -> Box<dyn ToolTransport>;
}
